//! Whitespace normalisation for extracted and translated text.
//!
//! PDF text extraction produces ragged output: mixed line endings, tab
//! soup from layout columns, and long runs of blank lines between layout
//! regions. These rules canonicalise a page into a stable form before it is
//! measured against the translation threshold or sent to the backend. Each
//! rule is a pure function (`&str → String`) with no shared state.
//!
//! The transform is total (any input, including empty, is valid) and
//! idempotent — running it twice changes nothing, which keeps it safe to
//! apply at more than one pipeline stage.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_HORIZONTAL_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());
static RE_BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
static RE_PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());

/// Canonicalise line endings and whitespace.
///
/// In order: CRLF and bare CR become LF; runs of spaces and tabs collapse to
/// a single space; runs of three or more line feeds collapse to exactly two
/// (one blank line); leading and trailing whitespace is stripped.
pub fn normalize_whitespace(text: &str) -> String {
    let unixised = text.replace("\r\n", "\n").replace('\r', "\n");
    let collapsed = RE_HORIZONTAL_WS.replace_all(&unixised, " ");
    RE_BLANK_RUNS
        .replace_all(&collapsed, "\n\n")
        .trim()
        .to_string()
}

/// Split text into paragraphs on blank-line boundaries.
///
/// A boundary is two or more consecutive line feeds. Each segment is
/// trimmed; empty segments are dropped silently, so translated text that
/// starts or ends with blank lines never produces empty paragraph blocks.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    RE_PARAGRAPH_BREAK
        .split(text)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_all_line_ending_variants() {
        assert_eq!(normalize_whitespace("a\r\nb\rc\nd"), "a\nb\nc\nd");
    }

    #[test]
    fn collapses_horizontal_whitespace() {
        assert_eq!(normalize_whitespace("a  \t  b"), "a b");
    }

    #[test]
    fn bounds_blank_line_runs() {
        assert_eq!(normalize_whitespace("a\n\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn strips_leading_and_trailing_whitespace() {
        assert_eq!(normalize_whitespace("  \n שלום \n  "), "שלום");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace(" \t\r\n "), "");
    }

    #[test]
    fn is_idempotent() {
        let samples = [
            "a\r\nb\rc",
            "  x \t y \n\n\n\n z  ",
            "שלום\n\n\nעולם",
            "",
            "single line",
        ];
        for s in samples {
            let once = normalize_whitespace(s);
            assert_eq!(normalize_whitespace(&once), once, "input: {s:?}");
        }
    }

    #[test]
    fn never_leaves_three_line_feeds() {
        let out = normalize_whitespace("a\n\n\nb\n\n\n\n\n\nc");
        assert!(!out.contains("\n\n\n"));
    }

    #[test]
    fn splits_on_blank_line_boundaries() {
        assert_eq!(
            split_paragraphs("Para one\n\nPara two"),
            vec!["Para one", "Para two"]
        );
    }

    #[test]
    fn split_drops_empty_segments() {
        assert_eq!(
            split_paragraphs("\n\nPara one\n\n\n\n\n\nPara two\n\n"),
            vec!["Para one", "Para two"]
        );
        assert!(split_paragraphs("").is_empty());
        assert!(split_paragraphs("\n\n\n\n").is_empty());
    }

    #[test]
    fn single_newline_is_not_a_paragraph_break() {
        assert_eq!(split_paragraphs("line one\nline two"), vec!["line one\nline two"]);
    }
}
