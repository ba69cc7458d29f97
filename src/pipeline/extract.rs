//! PDF page extraction: raw bytes in, ordered page texts out.
//!
//! Layout-preserving text extraction via lopdf — no OCR. A page that is a
//! scanned image simply has no text objects and comes out empty; the
//! translate stage detects that downstream and substitutes placeholder text
//! rather than treating it as a failure here.
//!
//! The `lopdf::Document` handle is scoped to [`extract_pages`]; it is
//! dropped on every exit path, including parse errors.

use crate::pipeline::normalize::normalize_whitespace;
use lopdf::Document;
use tracing::debug;

/// Extract normalised plain text for every page of a PDF, in physical order.
///
/// Returns one entry per page (1-based order preserved), each already run
/// through [`normalize_whitespace`]. A page without extractable text yields
/// an empty string — the page count invariant holds regardless of content.
///
/// # Errors
/// Returns the lopdf parse error when the bytes are not a valid PDF. The
/// orchestrator wraps it with the offending filename; callers of this
/// function only see the document-level failure, never per-page ones.
pub fn extract_pages(bytes: &[u8]) -> Result<Vec<String>, lopdf::Error> {
    let doc = Document::load_mem(bytes)?;

    // BTreeMap keyed by 1-based page number, so iteration order is
    // physical page order.
    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();

    let mut pages = Vec::with_capacity(page_numbers.len());
    for number in page_numbers {
        // Per-page extraction failures (missing fonts, empty content
        // streams) mean "no selectable text", not a corrupt document.
        let raw = doc.extract_text(&[number]).unwrap_or_default();
        let text = normalize_whitespace(&raw);
        debug!(page = number, chars = text.chars().count(), "extracted page");
        pages.push(text);
    }

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_pdf_bytes() {
        assert!(extract_pages(b"this is not a pdf at all").is_err());
    }

    #[test]
    fn rejects_empty_input() {
        assert!(extract_pages(&[]).is_err());
    }

    #[test]
    fn rejects_truncated_header() {
        // A magic number alone is not a document.
        assert!(extract_pages(b"%PDF-1.7\n").is_err());
    }
}
