//! Prompt construction for the translation backend.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — changing the task wording or the
//!    placeholder text requires editing exactly one place.
//!
//! 2. **Testability** — unit tests can build and inspect prompts directly
//!    without spinning up a real backend, making prompt regressions easy
//!    to catch.

use crate::config::TranslationStyle;

/// Substitute text for a page with too little selectable content.
///
/// Emitted instead of calling the translation backend; the exact wording is
/// part of the output contract (it lands verbatim in the Word document).
pub const NO_TEXT_PLACEHOLDER: &str = "[No selectable text detected on this page.]\n\n\
If this page is a scanned image, Hebrew OCR would be required to translate it.";

/// Build the full prompt for one page.
///
/// Layout, in order: task statement (Hebrew→English, faithful, no
/// commentary, preserve paragraphs), the style label, the extra instructions
/// (or the literal marker `None` when empty), and the raw source text
/// verbatim. The source goes last so nothing trails it that the model could
/// mistake for content to translate.
pub fn build_translation_prompt(
    source: &str,
    style: TranslationStyle,
    extra_instructions: &str,
) -> String {
    let extra = if extra_instructions.trim().is_empty() {
        "None"
    } else {
        extra_instructions
    };

    format!(
        "You are a careful Hebrew-to-English translator.\n\
         Translate the text accurately. Do not add commentary.\n\
         Preserve paragraph structure.\n\
         \n\
         Target style: {style}\n\
         Extra instructions: {extra}\n\
         \n\
         HEBREW TEXT:\n\
         {source}",
        style = style.label(),
    )
}
