//! Input and output types for a translation run.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// MIME type of the produced document.
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Default output filename.
pub const DEFAULT_OUTPUT_NAME: &str = "translation.docx";

/// One uploaded PDF: a display name plus the raw bytes.
///
/// The name is not required to be unique; it becomes the level-1 heading of
/// the file's section in the output document. Bytes are read once during
/// extraction and never persisted.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a PDF from disk, using the file name as the display name.
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            name,
            bytes: std::fs::read(path)?,
        })
    }
}

/// One translated page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatedPage {
    /// 1-based page number within its file.
    pub page_num: usize,
    /// Heading text, `"Page {n}"`.
    pub label: String,
    /// Translated text, or the fixed placeholder.
    pub text: String,
    /// True when the placeholder was substituted without a backend call.
    pub placeholder: bool,
    /// Retries spent on this page's backend call.
    pub retries: u32,
}

/// All translated pages of one source file, in page order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatedFile {
    /// Display name of the source file (section heading).
    pub name: String,
    pub pages: Vec<TranslatedPage>,
}

/// Statistics about a completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStats {
    /// Number of input files.
    pub total_files: usize,
    /// Total pages across all files.
    pub total_pages: usize,
    /// Pages translated through the backend.
    pub translated_pages: usize,
    /// Pages that received placeholder text instead.
    pub placeholder_pages: usize,
    /// Wall-clock duration of the whole run in milliseconds.
    pub total_duration_ms: u64,
    /// Time spent extracting PDF text.
    pub extract_duration_ms: u64,
    /// Time spent in translation calls (including backoff waits).
    pub translate_duration_ms: u64,
}

/// The result of a successful run.
///
/// `docx` is the serialised Word document; `files` is the intermediate
/// per-file, per-page structure for callers that want the text without
/// parsing the document back out of its zip container.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// The serialised .docx, ready to write or send (see [`DOCX_MIME_TYPE`]).
    pub docx: Vec<u8>,
    pub files: Vec<TranslatedFile>,
    pub stats: RunStats,
}
