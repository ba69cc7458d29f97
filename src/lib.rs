//! # heb2docx
//!
//! Translate Hebrew PDF documents, page by page, into a single English Word
//! document.
//!
//! ## Why this crate?
//!
//! Translating a scanned-in-parts Hebrew sefer or report by copy-pasting
//! pages into a chat window loses page boundaries and produces one long
//! undifferentiated blob. This crate keeps the document's shape: every input
//! file becomes a section, every page becomes a labelled subsection, and the
//! result is one `.docx` a reviewer can navigate side by side with the
//! original.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDFs
//!  │
//!  ├─ 1. Extract    per-page plain text via lopdf (no OCR)
//!  ├─ 2. Normalize  line endings, whitespace, blank-line runs
//!  ├─ 3. Translate  one LLM call per page (placeholder below threshold)
//!  ├─ 4. Assemble   headings + paragraphs + page breaks → .docx
//!  └─ 5. Output     single Word document, file order preserved
//! ```
//!
//! Pages with fewer than 10 characters of selectable text (scanned images)
//! are not sent to the backend at all; a fixed placeholder notes that OCR
//! would be required.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use heb2docx::{convert, SourceFile, TranslationConfig, TranslationStyle};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // API key read from OPENAI_API_KEY
//!     let config = TranslationConfig::builder()
//!         .style(TranslationStyle::Clear)
//!         .build()?;
//!     let files = vec![SourceFile::from_path("maamar.pdf")?];
//!     let output = convert(&files, &config).await?;
//!     std::fs::write("translation.docx", &output.docx)?;
//!     eprintln!(
//!         "{} pages translated, {} placeholders",
//!         output.stats.translated_pages, output.stats.placeholder_pages
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `heb2docx` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! heb2docx = { version = "0.3", default-features = false }
//! ```
//!
//! ## Testing without the network
//!
//! The backend sits behind [`providers::TranslationProvider`]; inject a
//! [`providers::MockProvider`] via
//! [`config::TranslationConfigBuilder::provider`] and the whole pipeline
//! runs deterministically offline.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod providers;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{TranslationConfig, TranslationConfigBuilder, TranslationStyle};
pub use convert::{convert, convert_sync, convert_to_file};
pub use error::{PipelineError, TranslationError};
pub use output::{
    RunOutput, RunStats, SourceFile, TranslatedFile, TranslatedPage, DEFAULT_OUTPUT_NAME,
    DOCX_MIME_TYPE,
};
pub use progress::{NoopProgress, ProgressCallback, SharedProgressCallback};
pub use providers::{MockProvider, OpenAiProvider, TranslationProvider};
