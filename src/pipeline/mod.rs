//! Pipeline stages for PDF-to-Word translation.
//!
//! Each submodule implements exactly one transformation step. Keeping
//! stages separate makes each independently testable and lets us swap an
//! implementation (e.g. a different extraction backend) without touching
//! the other stages.
//!
//! ## Data Flow
//!
//! ```text
//! bytes ──▶ extract ──▶ normalize ──▶ translate ──▶ assemble
//! (PDF)     (lopdf)     (whitespace)  (LLM, retry)  (docx)
//! ```
//!
//! 1. [`extract`]   — per-page plain text from raw PDF bytes, page order
//!    preserved
//! 2. [`normalize`] — canonical line endings, collapsed whitespace, bounded
//!    blank-line runs
//! 3. [`translate`] — threshold check, prompt build, backend call with
//!    retry/backoff; the only stage with network I/O
//! 4. [`assemble`]  — headings, paragraphs, and page breaks serialised into
//!    a single .docx

pub mod assemble;
pub mod extract;
pub mod normalize;
pub mod translate;
