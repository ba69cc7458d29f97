//! Error types for the heb2docx library.
//!
//! Two distinct error types reflect two distinct layers:
//!
//! * [`PipelineError`] — **Fatal**: the run cannot produce a document
//!   (missing credential, corrupt PDF, a page whose translation failed for
//!   good). Returned as `Err(PipelineError)` from the top-level `convert*`
//!   functions. Every variant that concerns a specific input carries enough
//!   context (file name, page number) for the caller to report it.
//!
//! * [`TranslationError`] — what the remote translation backend did wrong
//!   (network, auth, rate limit, garbage response). Produced by
//!   [`crate::providers::TranslationProvider`] implementations and wrapped
//!   into [`PipelineError::TranslationFailed`] once retries are exhausted.
//!
//! There is deliberately no partial-success mode: one bad page aborts the
//! whole run and no document is emitted. Pages with *no* text are not errors
//! at all — they get placeholder text and the run continues.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the heb2docx library.
#[derive(Debug, Error)]
pub enum PipelineError {
    // ── Configuration errors (surfaced before any processing) ────────────
    /// No API key was found in the config or the environment.
    #[error(
        "No translation API key configured.\n\
         Set OPENAI_API_KEY in the environment or pass a key via TranslationConfig."
    )]
    MissingApiKey,

    /// A style selector that is not one of the four fixed labels.
    #[error(
        "Unknown translation style '{given}'.\n\
         Expected one of: clear, literal, warm, academic (or the full label)."
    )]
    UnknownStyle { given: String },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── PDF errors ────────────────────────────────────────────────────────
    /// The uploaded bytes are not a parseable PDF.
    #[error("'{file}' is not a valid PDF: {detail}")]
    InvalidPdf { file: String, detail: String },

    // ── Translation errors ────────────────────────────────────────────────
    /// The remote translation call failed for one page after all retries.
    #[error("Translation failed for page {page} of '{file}': {source}")]
    TranslationFailed {
        file: String,
        page: usize,
        #[source]
        source: TranslationError,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// docx serialisation failed. Structured input makes this a bug, not a
    /// user-recoverable condition, but it still surfaces cleanly.
    #[error("Failed to serialise the output document: {detail}")]
    DocxBuild { detail: String },

    /// Could not create or write the output .docx file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors produced by a [`crate::providers::TranslationProvider`] call.
///
/// [`TranslationError::is_transient`] decides whether the retry loop in
/// [`crate::pipeline::translate`] should try again: overload and network
/// blips are retried with backoff, authentication and client errors are not.
#[derive(Debug, Clone, Error)]
pub enum TranslationError {
    /// The request never reached the backend (DNS, connect, TLS, reset).
    #[error("Network error calling {provider}: {detail}")]
    Network { provider: String, detail: String },

    /// The backend did not answer within the configured per-call timeout.
    #[error("Request to {provider} timed out after {secs}s")]
    Timeout { provider: String, secs: u64 },

    /// HTTP 401/403 — wrong or revoked API key. Never retried.
    #[error("Authentication rejected by {provider}: {detail}")]
    Auth { provider: String, detail: String },

    /// HTTP 429 — caller should back off. `retry_after_secs` is the
    /// server-specified delay when the `Retry-After` header was present.
    #[error("Rate limit exceeded for {provider}")]
    RateLimited {
        provider: String,
        retry_after_secs: Option<u64>,
    },

    /// Any other non-success HTTP status.
    #[error("{provider} API error ({status}): {message}")]
    Api {
        provider: String,
        status: u16,
        message: String,
    },

    /// The backend returned 200 but the body did not parse.
    #[error("Malformed response from {provider}: {detail}")]
    MalformedResponse { provider: String, detail: String },
}

impl TranslationError {
    /// Whether the retry loop should attempt this call again.
    ///
    /// Server overload (429, 5xx) and network failures are transient;
    /// authentication failures and 4xx client errors are permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            TranslationError::Network { .. }
            | TranslationError::Timeout { .. }
            | TranslationError::RateLimited { .. } => true,
            TranslationError::Api { status, .. } => *status >= 500,
            TranslationError::Auth { .. } | TranslationError::MalformedResponse { .. } => false,
        }
    }
}
