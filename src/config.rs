//! Configuration types for a translation run.
//!
//! All run behaviour is controlled through [`TranslationConfig`], built via
//! its [`TranslationConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share a config across a run, log it, and diff two runs to
//! understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! A ten-field constructor is unreadable and breaks on every new field. The
//! builder lets callers set only what they care about and rely on documented
//! defaults for the rest.

use crate::error::PipelineError;
use crate::progress::ProgressCallback;
use crate::providers::TranslationProvider;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Configuration for one PDF-to-Word translation run.
///
/// Built via [`TranslationConfig::builder()`] or
/// [`TranslationConfig::default()`].
///
/// # Example
/// ```rust
/// use heb2docx::{TranslationConfig, TranslationStyle};
///
/// let config = TranslationConfig::builder()
///     .style(TranslationStyle::Academic)
///     .extra_instructions("Keep transliterated names as-is.")
///     .max_retries(2)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct TranslationConfig {
    /// Target English style, one of four fixed labels. Default: [`TranslationStyle::Clear`].
    ///
    /// The label is injected verbatim into the translation prompt, so the set
    /// is closed — free-form tone requests belong in `extra_instructions`.
    pub style: TranslationStyle,

    /// Free-form instructions appended to every page's prompt. Default: empty.
    ///
    /// An empty string is sent as the literal marker `None` so the model
    /// never sees a dangling "Extra instructions:" line.
    pub extra_instructions: String,

    /// Chat model identifier. Default: "gpt-4.1-mini".
    ///
    /// Hebrew translation does not need a frontier model; the mini tier is
    /// accurate for prose and an order of magnitude cheaper per page.
    pub model: String,

    /// API key for the hosted translation backend.
    ///
    /// If `None`, the orchestrator falls back to the `OPENAI_API_KEY`
    /// environment variable; if that is also absent the run fails with
    /// [`PipelineError::MissingApiKey`] before any PDF is opened.
    pub api_key: Option<String>,

    /// Override for the backend base URL (proxies, compatible endpoints).
    /// `None` means the provider's public API.
    pub endpoint: Option<String>,

    /// Pre-constructed provider. Takes precedence over `api_key`/`model`.
    ///
    /// This is the substitution point for tests: inject a deterministic
    /// [`crate::providers::MockProvider`] and the pipeline never touches the
    /// network.
    pub provider: Option<Arc<dyn TranslationProvider>>,

    /// Maximum retry attempts on a transient backend failure. Default: 3.
    ///
    /// Most 5xx and timeout errors are momentary. Permanent errors (bad API
    /// key, 400) are not retried — they abort the run immediately.
    pub max_retries: u32,

    /// Initial retry delay in milliseconds (exponential backoff). Default: 500.
    ///
    /// Doubles after each attempt: 500 ms → 1 s → 2 s.
    pub retry_backoff_ms: u64,

    /// Per-call HTTP timeout in seconds. Default: 120.
    ///
    /// A dense Hebrew page can take the model well over a minute to
    /// translate; shorter timeouts produce spurious transient failures.
    pub api_timeout_secs: u64,

    /// Progress observer, invoked after each page completes. Default: none.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            style: TranslationStyle::Clear,
            extra_instructions: String::new(),
            model: "gpt-4.1-mini".to_string(),
            api_key: None,
            endpoint: None,
            provider: None,
            max_retries: 3,
            retry_backoff_ms: 500,
            api_timeout_secs: 120,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for TranslationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationConfig")
            .field("style", &self.style)
            .field("extra_instructions", &self.extra_instructions)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("provider", &self.provider.as_ref().map(|_| "<dyn TranslationProvider>"))
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_ms", &self.retry_backoff_ms)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .finish()
    }
}

impl TranslationConfig {
    /// Create a new builder for `TranslationConfig`.
    pub fn builder() -> TranslationConfigBuilder {
        TranslationConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`TranslationConfig`].
#[derive(Debug)]
pub struct TranslationConfigBuilder {
    config: TranslationConfig,
}

impl TranslationConfigBuilder {
    pub fn style(mut self, style: TranslationStyle) -> Self {
        self.config.style = style;
        self
    }

    pub fn extra_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.config.extra_instructions = instructions.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = Some(url.into());
        self
    }

    pub fn provider(mut self, provider: Arc<dyn TranslationProvider>) -> Self {
        self.config.provider = Some(provider);
        self
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.config.max_retries = n;
        self
    }

    pub fn retry_backoff_ms(mut self, ms: u64) -> Self {
        self.config.retry_backoff_ms = ms.max(1);
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs.max(1);
        self
    }

    pub fn progress_callback(mut self, cb: Arc<dyn ProgressCallback>) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<TranslationConfig, PipelineError> {
        let c = &self.config;
        if c.model.trim().is_empty() {
            return Err(PipelineError::InvalidConfig(
                "Model identifier must not be empty".into(),
            ));
        }
        if c.api_timeout_secs == 0 {
            return Err(PipelineError::InvalidConfig(
                "API timeout must be ≥ 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Target English style, applied uniformly to every page in a run.
///
/// The set is fixed at four labels; the label text is part of the prompt
/// contract and must not drift. Any other selector is a configuration error,
/// not a fallback to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TranslationStyle {
    /// "Clear and straightforward" (default).
    #[default]
    Clear,
    /// "More literal / closer to Hebrew".
    Literal,
    /// "Warm tone (still accurate)".
    Warm,
    /// "Academic / formal".
    Academic,
}

impl TranslationStyle {
    /// All four styles, in menu order.
    pub const ALL: [TranslationStyle; 4] = [
        TranslationStyle::Clear,
        TranslationStyle::Literal,
        TranslationStyle::Warm,
        TranslationStyle::Academic,
    ];

    /// The exact label injected into the translation prompt.
    pub fn label(&self) -> &'static str {
        match self {
            TranslationStyle::Clear => "Clear and straightforward",
            TranslationStyle::Literal => "More literal / closer to Hebrew",
            TranslationStyle::Warm => "Warm tone (still accurate)",
            TranslationStyle::Academic => "Academic / formal",
        }
    }

    /// Short identifier used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            TranslationStyle::Clear => "clear",
            TranslationStyle::Literal => "literal",
            TranslationStyle::Warm => "warm",
            TranslationStyle::Academic => "academic",
        }
    }
}

impl fmt::Display for TranslationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TranslationStyle {
    type Err = PipelineError;

    /// Accepts both the short CLI name and the full label, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        for style in TranslationStyle::ALL {
            if wanted == style.name() || wanted == style.label().to_lowercase() {
                return Ok(style);
            }
        }
        Err(PipelineError::UnknownStyle {
            given: s.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = TranslationConfig::default();
        assert_eq!(config.style, TranslationStyle::Clear);
        assert_eq!(config.model, "gpt-4.1-mini");
        assert_eq!(config.max_retries, 3);
        assert!(config.provider.is_none());
    }

    #[test]
    fn builder_validates_empty_model() {
        let result = TranslationConfig::builder().model("  ").build();
        assert!(matches!(result, Err(PipelineError::InvalidConfig(_))));
    }

    #[test]
    fn style_parses_short_names_and_labels() {
        assert_eq!(
            "academic".parse::<TranslationStyle>().unwrap(),
            TranslationStyle::Academic
        );
        assert_eq!(
            "Clear and straightforward"
                .parse::<TranslationStyle>()
                .unwrap(),
            TranslationStyle::Clear
        );
        assert_eq!(
            "WARM".parse::<TranslationStyle>().unwrap(),
            TranslationStyle::Warm
        );
    }

    #[test]
    fn unknown_style_is_a_configuration_error() {
        let err = "poetic".parse::<TranslationStyle>().unwrap_err();
        assert!(matches!(
            err,
            PipelineError::UnknownStyle { ref given } if given == "poetic"
        ));
    }

    #[test]
    fn labels_are_exact() {
        assert_eq!(
            TranslationStyle::Literal.label(),
            "More literal / closer to Hebrew"
        );
        assert_eq!(TranslationStyle::Warm.label(), "Warm tone (still accurate)");
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = TranslationConfig::builder()
            .api_key("sk-secret")
            .build()
            .unwrap();
        let dump = format!("{config:?}");
        assert!(!dump.contains("sk-secret"));
        assert!(dump.contains("redacted"));
    }
}
