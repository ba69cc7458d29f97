//! Per-page translation: threshold check, prompt, backend call, retry.
//!
//! This stage is intentionally thin — all prompt wording lives in
//! [`crate::prompts`] so it can change without touching the retry or
//! error-handling logic here.
//!
//! ## Retry Strategy
//!
//! HTTP 429 / 5xx answers from hosted LLM APIs are transient and frequent.
//! Exponential backoff (`retry_backoff_ms * 2^(attempt-1)`, capped at one
//! minute) avoids hammering a recovering endpoint: with the 500 ms default
//! and 3 retries the wait sequence is 500 ms → 1 s → 2 s. Permanent errors
//! (bad key, 400) are surfaced on the first attempt.

use crate::config::TranslationConfig;
use crate::error::TranslationError;
use crate::prompts::{build_translation_prompt, NO_TEXT_PLACEHOLDER};
use crate::providers::TranslationProvider;
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tracing::{debug, warn};

/// Minimum stripped character count before a page is worth translating.
///
/// Below this the page is almost certainly a scanned image or decoration;
/// calling the backend would cost money and return nonsense, so the fixed
/// placeholder is substituted instead.
pub const MIN_TRANSLATABLE_CHARS: usize = 10;

/// Ceiling on a single backoff wait.
///
/// Keeps the exponential schedule finite for large `max_retries` and makes
/// the `base * 2^(attempt-1)` arithmetic safe from overflow.
const MAX_BACKOFF_MS: u64 = 60_000;

/// Backoff before retry `attempt` (1-based): `base * 2^(attempt-1)`,
/// saturating, capped at [`MAX_BACKOFF_MS`].
fn backoff_delay_ms(base_ms: u64, attempt: u32) -> u64 {
    2u64.saturating_pow(attempt.saturating_sub(1))
        .saturating_mul(base_ms)
        .min(MAX_BACKOFF_MS)
}

/// Outcome of translating one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTranslation {
    /// Translated text, whitespace-trimmed; or the placeholder.
    pub text: String,
    /// True when the placeholder was substituted and no call was made.
    pub placeholder: bool,
    /// Retries spent before the backend answered (0 on first success).
    pub retries: u32,
}

/// Translate one page's normalised text.
///
/// Pages below [`MIN_TRANSLATABLE_CHARS`] get [`NO_TEXT_PLACEHOLDER`]
/// without any backend call. Otherwise the prompt is built from the config's
/// style and extra instructions and sent through the provider, retrying
/// transient failures with exponential backoff.
///
/// # Errors
/// The last [`TranslationError`] once retries are exhausted, or immediately
/// for permanent errors. The orchestrator wraps it with file and page
/// context; no placeholder is substituted for a failed call.
pub async fn translate_page(
    provider: &Arc<dyn TranslationProvider>,
    page_text: &str,
    config: &TranslationConfig,
) -> Result<PageTranslation, TranslationError> {
    if page_text.trim().chars().count() < MIN_TRANSLATABLE_CHARS {
        debug!("page below translation threshold, substituting placeholder");
        return Ok(PageTranslation {
            text: NO_TEXT_PLACEHOLDER.to_string(),
            placeholder: true,
            retries: 0,
        });
    }

    let prompt = build_translation_prompt(page_text, config.style, &config.extra_instructions);

    let mut attempt = 0u32;
    loop {
        if attempt > 0 {
            let backoff = backoff_delay_ms(config.retry_backoff_ms, attempt);
            warn!(attempt, max = config.max_retries, backoff_ms = backoff, "retrying translation");
            sleep(Duration::from_millis(backoff)).await;
        }

        match provider.translate(&prompt).await {
            Ok(response) => {
                return Ok(PageTranslation {
                    text: response.trim().to_string(),
                    placeholder: false,
                    retries: attempt,
                });
            }
            Err(e) if e.is_transient() && attempt < config.max_retries => {
                warn!(attempt = attempt + 1, error = %e, "transient translation failure");
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MockProvider;

    fn test_config() -> TranslationConfig {
        // 1 ms backoff keeps the retry tests fast.
        TranslationConfig::builder()
            .retry_backoff_ms(1)
            .build()
            .unwrap()
    }

    fn as_provider(mock: MockProvider) -> (Arc<MockProvider>, Arc<dyn TranslationProvider>) {
        let mock = Arc::new(mock);
        let provider: Arc<dyn TranslationProvider> = mock.clone();
        (mock, provider)
    }

    #[test]
    fn backoff_doubles_from_the_base() {
        assert_eq!(backoff_delay_ms(500, 1), 500);
        assert_eq!(backoff_delay_ms(500, 2), 1_000);
        assert_eq!(backoff_delay_ms(500, 3), 2_000);
    }

    #[test]
    fn backoff_is_capped_and_never_overflows() {
        // Attempt counts far past any sane retry budget stay at the cap.
        assert_eq!(backoff_delay_ms(500, 64), MAX_BACKOFF_MS);
        assert_eq!(backoff_delay_ms(500, u32::MAX), MAX_BACKOFF_MS);
        assert_eq!(backoff_delay_ms(u64::MAX, 2), MAX_BACKOFF_MS);
    }

    #[tokio::test]
    async fn short_page_gets_placeholder_without_backend_call() {
        let (mock, provider) = as_provider(MockProvider::new("should not be used"));

        let result = translate_page(&provider, "קצר", &test_config())
            .await
            .unwrap();

        assert!(result.placeholder);
        assert_eq!(result.text, NO_TEXT_PLACEHOLDER);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn whitespace_only_page_gets_placeholder() {
        let (mock, provider) = as_provider(MockProvider::new("unused"));
        let result = translate_page(&provider, "   \n\n  ", &test_config())
            .await
            .unwrap();
        assert!(result.placeholder);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn sufficient_page_is_sent_with_source_and_style() {
        let (mock, provider) = as_provider(MockProvider::new("  Translated.  "));
        let source = "זהו עמוד עם מספיק טקסט עברי לתרגום.";

        let result = translate_page(&provider, source, &test_config())
            .await
            .unwrap();

        assert!(!result.placeholder);
        assert_eq!(result.text, "Translated.");
        assert_eq!(mock.call_count(), 1);

        let prompts = mock.prompts();
        assert!(prompts[0].contains(source));
        assert!(prompts[0].contains("Clear and straightforward"));
    }

    #[tokio::test]
    async fn empty_backend_response_is_not_an_error() {
        let (_, provider) = as_provider(MockProvider::new(""));
        let result = translate_page(&provider, "טקסט ארוך מספיק לתרגום", &test_config())
            .await
            .unwrap();
        assert_eq!(result.text, "");
        assert!(!result.placeholder);
    }

    #[tokio::test]
    async fn transient_failure_is_retried() {
        let mock = MockProvider::with_responses(["ignored", "Recovered"]).fail_on_call(
            1,
            TranslationError::RateLimited {
                provider: "mock".into(),
                retry_after_secs: None,
            },
        );
        let (mock, provider) = as_provider(mock);

        let result = translate_page(&provider, "טקסט ארוך מספיק לתרגום", &test_config())
            .await
            .unwrap();

        assert_eq!(result.text, "Recovered");
        assert_eq!(result.retries, 1);
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn permanent_failure_is_not_retried() {
        let mock = MockProvider::new("unused").fail_on_call(
            1,
            TranslationError::Auth {
                provider: "mock".into(),
                detail: "bad key".into(),
            },
        );
        let (mock, provider) = as_provider(mock);

        let err = translate_page(&provider, "טקסט ארוך מספיק לתרגום", &test_config())
            .await
            .unwrap_err();

        assert!(matches!(err, TranslationError::Auth { .. }));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn retries_are_bounded() {
        // Every call fails with a transient error; with max_retries = 2 the
        // provider is tried 3 times in total and the last error surfaces.
        struct AlwaysOverloaded;

        #[async_trait::async_trait]
        impl TranslationProvider for AlwaysOverloaded {
            async fn translate(&self, _prompt: &str) -> Result<String, TranslationError> {
                Err(TranslationError::Api {
                    provider: "mock".into(),
                    status: 503,
                    message: "overloaded".into(),
                })
            }
            fn name(&self) -> &str {
                "always-overloaded"
            }
        }

        let provider: Arc<dyn TranslationProvider> = Arc::new(AlwaysOverloaded);
        let config = TranslationConfig::builder()
            .max_retries(2)
            .retry_backoff_ms(1)
            .build()
            .unwrap();

        let err = translate_page(&provider, "טקסט ארוך מספיק לתרגום", &config)
            .await
            .unwrap_err();
        assert!(matches!(err, TranslationError::Api { status: 503, .. }));
    }
}
