//! Deterministic translation backend for tests and offline runs.
//!
//! The real backend is non-deterministic and network-bound, so every test
//! that exercises the pipeline injects a [`MockProvider`] instead. It
//! scripts responses in order, records each prompt it receives, counts
//! calls, and can be told to fail on a specific call — enough to assert
//! both the happy path and the abort-on-failure semantics without a single
//! network round trip.

use crate::error::TranslationError;
use crate::providers::TranslationProvider;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Scripted [`TranslationProvider`] for tests.
///
/// Responses are served in the order given; once the script runs out, every
/// further call answers with a fixed fallback. Interior mutability keeps the
/// public API identical to the real provider (shared receiver behind `Arc`).
pub struct MockProvider {
    responses: Mutex<VecDeque<String>>,
    fallback: String,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
    /// 1-based call number that fails, with the error to return.
    fail_on_call: Option<(usize, TranslationError)>,
}

impl MockProvider {
    /// A provider that always answers with `fallback`.
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            fallback: fallback.into(),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            fail_on_call: None,
        }
    }

    /// A provider that answers with `responses` in order, then the empty
    /// string.
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            fallback: String::new(),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            fail_on_call: None,
        }
    }

    /// Fail the `call` -th translate call (1-based) with `error`.
    ///
    /// Calls before and after the failing one still answer normally, which
    /// lets tests verify that a mid-run failure aborts the whole run.
    pub fn fail_on_call(mut self, call: usize, error: TranslationError) -> Self {
        self.fail_on_call = Some((call, error));
        self
    }

    /// Number of translate calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Copies of every prompt received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log poisoned").clone()
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    async fn translate(&self, prompt: &str) -> Result<String, TranslationError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push(prompt.to_string());

        // The failing call still consumes its scripted slot, so the
        // remaining script stays aligned with later calls.
        let scripted = self
            .responses
            .lock()
            .expect("response script poisoned")
            .pop_front();

        if let Some((failing_call, ref error)) = self.fail_on_call {
            if call == failing_call {
                return Err(error.clone());
            }
        }

        Ok(scripted.unwrap_or_else(|| self.fallback.clone()))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_scripted_responses_in_order() {
        let provider = MockProvider::with_responses(["A", "B"]);
        assert_eq!(provider.translate("p1").await.unwrap(), "A");
        assert_eq!(provider.translate("p2").await.unwrap(), "B");
        // Script exhausted: fallback (empty) from here on.
        assert_eq!(provider.translate("p3").await.unwrap(), "");
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn records_prompts() {
        let provider = MockProvider::new("ok");
        provider.translate("first prompt").await.unwrap();
        provider.translate("second prompt").await.unwrap();
        assert_eq!(provider.prompts(), vec!["first prompt", "second prompt"]);
    }

    #[tokio::test]
    async fn fails_only_on_the_scripted_call() {
        let provider = MockProvider::with_responses(["A", "B", "C"]).fail_on_call(
            2,
            TranslationError::Api {
                provider: "mock".into(),
                status: 500,
                message: "scripted failure".into(),
            },
        );

        assert_eq!(provider.translate("p1").await.unwrap(), "A");
        assert!(provider.translate("p2").await.is_err());
        // The script is consumed even by the failing call's slot.
        assert_eq!(provider.translate("p3").await.unwrap(), "C");
    }
}
