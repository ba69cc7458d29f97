//! Translation backends.
//!
//! The remote translation service is non-deterministic and
//! network-dependent, so the pipeline only ever talks to it through the
//! [`TranslationProvider`] trait. Production runs use
//! [`openai::OpenAiProvider`]; tests inject [`mock::MockProvider`] and the
//! pipeline never touches the network.

use crate::error::TranslationError;
use async_trait::async_trait;

pub mod mock;
pub mod openai;

pub use mock::MockProvider;
pub use openai::OpenAiProvider;

/// An opaque text-translation capability.
///
/// Implementations receive the fully built prompt (task statement, style,
/// instructions, source text) and return the translated text. They must be
/// `Send + Sync`; a provider is shared across all pages of a run behind an
/// `Arc`.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Send one prompt and return the backend's response text, untrimmed.
    ///
    /// A backend that answers successfully but produces no text returns
    /// `Ok(String::new())` — an empty translation is not an error.
    async fn translate(&self, prompt: &str) -> Result<String, TranslationError>;

    /// Short provider name for logs and error messages.
    fn name(&self) -> &str;
}
