//! The text-generation seam.
//!
//! Personas and the adjudicator never talk to a model vendor directly. They
//! hold an [`Arc<dyn TextGenerator>`] handed to them at construction, so the
//! production HTTP client and the scripted fake used in tests are
//! interchangeable.

use async_trait::async_trait;

use crate::error::Result;

/// Generate text from a single prompt.
///
/// Implementations must fail with an error instead of returning an empty or
/// garbage string when the upstream call goes wrong.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
