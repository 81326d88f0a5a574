//! The generation seam.

use async_trait::async_trait;
use storyscribe_core::{Message, ModelId, Temperature};
use storyscribe_error::{GenerationError, GenerationResult};

/// Something that turns an assembled request into generated text.
///
/// Implementations make exactly one attempt per call.
#[async_trait]
pub trait GenerationDriver: Send + Sync {
    /// Generate text for the ordered messages.
    async fn generate(
        &self,
        messages: &[Message],
        model: ModelId,
        temperature: Temperature,
    ) -> GenerationResult<String>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;
}

#[async_trait]
impl<T: GenerationDriver + ?Sized> GenerationDriver for Box<T> {
    async fn generate(
        &self,
        messages: &[Message],
        model: ModelId,
        temperature: Temperature,
    ) -> GenerationResult<String> {
        (**self).generate(messages, model, temperature).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}

#[async_trait]
impl<T: GenerationDriver + ?Sized> GenerationDriver for std::sync::Arc<T> {
    async fn generate(
        &self,
        messages: &[Message],
        model: ModelId,
        temperature: Temperature,
    ) -> GenerationResult<String> {
        (**self).generate(messages, model, temperature).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}

/// Driver used when no endpoint is configured.
///
/// Every call fails with the error recorded at construction, typically the
/// missing-credential error from [`crate::ClientConfig::from_env`].
#[derive(Debug, Clone)]
pub struct UnavailableDriver {
    error: GenerationError,
}

impl UnavailableDriver {
    /// Create a driver that always fails with `error`.
    pub fn new(error: GenerationError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl GenerationDriver for UnavailableDriver {
    async fn generate(
        &self,
        _messages: &[Message],
        _model: ModelId,
        _temperature: Temperature,
    ) -> GenerationResult<String> {
        tracing::warn!("Generation requested without a configured endpoint");
        Err(self.error.clone())
    }

    fn provider_name(&self) -> &'static str {
        "unavailable"
    }
}
