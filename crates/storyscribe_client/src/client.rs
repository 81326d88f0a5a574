use crate::{
    ApiErrorBody, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ClientConfig,
    GenerationDriver,
};
use reqwest::StatusCode;
use storyscribe_core::{Message, ModelId, Temperature};
use storyscribe_error::{GenerationError, GenerationErrorKind, GenerationResult};
use tracing::instrument;

/// Client for an OpenAI-compatible chat completions endpoint
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a new client
    #[instrument(skip(config), fields(base_url = %config.base_url))]
    pub fn new(config: ClientConfig) -> Self {
        tracing::debug!("Creating chat completion client");
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a chat completion request
    ///
    /// # Errors
    ///
    /// Returns a classified [`GenerationError`] for transport failures and
    /// non-success statuses, or `MalformedResponse` when the body does not decode.
    #[instrument(skip(self, request), fields(model = %request.model, messages = request.messages.len()))]
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> GenerationResult<ChatCompletionResponse> {
        let url = self.config.completions_url();
        tracing::debug!("Sending chat completion request to {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Request failed: {}", e);
                GenerationError::new(GenerationErrorKind::Network(format!(
                    "Request failed: {}",
                    e
                )))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            GenerationError::new(GenerationErrorKind::Network(format!(
                "Failed to read response body: {}",
                e
            )))
        })?;

        if !status.is_success() {
            let kind = classify_failure(status, &body);
            tracing::error!(status = status.as_u16(), "Endpoint returned error: {}", kind);
            return Err(GenerationError::new(kind));
        }

        let result = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse response: {}", e);
            GenerationError::new(GenerationErrorKind::MalformedResponse(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        tracing::debug!("Chat completion successful");
        Ok(result)
    }
}

/// Map a non-success status and its body to an error kind
pub(crate) fn classify_failure(status: StatusCode, body: &str) -> GenerationErrorKind {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            GenerationErrorKind::Authentication(message)
        }
        StatusCode::TOO_MANY_REQUESTS => GenerationErrorKind::RateLimit(message),
        _ => GenerationErrorKind::Api {
            status: status.as_u16(),
            message,
        },
    }
}

#[async_trait::async_trait]
impl GenerationDriver for OpenAiClient {
    #[instrument(skip(self, messages), fields(model = %model, temperature = %temperature))]
    async fn generate(
        &self,
        messages: &[Message],
        model: ModelId,
        temperature: Temperature,
    ) -> GenerationResult<String> {
        let request = ChatCompletionRequest {
            model: model.as_static().to_string(),
            messages: messages.iter().map(ChatMessage::from).collect(),
            temperature: temperature.value(),
        };

        let response = self.chat_completion(&request).await?;

        if let Some(usage) = &response.usage {
            tracing::info!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Generation complete"
            );
        }

        response.first_content().map(str::to_string).ok_or_else(|| {
            tracing::error!(choices = response.choices.len(), "Response has no generated text");
            GenerationError::new(GenerationErrorKind::MalformedResponse(
                "Response contained no generated text".to_string(),
            ))
        })
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
