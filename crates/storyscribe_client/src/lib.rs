//! Chat-completion client for Storyscribe.
//!
//! This crate provides the [`GenerationDriver`] seam the session workflow calls
//! through, and [`OpenAiClient`], an implementation that talks to an
//! OpenAI-compatible `/chat/completions` endpoint.
//!
//! # Features
//!
//! - **Single attempt**: one POST per generation, no retries
//! - **Classified failures**: network, authentication, rate limit, malformed
//!   response and other API errors are distinct [`GenerationErrorKind`]s
//! - **Request/Response Types**: the subset of the chat completion API in use
//!
//! # Example
//!
//! ```rust,no_run
//! use storyscribe_client::{ClientConfig, GenerationDriver, OpenAiClient};
//! use storyscribe_core::{Message, ModelId, Temperature};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenAiClient::new(ClientConfig::from_env()?);
//!
//!     let messages = vec![
//!         Message::system("You are an expert scriptwriter for audio stories."),
//!         Message::user("Brief summary of the story: A lighthouse keeper hears a knock."),
//!     ];
//!     let script = client
//!         .generate(&messages, ModelId::Gpt4oMini, Temperature::default())
//!         .await?;
//!     println!("{}", script);
//!
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod driver;
mod request;
mod response;

pub use client::OpenAiClient;
pub use config::{API_KEY_VAR, BASE_URL_VAR, ClientConfig, DEFAULT_BASE_URL};
pub use driver::{GenerationDriver, UnavailableDriver};
pub use request::{ChatCompletionRequest, ChatCompletionRequestBuilder, ChatMessage};
pub use response::{ApiErrorBody, ApiErrorDetail, ChatCompletionResponse, Choice, ChoiceMessage, Usage};
pub use storyscribe_error::{GenerationError, GenerationErrorKind, GenerationResult};
