//! Storyscribe - audio-story script drafting
//!
//! Storyscribe helps a single writer draft and iteratively refine scripts for
//! audio stories with a chat-completion model. A script has a short brief; each
//! request produces a new numbered version, optionally feeding earlier versions
//! back in as context. Token usage and cost are estimated before anything is
//! sent, and all data lives in local JSON files.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use storyscribe::{GenerationRequest, StoryscribeConfig, open_workshop};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StoryscribeConfig::load()?;
//!     let workshop = open_workshop(&config)?;
//!
//!     let mut session = workshop.start().await?;
//!     workshop
//!         .create_script(&mut session, Some("Night Train".into()), Some("A conductor vanishes.".into()))
//!         .await?;
//!
//!     let version = workshop
//!         .generate(&mut session, &GenerationRequest::new("Write the opening scene."))
//!         .await?;
//!     println!("{}", version.content.unwrap_or_default());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Storyscribe is organized as a workspace with focused crates:
//!
//! - `storyscribe_error` - Error types
//! - `storyscribe_core` - Scripts, versions, context assembly, token and cost estimation
//! - `storyscribe_config` - Layered TOML configuration and the model catalog
//! - `storyscribe_storage` - JSON file persistence
//! - `storyscribe_client` - Chat completion client
//! - `storyscribe_session` - The drafting workflow
//!
//! This crate re-exports everything for convenience and adds the HTTP API
//! ([`api`]) and logging setup ([`telemetry`]) used by the `storyscribe` binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod telemetry;

pub use storyscribe_client::*;
pub use storyscribe_config::*;
pub use storyscribe_core::*;
pub use storyscribe_error::*;
pub use storyscribe_session::*;
pub use storyscribe_storage::*;

use std::sync::Arc;
use tracing::warn;

/// Workshop over type-erased collaborators, as used by the binary and the HTTP API.
pub type SharedWorkshop = Workshop<Arc<dyn VersionStore>, Arc<dyn GenerationDriver>>;

/// Open a workshop over the configured data directory and endpoint.
///
/// The API key comes from `OPENAI_API_KEY`. `OPENAI_BASE_URL` overrides the
/// configured `endpoint.base_url`. Without a key the workshop still opens;
/// only generation fails, with an authentication error.
///
/// # Errors
///
/// Returns a storage error if the data directory cannot be created, or a
/// configuration error if the catalog is invalid.
pub fn open_workshop(config: &StoryscribeConfig) -> StoryscribeResult<SharedWorkshop> {
    let store: Arc<dyn VersionStore> = Arc::new(FileSystemStore::new(&config.app.data_dir)?);

    let driver: Arc<dyn GenerationDriver> = match ClientConfig::from_env() {
        Ok(client_config) => {
            let base_url = std::env::var(BASE_URL_VAR)
                .ok()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| config.endpoint.base_url.clone());
            Arc::new(OpenAiClient::new(client_config.with_base_url(base_url)))
        }
        Err(e) => {
            warn!(error = %e, "Generation endpoint unavailable");
            Arc::new(UnavailableDriver::new(e))
        }
    };

    Workshop::new(config, store, driver)
}
