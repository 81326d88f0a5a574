//! Drafting workflow for Storyscribe.
//!
//! A [`Session`] holds everything one user is looking at: the script list, the
//! open script and its versions, which versions are selected as context, and
//! the request settings. A [`Workshop`] owns the collaborators (catalog, store,
//! generation driver) and every user action is a `Workshop` method that takes
//! the session explicitly.
//!
//! ```rust,no_run
//! use storyscribe_client::{ClientConfig, OpenAiClient};
//! use storyscribe_config::StoryscribeConfig;
//! use storyscribe_session::{GenerationRequest, Workshop};
//! use storyscribe_storage::FileSystemStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StoryscribeConfig::load()?;
//! let store = FileSystemStore::new(&config.app.data_dir)?;
//! let driver = OpenAiClient::new(ClientConfig::from_env()?);
//! let workshop = Workshop::new(&config, store, driver)?;
//!
//! let mut session = workshop.start().await?;
//! workshop
//!     .create_script(&mut session, Some("The Lighthouse".into()), Some("A keeper hears a knock.".into()))
//!     .await?;
//!
//! let request = GenerationRequest::new("Write the opening scene.");
//! let preview = workshop.preview(&session, &request)?;
//! println!("~${:.4} for {} input tokens", preview.estimated_cost(), preview.input_tokens());
//!
//! let version = workshop.generate(&mut session, &request).await?;
//! println!("Version {} generated", version.version_number);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod request;
mod session;
mod workshop;

pub use request::{Export, GenerationRequest, PartPreview, Preview};
pub use session::{Session, Settings, SettingsUpdate};
pub use workshop::Workshop;
