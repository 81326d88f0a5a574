//! Configuration and model catalog.
//!
//! Settings come from TOML layered through the `config` crate:
//! - bundled defaults (`storyscribe.toml` at the workspace root)
//! - `~/.config/storyscribe/storyscribe.toml`
//! - `./storyscribe.toml`
//!
//! Later sources win. After loading, the `[models]` and `[rate_limits]` tables
//! are validated into a typed [`ModelCatalog`] that answers pricing and
//! context-window questions for the rest of the workspace.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod config;
mod rate_limits;

pub use catalog::{ModelCatalog, ModelOverview, ModelSpec};
pub use config::{AppConfig, EndpointConfig, EstimationConfig, ModelConfig, StoryscribeConfig};
pub use rate_limits::{RateLimitConfig, RateLimitRow};
