//! Core data types and pure computations for Storyscribe.
//!
//! This crate holds the records persisted by the version store (scripts and
//! versions), the transient request types (messages and context parts), and the
//! stateless pieces of the drafting workflow:
//!
//! - [`assemble`] / [`describe`] build the ordered request and its display breakdown
//! - [`count_tokens`] measures text against a model's vocabulary
//! - [`estimate_output_tokens`] and [`estimate_cost`] price a request before it is sent

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembly;
mod context;
mod estimate;
mod message;
mod model;
mod role;
mod script;
mod temperature;
pub mod timestamp;
mod token_counting;
mod version;

pub use assembly::{
    BRIEF_PREFIX, NO_CONTENT, NO_PROMPT, assemble, brief_text, describe, preview_snippet,
    version_text,
};
pub use context::{ContextPart, ContextPartKind};
pub use estimate::{
    DEFAULT_MIN_OUTPUT_TOKENS, DEFAULT_OUTPUT_FACTOR, ModelPricing, OutputEstimator,
    estimate_cost, estimate_output_tokens,
};
pub use message::Message;
pub use model::ModelId;
pub use role::Role;
pub use script::{DEFAULT_TITLE, Script, ScriptId, ScriptIndex};
pub use temperature::Temperature;
pub use token_counting::{TokenCounter, count_message_tokens, count_tokens};
pub use version::{
    Version, VersionBuilder, VersionBuilderError, assign_legacy_numbers, next_version_number,
};
