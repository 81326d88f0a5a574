//! Supported model identifiers.

use serde::{Deserialize, Serialize};
use storyscribe_error::ConfigError;
use strum::IntoEnumIterator;

/// Closed set of models the tool knows how to price and size.
///
/// # Examples
///
/// ```
/// use storyscribe_core::ModelId;
///
/// let model = ModelId::from_id("gpt-4o-mini").unwrap();
/// assert_eq!(model, ModelId::Gpt4oMini);
/// assert_eq!(model.as_ref(), "gpt-4o-mini");
/// assert!(ModelId::from_id("gpt-2").is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
    strum::IntoStaticStr,
)]
pub enum ModelId {
    /// GPT-4o (latest alias)
    #[serde(rename = "gpt-4o")]
    #[strum(serialize = "gpt-4o")]
    Gpt4o,
    /// GPT-4o, August 2024 snapshot
    #[serde(rename = "gpt-4o-2024-08-06")]
    #[strum(serialize = "gpt-4o-2024-08-06")]
    Gpt4o20240806,
    /// GPT-4o mini
    #[serde(rename = "gpt-4o-mini")]
    #[strum(serialize = "gpt-4o-mini")]
    Gpt4oMini,
}

impl ModelId {
    /// Parse a model identifier, rejecting anything outside the supported set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the identifier and the supported ones.
    pub fn from_id(id: &str) -> Result<Self, ConfigError> {
        id.parse().map_err(|_| {
            let supported: Vec<&'static str> = Self::iter().map(Self::as_static).collect();
            ConfigError::new(format!(
                "Unknown model '{}' (supported: {})",
                id,
                supported.join(", ")
            ))
        })
    }

    /// The identifier sent to the endpoint.
    pub fn as_static(self) -> &'static str {
        self.into()
    }

    /// All supported models in declaration order.
    pub fn all() -> Vec<ModelId> {
        Self::iter().collect()
    }
}
