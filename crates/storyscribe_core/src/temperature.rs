//! Sampling temperature.

use serde::{Deserialize, Serialize};
use storyscribe_error::InputError;

/// Sampling temperature constrained to `[0.0, 1.0]`.
///
/// # Examples
///
/// ```
/// use storyscribe_core::Temperature;
///
/// assert_eq!(Temperature::new(0.3).unwrap().value(), 0.3);
/// assert!(Temperature::new(1.5).is_err());
/// assert_eq!(Temperature::default().value(), 0.7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(into = "f32")]
pub struct Temperature(f32);

impl Temperature {
    /// Lowest accepted value.
    pub const MIN: f32 = 0.0;
    /// Highest accepted value.
    pub const MAX: f32 = 1.0;

    /// Validate and wrap a temperature.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when the value is NaN or outside `[0.0, 1.0]`.
    pub fn new(value: f32) -> Result<Self, InputError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(InputError::new(format!(
                "Temperature must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )));
        }
        Ok(Self(value))
    }

    /// The raw value.
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for Temperature {
    fn default() -> Self {
        Self(0.7)
    }
}

impl TryFrom<f32> for Temperature {
    type Error = InputError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Temperature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f32::deserialize(deserializer)?;
        Self::new(value).map_err(|e| serde::de::Error::custom(e.message))
    }
}

impl From<Temperature> for f32 {
    fn from(temperature: Temperature) -> Self {
        temperature.0
    }
}

impl std::fmt::Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
