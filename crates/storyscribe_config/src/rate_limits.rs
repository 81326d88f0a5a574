//! Published rate limits, kept for display.

use serde::{Deserialize, Serialize};

/// Rate limits for one model. All fields are optional; `None` means not published.
///
/// Shown to the user next to the model picker. Nothing in the workspace
/// enforces these numbers.
///
/// # Example
///
/// ```toml
/// [rate_limits."gpt-4o-mini"]
/// tpm = 200_000
/// rpm = 500
/// rpd = 10_000
/// tpd = 2_000_000
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Tokens per minute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tpm: Option<u64>,

    /// Requests per minute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpm: Option<u64>,

    /// Tokens per day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tpd: Option<u64>,

    /// Requests per day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpd: Option<u64>,
}

/// One labelled line of the rate-limit table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateLimitRow {
    /// Short name, e.g. `"TPM"`
    pub name: &'static str,
    /// Long description, e.g. `"Tokens per minute"`
    pub description: &'static str,
    /// Published limit
    pub value: u64,
}

impl RateLimitConfig {
    /// Rows for every published limit, in TPM, RPM, TPD, RPD order.
    pub fn rows(&self) -> Vec<RateLimitRow> {
        [
            ("TPM", "Tokens per minute", self.tpm),
            ("RPM", "Requests per minute", self.rpm),
            ("TPD", "Tokens per day", self.tpd),
            ("RPD", "Requests per day", self.rpd),
        ]
        .into_iter()
        .filter_map(|(name, description, value)| {
            value.map(|value| RateLimitRow {
                name,
                description,
                value,
            })
        })
        .collect()
    }
}
