//! Output-length and cost estimation.

use serde::{Deserialize, Serialize};

/// Expected output tokens per character of brief.
pub const DEFAULT_OUTPUT_FACTOR: usize = 5;
/// Lower bound on the output estimate.
pub const DEFAULT_MIN_OUTPUT_TOKENS: usize = 1000;

/// Predicts how many tokens a generation will produce from the brief length.
///
/// # Examples
///
/// ```
/// use storyscribe_core::OutputEstimator;
///
/// let estimator = OutputEstimator::default();
/// assert_eq!(estimator.estimate(50), 1000);
/// assert_eq!(estimator.estimate(300), 1500);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct OutputEstimator {
    /// Tokens per brief character
    factor: usize,
    /// Minimum estimate
    floor: usize,
}

impl OutputEstimator {
    /// Create an estimator with a custom factor and floor.
    pub fn new(factor: usize, floor: usize) -> Self {
        Self { factor, floor }
    }

    /// Estimate output tokens for a brief of `brief_chars` characters.
    pub fn estimate(&self, brief_chars: usize) -> usize {
        brief_chars.saturating_mul(self.factor).max(self.floor)
    }

    /// Estimate output tokens for a brief, counting Unicode scalar values.
    pub fn estimate_for_brief(&self, brief: &str) -> usize {
        self.estimate(brief.chars().count())
    }
}

impl Default for OutputEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_FACTOR, DEFAULT_MIN_OUTPUT_TOKENS)
    }
}

/// Estimate output tokens with the default factor and floor.
pub fn estimate_output_tokens(brief_chars: usize) -> usize {
    OutputEstimator::default().estimate(brief_chars)
}

/// Per-million-token prices for a model, in USD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPricing {
    /// Price per million input tokens
    pub input_per_million: f64,
    /// Price per million output tokens
    pub output_per_million: f64,
}

impl ModelPricing {
    /// Create a pricing entry.
    pub fn new(input_per_million: f64, output_per_million: f64) -> Self {
        Self {
            input_per_million,
            output_per_million,
        }
    }

    /// Cost of a request with the given token counts. Not rounded.
    pub fn cost(&self, input_tokens: usize, output_tokens: usize) -> f64 {
        let input_cost = (input_tokens as f64 / 1_000_000.0) * self.input_per_million;
        let output_cost = (output_tokens as f64 / 1_000_000.0) * self.output_per_million;
        input_cost + output_cost
    }
}

/// Estimate the monetary cost of a request.
///
/// ```
/// use storyscribe_core::{estimate_cost, ModelPricing};
///
/// let cost = estimate_cost(1000, 2000, &ModelPricing::new(0.15, 0.60));
/// assert!((cost - 0.00135).abs() < 1e-12);
/// ```
pub fn estimate_cost(input_tokens: usize, output_tokens: usize, pricing: &ModelPricing) -> f64 {
    pricing.cost(input_tokens, output_tokens)
}
