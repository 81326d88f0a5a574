//! Typed model catalog.

use crate::{RateLimitConfig, RateLimitRow};
use serde::Serialize;
use std::collections::BTreeMap;
use storyscribe_core::{ModelId, ModelPricing};
use storyscribe_error::{CapacityError, ConfigError, StoryscribeResult};
use tracing::debug;

/// Size and price of one model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, derive_getters::Getters)]
pub struct ModelSpec {
    /// Model identifier
    model: ModelId,
    /// Relative quality score
    quality: u32,
    /// Maximum tokens per request
    context_window: usize,
    /// Per-million-token prices
    pricing: ModelPricing,
}

impl ModelSpec {
    /// Create a catalog entry.
    pub fn new(model: ModelId, quality: u32, context_window: usize, pricing: ModelPricing) -> Self {
        Self {
            model,
            quality,
            context_window,
            pricing,
        }
    }
}

/// A model's catalog entry together with its published rate limits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelOverview {
    /// Catalog entry
    pub spec: ModelSpec,
    /// Published limits, empty when none are known
    pub rate_limits: Vec<RateLimitRow>,
}

/// Validated model catalog, ordered by model.
///
/// # Examples
///
/// ```
/// use storyscribe_config::{ModelCatalog, ModelSpec};
/// use storyscribe_core::{ModelId, ModelPricing};
///
/// let mut catalog = ModelCatalog::new();
/// catalog.insert(ModelSpec::new(ModelId::Gpt4oMini, 85, 128_000, ModelPricing::new(0.15, 0.6)));
///
/// let cost = catalog.estimate_cost(ModelId::Gpt4oMini, 1000, 2000).unwrap();
/// assert!((cost - 0.00135).abs() < 1e-12);
/// assert!(catalog.estimate_cost(ModelId::Gpt4o, 1, 1).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModelCatalog {
    models: BTreeMap<ModelId, ModelSpec>,
    rate_limits: BTreeMap<ModelId, RateLimitConfig>,
}

impl ModelCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a model entry.
    pub fn insert(&mut self, spec: ModelSpec) {
        self.models.insert(spec.model, spec);
    }

    /// Attach published rate limits to a model.
    pub fn insert_rate_limits(&mut self, model: ModelId, limits: RateLimitConfig) {
        self.rate_limits.insert(model, limits);
    }

    /// Whether the model has an entry.
    pub fn contains(&self, model: ModelId) -> bool {
        self.models.contains_key(&model)
    }

    /// Number of configured models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether no models are configured.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// All entries in model order.
    pub fn specs(&self) -> impl Iterator<Item = &ModelSpec> {
        self.models.values()
    }

    /// Look up a model's entry.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the model is not configured.
    pub fn spec(&self, model: ModelId) -> Result<&ModelSpec, ConfigError> {
        self.models
            .get(&model)
            .ok_or_else(|| ConfigError::new(format!("Model '{}' is not configured", model)))
    }

    /// Published rate limits for a model, if any.
    pub fn rate_limits(&self, model: ModelId) -> Option<&RateLimitConfig> {
        self.rate_limits.get(&model)
    }

    /// Maximum tokens per request for a model.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the model is not configured.
    pub fn context_window(&self, model: ModelId) -> Result<usize, ConfigError> {
        Ok(self.spec(model)?.context_window)
    }

    /// Estimated cost of a request in USD.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the model is not configured.
    pub fn estimate_cost(
        &self,
        model: ModelId,
        input_tokens: usize,
        output_tokens: usize,
    ) -> Result<f64, ConfigError> {
        let cost = self.spec(model)?.pricing.cost(input_tokens, output_tokens);
        debug!(%model, input_tokens, output_tokens, cost, "Estimated request cost");
        Ok(cost)
    }

    /// Reject a request that does not fit in the model's context window.
    ///
    /// A request that exactly fills the window is accepted.
    ///
    /// # Errors
    ///
    /// Returns a capacity error when `input_tokens` exceeds the window, or a
    /// configuration error if the model is not configured.
    pub fn check_capacity(&self, model: ModelId, input_tokens: usize) -> StoryscribeResult<()> {
        let context_window = self.context_window(model)?;
        if input_tokens > context_window {
            return Err(CapacityError::new(model.as_static(), input_tokens, context_window).into());
        }
        Ok(())
    }

    /// Catalog entry and rate-limit rows for display.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the model is not configured.
    pub fn overview(&self, model: ModelId) -> Result<ModelOverview, ConfigError> {
        Ok(ModelOverview {
            spec: *self.spec(model)?,
            rate_limits: self
                .rate_limits(model)
                .map(RateLimitConfig::rows)
                .unwrap_or_default(),
        })
    }
}
