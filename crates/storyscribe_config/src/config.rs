//! Layered TOML configuration.
//!
//! The bundled defaults are compiled in, so loading never needs a file on
//! disk. User files only have to name the values they change:
//!
//! ```toml
//! [app]
//! default_model = "gpt-4o"
//!
//! [models."gpt-4o"]
//! input_cost = 2.5
//! ```

use crate::{ModelCatalog, ModelSpec, RateLimitConfig};
use config::{Config, ConfigBuilder, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use storyscribe_core::{ModelId, ModelPricing, OutputEstimator, Temperature};
use storyscribe_error::{ConfigError, StoryscribeResult};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../storyscribe.toml");

/// Application settings from the `[app]` table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Title shown by front ends
    pub title: String,
    /// Directory holding `scripts.json` and the version files
    pub data_dir: PathBuf,
    /// Model preselected for new requests
    pub default_model: String,
    /// Temperature preselected for new requests
    pub default_temperature: f32,
    /// System prompt sent first with every request
    pub system_prompt: String,
}

/// Output-length heuristic parameters from the `[estimation]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct EstimationConfig {
    /// Expected output tokens per brief character
    pub output_factor: usize,
    /// Lower bound of the output estimate
    pub min_output_tokens: usize,
}

/// Generation endpoint settings from the `[endpoint]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EndpointConfig {
    /// Base URL; requests go to `{base_url}/chat/completions`
    pub base_url: String,
}

/// One `[models."<id>"]` entry. Costs are USD per million tokens.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Relative quality score, display only
    pub quality: u32,
    /// Maximum tokens per request
    pub context_window: usize,
    /// Price per million input tokens
    pub input_cost: f64,
    /// Price per million output tokens
    pub output_cost: f64,
}

/// Top-level Storyscribe configuration.
///
/// # Example
///
/// ```no_run
/// use storyscribe_config::StoryscribeConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StoryscribeConfig::load()?;
/// let catalog = config.catalog()?;
/// println!("{} models configured", catalog.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StoryscribeConfig {
    /// Application settings
    pub app: AppConfig,
    /// Output estimation parameters
    pub estimation: EstimationConfig,
    /// Generation endpoint
    pub endpoint: EndpointConfig,
    /// Model catalog entries keyed by model identifier
    #[serde(default)]
    pub models: HashMap<String, ModelConfig>,
    /// Published rate limits keyed by model identifier
    #[serde(default)]
    pub rate_limits: HashMap<String, RateLimitConfig>,
}

impl StoryscribeConfig {
    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped when absent.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a file cannot be parsed or the merged
    /// result fails validation.
    #[instrument]
    pub fn load() -> StoryscribeResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/storyscribe/storyscribe.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("storyscribe").required(false));

        Self::finish(builder)
    }

    /// Load the bundled defaults overlaid with one specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or fails validation.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> StoryscribeResult<Self> {
        debug!("Loading configuration from file");

        let builder = Self::defaults().add_source(File::from(path.as_ref()).required(true));
        Self::finish(builder)
    }

    /// Load the bundled defaults overlaid with TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be parsed or fails validation.
    #[instrument(skip(toml))]
    pub fn from_toml_str(toml: &str) -> StoryscribeResult<Self> {
        let builder = Self::defaults().add_source(File::from_str(toml, FileFormat::Toml));
        Self::finish(builder)
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> StoryscribeResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        debug!(
            models = config.models.len(),
            default_model = %config.app.default_model,
            data_dir = %config.app.data_dir.display(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns the first violation found as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.catalog()?;
        self.default_model()?;
        self.default_temperature()?;

        if self.estimation.min_output_tokens == 0 {
            return Err(ConfigError::new(
                "estimation.min_output_tokens must be at least 1",
            ));
        }
        if self.endpoint.base_url.trim().is_empty() {
            return Err(ConfigError::new("endpoint.base_url must not be empty"));
        }
        Ok(())
    }

    /// Build the typed model catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for unknown model keys, rate limits of
    /// unconfigured models, negative prices or an empty context window.
    pub fn catalog(&self) -> Result<ModelCatalog, ConfigError> {
        let mut catalog = ModelCatalog::new();

        for (id, entry) in &self.models {
            let model = ModelId::from_id(id)?;
            for (field, price) in [("input_cost", entry.input_cost), ("output_cost", entry.output_cost)] {
                if !price.is_finite() || price < 0.0 {
                    return Err(ConfigError::new(format!(
                        "models.\"{}\".{} must be a non-negative number, got {}",
                        id, field, price
                    )));
                }
            }
            if entry.context_window == 0 {
                return Err(ConfigError::new(format!(
                    "models.\"{}\".context_window must be positive",
                    id
                )));
            }
            catalog.insert(ModelSpec::new(
                model,
                entry.quality,
                entry.context_window,
                ModelPricing::new(entry.input_cost, entry.output_cost),
            ));
        }

        for (id, limits) in &self.rate_limits {
            let model = ModelId::from_id(id)?;
            if !catalog.contains(model) {
                return Err(ConfigError::new(format!(
                    "rate_limits.\"{}\" names a model without a [models] entry",
                    id
                )));
            }
            catalog.insert_rate_limits(model, *limits);
        }

        Ok(catalog)
    }

    /// The configured default model.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if it is unknown or has no catalog entry.
    pub fn default_model(&self) -> Result<ModelId, ConfigError> {
        let model = ModelId::from_id(&self.app.default_model)?;
        if !self.models.contains_key(model.as_static()) {
            return Err(ConfigError::new(format!(
                "app.default_model '{}' has no [models] entry",
                model
            )));
        }
        Ok(model)
    }

    /// The configured default temperature.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if it lies outside `[0.0, 1.0]`.
    pub fn default_temperature(&self) -> Result<Temperature, ConfigError> {
        Temperature::new(self.app.default_temperature)
            .map_err(|e| ConfigError::new(format!("app.default_temperature: {}", e.message)))
    }

    /// Output-length estimator built from the `[estimation]` table.
    pub fn estimator(&self) -> OutputEstimator {
        OutputEstimator::new(
            self.estimation.output_factor,
            self.estimation.min_output_tokens,
        )
    }

    /// Replace the data directory, e.g. from a command-line flag.
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.app.data_dir = data_dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_defaults_parse() {
        let config = StoryscribeConfig::from_toml_str("").expect("bundled defaults load");
        assert_eq!(config.app.default_model, "gpt-4o-mini");
        assert_eq!(config.estimation.output_factor, 5);
        assert_eq!(config.estimation.min_output_tokens, 1000);
        assert_eq!(config.models.len(), 3);
    }

    #[test]
    fn test_zero_floor_rejected() {
        let result = StoryscribeConfig::from_toml_str("[estimation]\nmin_output_tokens = 0\n");
        assert!(result.is_err());
    }
}
