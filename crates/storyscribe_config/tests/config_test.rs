//! Tests for layered configuration and the model catalog.

use std::io::Write;
use storyscribe_config::StoryscribeConfig;
use storyscribe_core::ModelId;
use storyscribe_error::StoryscribeErrorKind;
use tempfile::Builder;

#[test]
fn test_bundled_catalog_prices() {
    let config = StoryscribeConfig::from_toml_str("").unwrap();
    let catalog = config.catalog().unwrap();

    assert_eq!(catalog.len(), 3);
    let mini = catalog.spec(ModelId::Gpt4oMini).unwrap();
    assert_eq!(*mini.context_window(), 128_000);
    assert_eq!(mini.pricing().input_per_million, 0.15);
    assert_eq!(mini.pricing().output_per_million, 0.6);

    let cost = catalog.estimate_cost(ModelId::Gpt4oMini, 1000, 2000).unwrap();
    assert!((cost - 0.00135).abs() < 1e-12);
}

#[test]
fn test_bundled_rate_limits() {
    let config = StoryscribeConfig::from_toml_str("").unwrap();
    let catalog = config.catalog().unwrap();

    let overview = catalog.overview(ModelId::Gpt4oMini).unwrap();
    let values: Vec<(&str, u64)> = overview
        .rate_limits
        .iter()
        .map(|row| (row.name, row.value))
        .collect();
    assert_eq!(
        values,
        vec![
            ("TPM", 200_000),
            ("RPM", 500),
            ("TPD", 2_000_000),
            ("RPD", 10_000)
        ]
    );

    // Snapshot model has no published limits
    let snapshot = catalog.overview(ModelId::Gpt4o20240806).unwrap();
    assert!(snapshot.rate_limits.is_empty());
}

#[test]
fn test_defaults_are_typed() {
    let config = StoryscribeConfig::from_toml_str("").unwrap();
    assert_eq!(config.default_model().unwrap(), ModelId::Gpt4oMini);
    assert_eq!(config.default_temperature().unwrap().value(), 0.7);
    assert_eq!(config.estimator().estimate(300), 1500);
    assert!(config.app.system_prompt.contains("audio stories"));
}

#[test]
fn test_config_from_file_overrides_single_values() {
    let mut temp_file = Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        temp_file,
        r#"
[app]
default_model = "gpt-4o"
data_dir = "/tmp/stories"

[models."gpt-4o"]
input_cost = 2.5
"#
    )
    .unwrap();

    let config = StoryscribeConfig::from_file(temp_file.path()).unwrap();
    assert_eq!(config.default_model().unwrap(), ModelId::Gpt4o);
    assert_eq!(config.app.data_dir.to_str(), Some("/tmp/stories"));

    let spec = *config.catalog().unwrap().spec(ModelId::Gpt4o).unwrap();
    assert_eq!(spec.pricing().input_per_million, 2.5);
    // Untouched fields keep their bundled values
    assert_eq!(spec.pricing().output_per_million, 15.0);
    assert_eq!(*spec.context_window(), 128_000);
}

#[test]
fn test_unknown_model_key_rejected() {
    let result = StoryscribeConfig::from_toml_str(
        r#"
[models."gpt-2"]
quality = 1
context_window = 1024
input_cost = 0.0
output_cost = 0.0
"#,
    );
    let err = result.unwrap_err();
    assert!(matches!(err.kind(), StoryscribeErrorKind::Config(_)));
    assert!(err.to_string().contains("gpt-2"));
}

#[test]
fn test_negative_price_rejected() {
    let result = StoryscribeConfig::from_toml_str("[models.\"gpt-4o\"]\noutput_cost = -1.0\n");
    assert!(result.is_err());
}

#[test]
fn test_temperature_out_of_range_rejected() {
    let result = StoryscribeConfig::from_toml_str("[app]\ndefault_temperature = 1.5\n");
    assert!(result.is_err());
}

#[test]
fn test_missing_file_is_error() {
    let result = StoryscribeConfig::from_file("/definitely/not/here/storyscribe.toml");
    assert!(result.is_err());
}

#[test]
fn test_with_data_dir_overrides() {
    let config = StoryscribeConfig::from_toml_str("")
        .unwrap()
        .with_data_dir("/var/lib/storyscribe");
    assert_eq!(config.app.data_dir.to_str(), Some("/var/lib/storyscribe"));
}
