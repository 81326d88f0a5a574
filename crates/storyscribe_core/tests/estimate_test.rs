use storyscribe_core::{
    ModelId, ModelPricing, OutputEstimator, Temperature, estimate_cost, estimate_output_tokens,
};

#[test]
fn output_estimate_respects_floor() {
    assert_eq!(estimate_output_tokens(0), 1000);
    assert_eq!(estimate_output_tokens(50), 1000);
    assert_eq!(estimate_output_tokens(200), 1000);
    assert_eq!(estimate_output_tokens(201), 1005);
    assert_eq!(estimate_output_tokens(300), 1500);
}

#[test]
fn output_estimate_counts_characters_not_bytes() {
    let estimator = OutputEstimator::default();
    let brief = "й".repeat(300);
    assert_eq!(estimator.estimate_for_brief(&brief), 1500);
}

#[test]
fn custom_estimator_overrides_defaults() {
    let estimator = OutputEstimator::new(3, 10);
    assert_eq!(estimator.estimate(2), 10);
    assert_eq!(estimator.estimate(100), 300);
    assert_eq!(*estimator.factor(), 3);
}

#[test]
fn cost_matches_per_million_pricing() {
    let pricing = ModelPricing::new(0.15, 0.60);
    let cost = estimate_cost(1000, 2000, &pricing);
    assert!((cost - 0.00135).abs() < 1e-12);
}

#[test]
fn cost_of_nothing_is_zero() {
    let pricing = ModelPricing::new(5.0, 15.0);
    assert_eq!(estimate_cost(0, 0, &pricing), 0.0);
}

#[test]
fn model_ids_round_trip_through_strings() {
    for model in ModelId::all() {
        assert_eq!(ModelId::from_id(model.as_static()).ok(), Some(model));
        let json = serde_json::to_string(&model).expect("serializes");
        assert_eq!(json, format!("\"{}\"", model));
    }
}

#[test]
fn unknown_model_lists_supported() {
    let err = ModelId::from_id("gpt-5").expect_err("unknown model");
    assert!(err.message.contains("gpt-5"));
    assert!(err.message.contains("gpt-4o-mini"));
}

#[test]
fn temperature_bounds_are_inclusive() {
    assert!(Temperature::new(0.0).is_ok());
    assert!(Temperature::new(1.0).is_ok());
    assert!(Temperature::new(-0.01).is_err());
    assert!(Temperature::new(f32::NAN).is_err());
    assert!(serde_json::from_str::<Temperature>("2.0").is_err());
}
