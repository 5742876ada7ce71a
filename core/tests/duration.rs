//! Duration grammar and config validation.

use shopgen_core::{
    error::SimError,
    scenario::{parse_duration_hours, ScenarioConfig, ScenarioKind},
};

#[test]
fn hours_days_and_months_parse() {
    assert_eq!(parse_duration_hours("4h").unwrap(), 4);
    assert_eq!(parse_duration_hours("1d").unwrap(), 24);
    assert_eq!(parse_duration_hours("14d").unwrap(), 336);
    assert_eq!(parse_duration_hours("1mo").unwrap(), 720);
    assert_eq!(parse_duration_hours("2mo").unwrap(), 1440);
}

#[test]
fn minutes_round_up_to_whole_hours() {
    // A bare `m` is minutes, never months.
    assert_eq!(parse_duration_hours("30m").unwrap(), 1);
    assert_eq!(parse_duration_hours("60m").unwrap(), 1);
    assert_eq!(parse_duration_hours("61m").unwrap(), 2);
    assert_eq!(parse_duration_hours("90m").unwrap(), 2);
    assert_eq!(parse_duration_hours("1440m").unwrap(), 24);
}

#[test]
fn surrounding_whitespace_is_tolerated() {
    assert_eq!(parse_duration_hours(" 4h ").unwrap(), 4);
}

#[test]
fn malformed_durations_are_rejected() {
    for input in ["", "h", "4", "4x", "-4h", "4hh", "mo", "0h", "0d", "0m"] {
        let result = parse_duration_hours(input);
        assert!(
            matches!(result, Err(SimError::InvalidDuration { .. })),
            "{input:?} should be rejected, got {result:?}"
        );
    }
}

#[test]
fn validate_rejects_non_positive_intensity() {
    for bad in [0.0, -1.5, f64::NAN] {
        let mut config = ScenarioConfig::new(ScenarioKind::Baseline);
        config.intensity_multiplier = bad;
        let result = config.validate();
        assert!(
            matches!(result, Err(SimError::NonPositiveIntensity { .. })),
            "intensity {bad} should be rejected, got {result:?}"
        );
    }
}

#[test]
fn validate_rejects_bad_duration() {
    let mut config = ScenarioConfig::new(ScenarioKind::Baseline);
    config.duration = "eternity".into();
    assert!(config.validate().is_err());
}

#[test]
fn presets_all_validate() {
    for name in ScenarioConfig::preset_names() {
        let config = ScenarioConfig::preset(name).expect("known preset");
        config.validate().unwrap_or_else(|e| panic!("preset {name}: {e}"));
    }
}

#[test]
fn config_only_presets_are_baseline_shaped() {
    let disruption = ScenarioConfig::preset("supply_disruption").unwrap();
    assert_eq!(disruption.kind.name(), "baseline");
    assert_eq!(disruption.total_hours().unwrap(), 14 * 24);
    assert_eq!(disruption.intensity_multiplier, 0.8);

    let multi = ScenarioConfig::preset("multi_channel").unwrap();
    assert_eq!(multi.kind.name(), "baseline");
    assert_eq!(multi.total_hours().unwrap(), 90 * 24);
    assert_eq!(multi.intensity_multiplier, 1.18);
}

#[test]
fn validate_rejects_out_of_range_correlations() {
    use shopgen_core::scenario::{CorrelationEntry, Entity};

    for bad in [1.5, -1.01, f64::NAN, f64::INFINITY] {
        let mut config = ScenarioConfig::new(ScenarioKind::Baseline);
        config.correlations.push(CorrelationEntry {
            from: Entity::Orders,
            to: Entity::CartAbandonment,
            coefficient: bad,
        });
        let result = config.validate();
        assert!(
            matches!(result, Err(SimError::CorrelationOutOfRange { .. })),
            "coefficient {bad} should be rejected, got {result:?}"
        );
    }
}

#[test]
fn custom_json_config_round_trips() {
    let json = r#"{
        "scenario": "flash_sale",
        "discount_percent": 60.0,
        "category": "clothing",
        "duration": "4h",
        "intensity_multiplier": 5.0
    }"#;
    let config = ScenarioConfig::from_json(json).expect("parse config");
    assert_eq!(config.kind.name(), "flash_sale");
    assert_eq!(config.total_hours().unwrap(), 4);
    assert_eq!(config.intensity_multiplier, 5.0);
}
