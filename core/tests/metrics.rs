//! System metrics invariants: grid shape and per-metric formulas.

use chrono::{TimeZone, Utc};
use shopgen_core::{
    engine::GenEngine,
    intensity::hourly_multiplier,
    scenario::{ScenarioConfig, ScenarioKind},
    types::ProductCategory,
};

const METRIC_COUNT: usize = 6;

fn run(kind: ScenarioKind, duration: &str, intensity: f64) -> GenEngine {
    let mut config = ScenarioConfig::new(kind);
    config.duration = duration.into();
    config.intensity_multiplier = intensity;
    config.orders_per_hour = 20.0;
    config.customer_count = 100;
    config.product_count = 30;

    let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let mut engine = GenEngine::build(config, 3, start).expect("build engine");
    engine.run().expect("run");
    engine
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[test]
fn one_row_per_metric_per_hour() {
    let engine = run(ScenarioKind::Baseline, "12h", 1.0);
    let metrics = &engine.dataset.system_metrics;
    assert_eq!(metrics.len(), 12 * METRIC_COUNT);

    for hour in 0..12usize {
        let slice = &metrics[hour * METRIC_COUNT..(hour + 1) * METRIC_COUNT];
        let expected_ts = engine.ctx().start_ts + chrono::Duration::hours(hour as i64);
        for row in slice {
            assert_eq!(row.timestamp, expected_ts);
        }
    }
}

#[test]
fn payment_failure_rate_spikes_only_in_the_outage_window() {
    let engine = run(
        ScenarioKind::PaymentOutage {
            outage_start_hour: 1,
            outage_end_hour: 3,
        },
        "6h",
        1.5,
    );

    for row in &engine.dataset.system_metrics {
        if row.metric_name != "payment_failure_rate" {
            continue;
        }
        let hour = (row.timestamp - engine.ctx().start_ts).num_hours() as u64;
        let expected = if (1..=3).contains(&hour) { 0.75 } else { 0.05 };
        assert_eq!(row.metric_value, expected, "hour {hour}");
    }
}

#[test]
fn order_rate_metric_follows_the_hourly_shape() {
    let engine = run(ScenarioKind::Baseline, "24h", 2.0);
    let kind = &engine.ctx().scenario.kind;

    for row in &engine.dataset.system_metrics {
        if row.metric_name != "orders_per_hour" {
            continue;
        }
        let hour = (row.timestamp - engine.ctx().start_ts).num_hours() as u64;
        let expected = round3(800.0 * 2.0 * hourly_multiplier(hour, kind));
        assert_eq!(row.metric_value, expected, "hour {hour}");
    }
}

#[test]
fn metrics_link_to_the_active_campaign() {
    let baseline = run(ScenarioKind::Baseline, "4h", 1.0);
    for row in &baseline.dataset.system_metrics {
        assert!(row.campaign_id.is_none());
    }

    let sale = run(
        ScenarioKind::FlashSale {
            discount_percent: 70.0,
            category: ProductCategory::Electronics,
        },
        "4h",
        1.0,
    );
    let campaign_id = &sale.dataset.campaigns[0].campaign_id;
    for row in &sale.dataset.system_metrics {
        assert_eq!(row.campaign_id.as_ref(), Some(campaign_id));
    }
}

#[test]
fn inventory_turnover_stays_in_band() {
    let engine = run(ScenarioKind::Baseline, "24h", 1.0);
    for row in &engine.dataset.system_metrics {
        if row.metric_name == "inventory_turnover" {
            assert!((2.0..=8.0).contains(&row.metric_value));
        }
    }
}
