//! Order table invariants: volume shaping, payment outcomes, delivery
//! fields, and order-item integrity.

use chrono::{TimeZone, Utc};
use shopgen_core::{
    engine::GenEngine,
    order_generator::OrderGenerator,
    scenario::{ScenarioConfig, ScenarioKind},
    types::{OrderStatus, PaymentStatus, ProductCategory},
};
use std::collections::{HashMap, HashSet};

fn run(kind: ScenarioKind, duration: &str, intensity: f64, orders_per_hour: f64) -> GenEngine {
    let mut config = ScenarioConfig::new(kind);
    config.duration = duration.into();
    config.intensity_multiplier = intensity;
    config.orders_per_hour = orders_per_hour;
    config.customer_count = 400;
    config.product_count = 80;

    let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let mut engine = GenEngine::build(config, 7, start).expect("build engine");
    engine.run().expect("run");
    engine
}

fn hour_of(engine: &GenEngine, ts: chrono::DateTime<Utc>) -> u64 {
    (ts - engine.ctx().start_ts).num_hours() as u64
}

#[test]
fn failed_payment_forces_cancellation_and_clears_delivery_fields() {
    let engine = run(
        ScenarioKind::PaymentOutage {
            outage_start_hour: 1,
            outage_end_hour: 3,
        },
        "6h",
        1.5,
        200.0,
    );

    let failed: Vec<_> = engine
        .dataset
        .orders
        .iter()
        .filter(|o| o.payment_status == PaymentStatus::Failed)
        .collect();
    assert!(!failed.is_empty(), "outage run should produce failures");

    for order in failed {
        assert_eq!(order.order_status, OrderStatus::Cancelled);
        assert!(order.payment_failure_reason.is_some());
        assert!(order.actual_delivery_ts.is_none());
        assert!(!order.is_sla_breach);
        assert_eq!(order.delivery_delay_hours, 0);
    }
}

#[test]
fn successful_payment_has_no_failure_reason() {
    let engine = run(ScenarioKind::Baseline, "6h", 1.0, 100.0);
    for order in &engine.dataset.orders {
        if order.payment_status == PaymentStatus::Success {
            assert!(order.payment_failure_reason.is_none());
        }
    }
}

#[test]
fn non_delivered_orders_carry_no_delivery_outcome() {
    let engine = run(ScenarioKind::Baseline, "12h", 1.0, 100.0);
    for order in &engine.dataset.orders {
        if order.order_status != OrderStatus::Delivered {
            assert!(order.actual_delivery_ts.is_none(), "order {}", order.order_id);
            assert!(!order.is_sla_breach);
            assert_eq!(order.delivery_delay_hours, 0);
        } else {
            assert!(order.actual_delivery_ts.is_some(), "order {}", order.order_id);
        }
    }
}

#[test]
fn hourly_volume_matches_the_shaping_formula() {
    let engine = run(
        ScenarioKind::FlashSale {
            discount_percent: 70.0,
            category: ProductCategory::Electronics,
        },
        "6h",
        2.0,
        50.0,
    );

    let mut per_hour: HashMap<u64, u64> = HashMap::new();
    for order in &engine.dataset.orders {
        *per_hour.entry(hour_of(&engine, order.order_ts)).or_default() += 1;
    }

    for hour in 0..engine.ctx().total_hours {
        let expected = OrderGenerator::orders_for_hour(engine.ctx(), hour);
        assert_eq!(
            per_hour.get(&hour).copied().unwrap_or(0),
            expected,
            "hour {hour}"
        );
    }
}

#[test]
fn outage_window_cuts_volume_and_fails_most_payments() {
    let engine = run(
        ScenarioKind::PaymentOutage {
            outage_start_hour: 1,
            outage_end_hour: 3,
        },
        "6h",
        1.5,
        400.0,
    );

    let mut in_window = 0usize;
    let mut failed_in_window = 0usize;
    for order in &engine.dataset.orders {
        let hour = hour_of(&engine, order.order_ts);
        if engine.ctx().scenario.kind.in_outage_window(hour) {
            in_window += 1;
            if order.payment_status == PaymentStatus::Failed {
                failed_in_window += 1;
            }
        }
    }

    assert!(in_window > 100, "outage hours should still see some orders");
    let failure_rate = failed_in_window as f64 / in_window as f64;
    assert!(
        (0.55..=0.85).contains(&failure_rate),
        "outage failure rate {failure_rate:.2} outside expected band"
    );
}

#[test]
fn every_order_has_exactly_one_item() {
    let engine = run(ScenarioKind::Baseline, "6h", 1.0, 60.0);
    let data = &engine.dataset;

    assert_eq!(data.orders.len(), data.order_items.len());

    let order_ids: HashSet<&str> = data.orders.iter().map(|o| o.order_id.as_str()).collect();
    let product_ids: HashSet<&str> =
        data.products.iter().map(|p| p.product_id.as_str()).collect();
    for item in &data.order_items {
        assert!(order_ids.contains(item.order_id.as_str()), "orphan item");
        assert!(product_ids.contains(item.product_id.as_str()), "unknown product");
        assert!(item.quantity >= 1 && item.quantity <= 4);
    }
}

#[test]
fn totals_reconcile_to_the_cent() {
    let engine = run(
        ScenarioKind::FlashSale {
            discount_percent: 50.0,
            category: ProductCategory::Electronics,
        },
        "4h",
        1.0,
        80.0,
    );

    for order in &engine.dataset.orders {
        let expected =
            order.subtotal - order.discount + order.tax + order.shipping_cost;
        assert!(
            (order.total_amount - expected).abs() < 0.011,
            "order {} total {} vs components {}",
            order.order_id,
            order.total_amount,
            expected
        );
        if order.subtotal < 50.0 {
            assert_eq!(order.shipping_cost, 5.99);
        } else {
            assert_eq!(order.shipping_cost, 0.0);
        }
    }
}

#[test]
fn higher_intensity_means_more_orders() {
    let low = run(ScenarioKind::Baseline, "12h", 1.0, 50.0);
    let high = run(ScenarioKind::Baseline, "12h", 3.0, 50.0);
    assert!(high.dataset.orders.len() > low.dataset.orders.len());
}
