//! Supplier catalog invariants.

use chrono::{TimeZone, Utc};
use shopgen_core::{
    engine::GenEngine,
    scenario::{ScenarioConfig, ScenarioKind},
};
use std::collections::HashSet;

fn run(seed: u64) -> GenEngine {
    let mut config = ScenarioConfig::new(ScenarioKind::Baseline);
    config.duration = "2h".into();
    config.orders_per_hour = 10.0;
    config.customer_count = 50;
    config.product_count = 30;

    let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let mut engine = GenEngine::build(config, seed, start).expect("build engine");
    engine.run().expect("run");
    engine
}

#[test]
fn catalog_has_eight_suppliers_with_two_primaries() {
    let engine = run(1);
    let suppliers = &engine.dataset.suppliers;

    assert_eq!(suppliers.len(), 8);
    assert_eq!(suppliers.iter().filter(|s| s.is_primary).count(), 2);

    let names: HashSet<&str> = suppliers.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names.len(), 8, "supplier names must be distinct");

    for supplier in suppliers {
        assert!(supplier.lead_time_days >= 3 && supplier.lead_time_days <= 16);
        assert!((0.8..=1.0).contains(&supplier.reliability_score));
    }
}

#[test]
fn catalog_is_stable_across_runs_and_seeds() {
    let a = run(1);
    let b = run(999);

    let summary = |engine: &GenEngine| {
        engine
            .dataset
            .suppliers
            .iter()
            .map(|s| (s.name.clone(), s.country.clone(), s.lead_time_days, s.is_primary))
            .collect::<Vec<_>>()
    };
    assert_eq!(summary(&a), summary(&b));
}

#[test]
fn every_product_references_a_catalog_supplier() {
    let engine = run(5);
    let data = &engine.dataset;

    let supplier_ids: HashSet<&str> = data
        .suppliers
        .iter()
        .map(|s| s.supplier_id.as_str())
        .collect();
    assert!(!data.products.is_empty());
    for product in &data.products {
        assert!(supplier_ids.contains(product.supplier_id.as_str()));
    }
}
