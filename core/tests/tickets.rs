//! Support ticket invariants: correlation-driven volume, SLA fields, and
//! resolution consistency.

use chrono::{TimeZone, Utc};
use shopgen_core::{
    engine::GenEngine,
    scenario::{ScenarioConfig, ScenarioKind},
};
use std::collections::HashSet;

fn run(kind: ScenarioKind, duration: &str, intensity: f64, orders_per_hour: f64) -> GenEngine {
    let mut config = ScenarioConfig::new(kind);
    config.duration = duration.into();
    config.intensity_multiplier = intensity;
    config.orders_per_hour = orders_per_hour;
    config.customer_count = 400;
    config.product_count = 80;

    let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let mut engine = GenEngine::build(config, 21, start).expect("build engine");
    engine.run().expect("run");
    engine
}

#[test]
fn unresolved_tickets_have_no_csat_and_breach_sla() {
    let engine = run(ScenarioKind::Baseline, "24h", 1.0, 100.0);
    let tickets = &engine.dataset.support_tickets;
    assert!(!tickets.is_empty());

    let mut saw_unresolved = false;
    for ticket in tickets {
        match ticket.resolved_ts {
            None => {
                saw_unresolved = true;
                assert!(ticket.csat.is_none(), "unresolved ticket with csat");
                assert!(ticket.resolution_time_minutes.is_none());
                assert!(ticket.sla_breach, "unresolved ticket must count as breached");
            }
            Some(resolved_ts) => {
                assert!(resolved_ts > ticket.created_ts);
                let score = ticket.csat.expect("resolved ticket needs csat");
                assert!((1..=5).contains(&score));
                assert!(ticket.resolution_time_minutes.is_some());
            }
        }
        assert!(ticket.first_response_ts >= ticket.created_ts);
    }
    assert!(saw_unresolved, "expected some unresolved tickets at this volume");
}

#[test]
fn every_ticket_is_worked_by_a_human_or_a_chatbot() {
    let engine = run(ScenarioKind::Baseline, "24h", 1.0, 100.0);
    for ticket in &engine.dataset.support_tickets {
        assert!(
            ["human", "chatbot"].contains(&ticket.agent_type.as_str()),
            "unexpected agent type {}",
            ticket.agent_type
        );
        assert!(ticket.agent_id.starts_with("AGENT_"));
    }
}

#[test]
fn tickets_reference_real_customers_and_orders() {
    let engine = run(ScenarioKind::Baseline, "24h", 1.0, 100.0);
    let data = &engine.dataset;

    let customer_ids: HashSet<&str> =
        data.customers.iter().map(|c| c.customer_id.as_str()).collect();
    let order_ids: HashSet<&str> = data.orders.iter().map(|o| o.order_id.as_str()).collect();

    for ticket in &data.support_tickets {
        assert!(customer_ids.contains(ticket.customer_id.as_str()));
        if let Some(order_id) = &ticket.order_id {
            assert!(order_ids.contains(order_id.as_str()), "dangling order ref");
        }
    }
}

#[test]
fn breached_deliveries_drive_delivery_tickets() {
    let engine = run(ScenarioKind::Baseline, "24h", 2.0, 150.0);
    let data = &engine.dataset;

    let breached: HashSet<&str> = data
        .orders
        .iter()
        .filter(|o| o.is_sla_breach)
        .map(|o| o.order_id.as_str())
        .collect();
    assert!(!breached.is_empty());

    let delivery_tickets_on_breached = data
        .support_tickets
        .iter()
        .filter(|t| {
            t.issue_category == "delivery"
                && t.order_id
                    .as_deref()
                    .is_some_and(|id| breached.contains(id))
        })
        .count();

    // 90% of breached orders should complain; allow slack for sampling.
    assert!(
        delivery_tickets_on_breached as f64 >= breached.len() as f64 * 0.7,
        "{delivery_tickets_on_breached} delivery tickets for {} breached orders",
        breached.len()
    );
}

#[test]
fn zero_order_volume_means_no_downstream_rows() {
    let engine = run(ScenarioKind::Baseline, "6h", 1.0, 0.0);
    let data = &engine.dataset;

    assert!(data.orders.is_empty());
    assert!(data.order_items.is_empty());
    assert!(data.support_tickets.is_empty());
    assert!(data.cart_abandonment.is_empty());
    assert!(data.returns.is_empty());
    // Tables upstream of orders still populate.
    assert!(!data.customers.is_empty());
    assert!(!data.products.is_empty());
    assert!(!data.system_metrics.is_empty());
}

#[test]
fn outage_scenario_skews_tickets_toward_payment_issues() {
    let engine = run(
        ScenarioKind::PaymentOutage {
            outage_start_hour: 1,
            outage_end_hour: 3,
        },
        "12h",
        1.5,
        150.0,
    );

    let tickets = &engine.dataset.support_tickets;
    assert!(!tickets.is_empty());
    let payment = tickets
        .iter()
        .filter(|t| t.issue_category == "payment")
        .count();
    // The residual pass draws payment at 70%; breach-driven delivery
    // tickets dilute the share, so just require a strong presence.
    assert!(
        payment as f64 >= tickets.len() as f64 * 0.3,
        "{payment} payment tickets out of {}",
        tickets.len()
    );
}
