//! Support ticket generator.
//!
//! Ticket volume derives from order volume through the orders-tickets
//! correlation coefficient, scaled further by scenario kind. Generation
//! runs in two passes: a guaranteed-correlation pass over SLA-breached
//! orders, then a residual pass that fills the expected count with
//! tickets against random customers.

use crate::{
    dataset::Dataset,
    error::SimResult,
    generator::{GenContext, TableGenerator},
    rng::GeneratorRng,
    scenario::{Entity, ScenarioKind},
    types::{Cohort, EntityId, Severity},
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportTicketRecord {
    pub ticket_id: EntityId,
    pub customer_id: EntityId,
    pub order_id: Option<EntityId>,
    pub channel: String,
    pub language: String,
    pub issue_category: String,
    pub issue_subcategory: String,
    pub severity: Severity,
    pub created_ts: DateTime<Utc>,
    pub first_response_ts: DateTime<Utc>,
    /// None for the ~15% of tickets that never close.
    pub resolved_ts: Option<DateTime<Utc>>,
    pub sla_target_hours: f64,
    pub sla_breach: bool,
    pub sla_breach_hours: u32,
    /// Satisfaction score 1-5; None whenever the ticket is unresolved.
    pub csat: Option<u8>,
    pub agent_id: String,
    pub agent_type: String,
    pub escalation_count: u8,
    pub resolution_time_minutes: Option<u32>,
}

fn hours_f(hours: f64) -> Duration {
    Duration::seconds((hours * 3600.0).round() as i64)
}

fn subcategories(category: &str) -> &'static [&'static str] {
    match category {
        "delivery" => &[
            "delayed_delivery",
            "missing_package",
            "damaged_in_shipping",
            "wrong_address",
        ],
        "product" => &["defective", "wrong_item", "not_as_described", "quality_issue"],
        "refund" => &["refund_delay", "refund_amount", "return_process", "exchange"],
        "payment" => &["payment_failed", "double_charge", "refund_issue", "billing"],
        "technical" => &["app_crash", "website_slow", "login_issue", "checkout_error"],
        _ => &["general_inquiry", "account_help", "policy_question", "complaint"],
    }
}

pub struct SupportTicketGenerator;

impl SupportTicketGenerator {
    /// Scenario load multiplier on top of the correlated base volume.
    fn kind_multiplier(kind: &ScenarioKind) -> f64 {
        match kind {
            ScenarioKind::ReturnsWave { .. } => 2.5,
            ScenarioKind::PaymentOutage { .. } => 3.0,
            ScenarioKind::ViralMoment { .. } => 2.0,
            _ => 1.0,
        }
    }

    fn breach_channel(cohort: Cohort, rng: &mut GeneratorRng) -> &'static str {
        match cohort {
            Cohort::GenZ => *rng.pick(&[
                ("chat", 0.5),
                ("whatsapp", 0.3),
                ("social_media", 0.2),
            ]),
            Cohort::Boomer => *rng.pick(&[("phone", 0.7), ("email", 0.3)]),
            _ => *rng.pick(&[("email", 0.4), ("chat", 0.4), ("phone", 0.2)]),
        }
    }

    fn residual_channel(cohort: Cohort, rng: &mut GeneratorRng) -> &'static str {
        match cohort {
            Cohort::GenZ => *rng.pick(&[("chat", 0.4), ("whatsapp", 0.4), ("email", 0.2)]),
            _ => *rng.pick(&[("email", 0.5), ("phone", 0.3), ("chat", 0.2)]),
        }
    }

    fn residual_category(kind: &ScenarioKind, rng: &mut GeneratorRng) -> &'static str {
        match kind {
            ScenarioKind::ReturnsWave { .. } => {
                *rng.pick(&[("refund", 0.6), ("product", 0.3), ("other", 0.1)])
            }
            ScenarioKind::PaymentOutage { .. } => {
                *rng.pick(&[("payment", 0.7), ("technical", 0.2), ("other", 0.1)])
            }
            _ => *rng.pick(&[
                ("delivery", 0.3),
                ("product", 0.2),
                ("refund", 0.15),
                ("payment", 0.15),
                ("technical", 0.1),
                ("other", 0.1),
            ]),
        }
    }

    /// Build one ticket with the derived SLA, resolution, and
    /// satisfaction fields.
    #[allow(clippy::too_many_arguments)]
    fn make_ticket(
        customer_id: EntityId,
        order_id: Option<EntityId>,
        channel: &str,
        created_ts: DateTime<Utc>,
        issue_category: &str,
        severity: Severity,
        intensity: f64,
        rng: &mut GeneratorRng,
    ) -> SupportTicketRecord {
        let sla_target = severity.sla_target_hours();

        // Resolution time stretches under load, with log-normal noise.
        let load_multiplier = intensity.min(3.0);
        let resolution_hours = 0.7 * sla_target * load_multiplier * rng.lognormal(0.0, 0.5);

        let resolved = rng.chance(0.85);
        let mut sla_breach = resolution_hours > sla_target;
        if !resolved {
            sla_breach = true;
        }
        let sla_breach_hours = (resolution_hours - sla_target).max(0.0) as u32;

        let resolved_ts = resolved.then(|| created_ts + hours_f(resolution_hours));
        let first_response_ts = created_ts + hours_f(resolution_hours * 0.1);

        let csat = resolved_ts.map(|_| {
            if sla_breach {
                *rng.pick(&[(1u8, 0.4), (2, 0.4), (3, 0.2)])
            } else {
                *rng.pick(&[(3u8, 0.2), (4, 0.3), (5, 0.5)])
            }
        });

        // Automation takes over as load climbs.
        let agent_type = if intensity > 2.0 {
            *rng.pick(&[("chatbot", 0.6), ("human", 0.4)])
        } else {
            *rng.pick(&[("human", 0.7), ("chatbot", 0.3)])
        };

        let escalation_count = match severity {
            Severity::High | Severity::Critical => rng.int_between(0, 2) as u8,
            _ => 0,
        };

        let subs = subcategories(issue_category);
        SupportTicketRecord {
            ticket_id: rng.uuid().to_string(),
            customer_id,
            order_id,
            channel: channel.into(),
            language: "en".into(),
            issue_category: issue_category.into(),
            issue_subcategory: subs[rng.index_below(subs.len())].into(),
            severity,
            created_ts,
            first_response_ts,
            resolved_ts,
            sla_target_hours: sla_target,
            sla_breach,
            sla_breach_hours,
            csat,
            agent_id: format!("AGENT_{:03}", rng.int_between(1, 50)),
            agent_type: agent_type.into(),
            escalation_count,
            resolution_time_minutes: resolved_ts.map(|_| (resolution_hours * 60.0) as u32),
        }
    }
}

impl TableGenerator for SupportTicketGenerator {
    fn name(&self) -> &'static str {
        "support_ticket"
    }

    fn generate(
        &self,
        ctx: &GenContext,
        data: &mut Dataset,
        rng: &mut GeneratorRng,
    ) -> SimResult<()> {
        if data.customers.is_empty() || data.orders.is_empty() {
            return Ok(());
        }

        let intensity = ctx.scenario.intensity_multiplier;
        let order_correlation = ctx.scenario.correlation(Entity::Orders, Entity::SupportTickets);
        let expected = (data.orders.len() as f64
            * 0.12
            * intensity
            * order_correlation
            * Self::kind_multiplier(&ctx.scenario.kind)) as usize;

        let cohort_by_customer: HashMap<&str, Cohort> = data
            .customers
            .iter()
            .map(|c| (c.customer_id.as_str(), c.cohort))
            .collect();
        let orders_by_customer: HashMap<&str, Vec<usize>> = {
            let mut map: HashMap<&str, Vec<usize>> = HashMap::new();
            for (i, order) in data.orders.iter().enumerate() {
                map.entry(order.customer_id.as_str()).or_default().push(i);
            }
            map
        };

        // Pass 1: the guaranteed correlation with breached deliveries.
        // 90% of SLA-breached orders spawn a delivery ticket, timed one
        // to three days after the missed estimate.
        let mut tickets = Vec::new();
        for order in data.orders.iter().filter(|o| o.is_sla_breach) {
            if !rng.chance(0.9) {
                continue;
            }
            let cohort = cohort_by_customer
                .get(order.customer_id.as_str())
                .copied()
                .unwrap_or(Cohort::Millennial);
            let channel = Self::breach_channel(cohort, rng);
            let created_ts =
                order.expected_delivery_ts + Duration::days(rng.int_between(1, 3));
            tickets.push(Self::make_ticket(
                order.customer_id.clone(),
                Some(order.order_id.clone()),
                channel,
                created_ts,
                "delivery",
                Severity::Medium,
                intensity,
                rng,
            ));
        }

        // Pass 2: fill the remaining expected volume with tickets from
        // random customers, 70% of them linked to one of their orders.
        let residual = expected.saturating_sub(tickets.len());
        for _ in 0..residual {
            let customer = &data.customers[rng.index_below(data.customers.len())];
            let customer_id = customer.customer_id.clone();
            let cohort = customer.cohort;

            let order_id = if rng.chance(0.7) {
                orders_by_customer.get(customer_id.as_str()).map(|indices| {
                    data.orders[indices[rng.index_below(indices.len())]]
                        .order_id
                        .clone()
                })
            } else {
                None
            };

            let issue_category = Self::residual_category(&ctx.scenario.kind, rng);
            let channel = Self::residual_channel(cohort, rng);
            let severity = *rng.pick(&[
                (Severity::Low, 0.6),
                (Severity::Medium, 0.3),
                (Severity::High, 0.1),
            ]);
            let created_ts = ctx.start_ts
                + Duration::hours(rng.int_between(0, ctx.total_hours.saturating_sub(1) as i64))
                + Duration::minutes(rng.int_between(0, 59));

            tickets.push(Self::make_ticket(
                customer_id,
                order_id,
                channel,
                created_ts,
                issue_category,
                severity,
                intensity,
                rng,
            ));
        }

        data.support_tickets.extend(tickets);
        Ok(())
    }
}
