//! Cart abandonment generator.
//!
//! Abandonment moves inversely to order intensity: the busier the store,
//! the smaller the abandoned share of sessions. Session volume is reverse
//! engineered from completed orders so the abandoned count stays
//! consistent with the order table.

use crate::{
    dataset::Dataset,
    error::SimResult,
    generator::{GenContext, TableGenerator},
    rng::GeneratorRng,
    scenario::{Entity, ScenarioKind},
    types::{round_cents, Cohort, EntityId},
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartAbandonmentRecord {
    pub abandonment_id: EntityId,
    pub session_id: EntityId,
    /// None for anonymous sessions (~40%).
    pub customer_id: Option<EntityId>,
    pub abandon_ts: DateTime<Utc>,
    pub cart_value: f64,
    pub items_count: u32,
    pub abandon_stage: String,
    pub abandon_reason: String,
    pub channel: String,
}

pub struct CartAbandonmentGenerator;

impl CartAbandonmentGenerator {
    /// Abandonment rate after the intensity correlation, clamped to
    /// [5%, 95%]. The upper clamp keeps the session reverse-engineering
    /// finite: a rate of 1.0 would divide order volume by zero.
    pub fn abandonment_rate(ctx: &GenContext) -> f64 {
        let corr = ctx
            .scenario
            .correlation(Entity::Orders, Entity::CartAbandonment);
        let adjusted = 0.25 * (1.0 + (ctx.scenario.intensity_multiplier - 1.0) * corr);
        adjusted.clamp(0.05, 0.95)
    }

    fn channel_for(cohort: Cohort, rng: &mut GeneratorRng) -> &'static str {
        match cohort {
            Cohort::GenZ => *rng.pick(&[("mobile_app", 0.6), ("mobile_web", 0.4)]),
            _ => *rng.pick(&[("web", 0.5), ("mobile_web", 0.3), ("mobile_app", 0.2)]),
        }
    }
}

impl TableGenerator for CartAbandonmentGenerator {
    fn name(&self) -> &'static str {
        "cart_abandonment"
    }

    fn generate(
        &self,
        ctx: &GenContext,
        data: &mut Dataset,
        rng: &mut GeneratorRng,
    ) -> SimResult<()> {
        if data.customers.is_empty() || data.products.is_empty() || data.orders.is_empty() {
            return Ok(());
        }

        let rate = Self::abandonment_rate(ctx);
        // Sessions = orders / (1 - rate), so count stays proportional to
        // realized order volume.
        let sessions = (data.orders.len() as f64 / (1.0 - rate)) as usize;
        let mut count = ((sessions as f64) * rate) as usize;

        match &ctx.scenario.kind {
            ScenarioKind::PaymentOutage { .. } => {
                log::debug!("cart_abandonment: outage spike, volume x3.5");
                count = (count as f64 * 3.5) as usize;
            }
            ScenarioKind::FlashSale { .. } => {
                log::debug!("cart_abandonment: flash-sale urgency, volume x0.4");
                count = (count as f64 * 0.4) as usize;
            }
            _ => {}
        }

        let is_outage = matches!(ctx.scenario.kind, ScenarioKind::PaymentOutage { .. });
        let window_hours = ctx.total_hours as f64;
        data.cart_abandonment.reserve(count);

        for _ in 0..count {
            let (customer_id, cohort) = if rng.chance(0.6) {
                let customer = &data.customers[rng.index_below(data.customers.len())];
                (Some(customer.customer_id.clone()), customer.cohort)
            } else {
                (None, Cohort::ALL[rng.index_below(Cohort::ALL.len())])
            };
            let channel = Self::channel_for(cohort, rng);

            let (abandon_stage, abandon_reason): (&str, &str) = if is_outage {
                let stage = *rng.pick(&[("payment", 0.7), ("checkout", 0.2), ("cart", 0.1)]);
                let reason = if stage == "payment" {
                    "payment_failed"
                } else {
                    "technical_issue"
                };
                (stage, reason)
            } else {
                let stage = *rng.pick(&[("cart", 0.5), ("checkout", 0.3), ("payment", 0.2)]);
                let reasons = [
                    "high_shipping",
                    "price_shopping",
                    "no_payment_method",
                    "slow_site",
                    "other",
                ];
                (stage, reasons[rng.index_below(reasons.len())])
            };

            let items_count = *rng.pick(&[
                (1u32, 0.40),
                (2, 0.25),
                (3, 0.15),
                (4, 0.12),
                (5, 0.08),
            ]);
            let mut cart_value = 0.0;
            for _ in 0..items_count {
                let price = data.products[rng.index_below(data.products.len())].price;
                cart_value += price * rng.int_between(1, 2) as f64;
            }

            let abandon_ts = ctx.start_ts
                + Duration::seconds((rng.uniform(0.0, window_hours) * 3600.0) as i64);

            data.cart_abandonment.push(CartAbandonmentRecord {
                abandonment_id: rng.uuid().to_string(),
                session_id: rng.uuid().to_string(),
                customer_id,
                abandon_ts,
                cart_value: round_cents(cart_value),
                items_count,
                abandon_stage: abandon_stage.into(),
                abandon_reason: abandon_reason.into(),
                channel: channel.into(),
            });
        }

        Ok(())
    }
}
