//! Customer table generator.
//!
//! Customers are created once per run and never mutated afterwards.
//! Cohort membership drives every downstream cohort-conditioned
//! distribution (order channel, payment type, support channel).

use crate::{
    dataset::Dataset,
    error::SimResult,
    generator::{GenContext, TableGenerator},
    rng::GeneratorRng,
    scenario::ScenarioKind,
    types::{Cohort, EntityId},
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

const ACQUISITION_CHANNELS: [&str; 5] =
    ["organic", "paid_social", "influencer", "referral", "direct"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_id: EntityId,
    pub created_at: DateTime<Utc>,
    pub cohort: Cohort,
    pub acquisition_channel: String,
    pub loyalty_tier: String,
    pub price_sensitivity: f64,
    pub lifetime_value: f64,
}

pub struct CustomerGenerator;

impl CustomerGenerator {
    /// Cohort weights, shifted toward gen-z under the segment-drift
    /// scenario and renormalized.
    fn cohort_weights(kind: &ScenarioKind) -> [(Cohort, f64); 4] {
        let mut weights = [
            (Cohort::GenZ, 0.28),
            (Cohort::Millennial, 0.35),
            (Cohort::GenX, 0.25),
            (Cohort::Boomer, 0.12),
        ];
        if let ScenarioKind::CustomerSegments {
            gen_z_growth_percent,
        } = kind
        {
            weights[0].1 += gen_z_growth_percent / 100.0;
            let total: f64 = weights.iter().map(|(_, w)| w).sum();
            for (_, w) in &mut weights {
                *w /= total;
            }
        }
        weights
    }

    fn pick_channel(cohort: Cohort, rng: &mut GeneratorRng) -> &'static str {
        match cohort {
            Cohort::GenZ => *rng.pick(&[
                ("paid_social", 0.4),
                ("influencer", 0.35),
                ("organic", 0.25),
            ]),
            Cohort::Boomer => {
                *rng.pick(&[("direct", 0.5), ("organic", 0.3), ("referral", 0.2)])
            }
            _ => ACQUISITION_CHANNELS[rng.index_below(ACQUISITION_CHANNELS.len())],
        }
    }

    fn price_sensitivity(cohort: Cohort, rng: &mut GeneratorRng) -> f64 {
        match cohort {
            Cohort::GenZ => rng.beta(2.0, 5.0),
            Cohort::Boomer => rng.beta(5.0, 2.0),
            _ => rng.beta(3.0, 3.0),
        }
    }
}

impl TableGenerator for CustomerGenerator {
    fn name(&self) -> &'static str {
        "customer"
    }

    fn generate(
        &self,
        ctx: &GenContext,
        data: &mut Dataset,
        rng: &mut GeneratorRng,
    ) -> SimResult<()> {
        let weights = Self::cohort_weights(&ctx.scenario.kind);
        let count = ctx.scenario.customer_count;
        data.customers.reserve(count);

        // Account ages span the two years before the run start.
        let two_years_minutes: i64 = 2 * 365 * 24 * 60;

        for _ in 0..count {
            let cohort = *rng.pick(&weights);
            let created_at =
                ctx.start_ts - Duration::minutes(rng.int_between(0, two_years_minutes));
            let acquisition_channel = Self::pick_channel(cohort, rng).to_string();
            let loyalty_tier = rng
                .pick(&[
                    ("Bronze", 0.5),
                    ("Silver", 0.3),
                    ("Gold", 0.15),
                    ("Platinum", 0.05),
                ])
                .to_string();

            data.customers.push(CustomerRecord {
                customer_id: rng.uuid().to_string(),
                created_at,
                cohort,
                acquisition_channel,
                loyalty_tier,
                price_sensitivity: Self::price_sensitivity(cohort, rng),
                lifetime_value: rng.lognormal(4.0, 1.0),
            });
        }

        Ok(())
    }
}
