//! Hourly system metrics generator.
//!
//! Emits one row per metric per simulated hour. Order and ticket rates
//! track the same intensity and correlation inputs the row generators
//! use, so the metrics stay consistent with the tables they describe.

use crate::{
    dataset::Dataset,
    error::SimResult,
    generator::{GenContext, TableGenerator},
    intensity::hourly_multiplier,
    rng::GeneratorRng,
    scenario::Entity,
    types::EntityId,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemMetricRecord {
    pub metric_id: EntityId,
    pub timestamp: DateTime<Utc>,
    pub metric_name: String,
    pub metric_value: f64,
    pub campaign_id: Option<EntityId>,
}

const METRIC_NAMES: [&str; 6] = [
    "orders_per_hour",
    "support_tickets_per_hour",
    "payment_failure_rate",
    "site_load_time",
    "inventory_turnover",
    "cart_abandonment_rate",
];

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

pub struct SystemMetricsGenerator;

impl TableGenerator for SystemMetricsGenerator {
    fn name(&self) -> &'static str {
        "system_metrics"
    }

    fn generate(
        &self,
        ctx: &GenContext,
        data: &mut Dataset,
        rng: &mut GeneratorRng,
    ) -> SimResult<()> {
        let scenario = &ctx.scenario;
        let intensity = scenario.intensity_multiplier;
        let ticket_correlation = scenario.correlation(Entity::Orders, Entity::SupportTickets);
        let abandon_correlation = scenario.correlation(Entity::Orders, Entity::CartAbandonment);
        let campaign_id = data.campaigns.first().map(|c| c.campaign_id.clone());

        data.system_metrics
            .reserve(ctx.total_hours as usize * METRIC_NAMES.len());

        for hour in 0..ctx.total_hours {
            let timestamp = ctx.start_ts + Duration::hours(hour as i64);
            for metric_name in METRIC_NAMES {
                let value = match metric_name {
                    "orders_per_hour" => {
                        800.0 * intensity * hourly_multiplier(hour, &scenario.kind)
                    }
                    "support_tickets_per_hour" => 100.0 * intensity * ticket_correlation,
                    "payment_failure_rate" => {
                        if scenario.kind.in_outage_window(hour) {
                            0.75
                        } else {
                            0.05
                        }
                    }
                    "site_load_time" => 2.5 * intensity.min(5.0),
                    "cart_abandonment_rate" => {
                        (0.25 * (1.0 + (intensity - 1.0) * abandon_correlation)).max(0.05)
                    }
                    _ => rng.uniform(2.0, 8.0),
                };

                data.system_metrics.push(SystemMetricRecord {
                    metric_id: rng.uuid().to_string(),
                    timestamp,
                    metric_name: metric_name.into(),
                    metric_value: round3(value),
                    campaign_id: campaign_id.clone(),
                });
            }
        }

        Ok(())
    }
}
