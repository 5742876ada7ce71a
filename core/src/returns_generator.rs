//! Returns generator.
//!
//! Only delivered orders can be returned. A distinct sample of delivered
//! orders is drawn at the scenario's return rate, and every line item of
//! a sampled order produces one return row with a category-conditioned
//! reason.

use crate::{
    dataset::Dataset,
    error::SimResult,
    generator::{GenContext, TableGenerator},
    rng::GeneratorRng,
    scenario::ScenarioKind,
    types::{round_cents, EntityId, OrderStatus, ProductCategory},
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnRecord {
    pub return_id: EntityId,
    pub order_id: EntityId,
    pub customer_id: EntityId,
    pub product_id: EntityId,
    pub return_reason: String,
    pub return_ts: DateTime<Utc>,
    /// None until the return clears the approved/requested states.
    pub processed_ts: Option<DateTime<Utc>>,
    pub refund_amount: f64,
    pub return_status: String,
    pub processing_days: u32,
}

pub struct ReturnsGenerator;

impl ReturnsGenerator {
    fn return_rate(kind: &ScenarioKind) -> f64 {
        match kind {
            ScenarioKind::ReturnsWave {
                return_rate_multiplier,
            } => 0.08 * return_rate_multiplier,
            _ => 0.08,
        }
    }

    fn reason_for(category: Option<ProductCategory>, rng: &mut GeneratorRng) -> &'static str {
        match category {
            Some(ProductCategory::Clothing) => *rng.pick(&[
                ("wrong_size", 0.4),
                ("not_as_described", 0.3),
                ("changed_mind", 0.2),
                ("defective", 0.1),
            ]),
            Some(ProductCategory::Electronics) => *rng.pick(&[
                ("defective", 0.5),
                ("not_as_described", 0.3),
                ("changed_mind", 0.2),
            ]),
            _ => *rng.pick(&[
                ("not_as_described", 0.3),
                ("defective", 0.3),
                ("changed_mind", 0.25),
                ("damaged_in_shipping", 0.15),
            ]),
        }
    }

    /// Distinct sample of `count` indices via a partial Fisher-Yates
    /// shuffle.
    fn sample_indices(len: usize, count: usize, rng: &mut GeneratorRng) -> Vec<usize> {
        let count = count.min(len);
        let mut indices: Vec<usize> = (0..len).collect();
        for i in 0..count {
            let j = i + rng.index_below(len - i);
            indices.swap(i, j);
        }
        indices.truncate(count);
        indices
    }
}

impl TableGenerator for ReturnsGenerator {
    fn name(&self) -> &'static str {
        "returns"
    }

    fn generate(
        &self,
        ctx: &GenContext,
        data: &mut Dataset,
        rng: &mut GeneratorRng,
    ) -> SimResult<()> {
        let delivered: Vec<usize> = data
            .orders
            .iter()
            .enumerate()
            .filter(|(_, o)| o.order_status == OrderStatus::Delivered)
            .map(|(i, _)| i)
            .collect();
        if delivered.is_empty() {
            return Ok(());
        }

        let rate = Self::return_rate(&ctx.scenario.kind);
        let returns_count = (delivered.len() as f64 * rate) as usize;
        let sampled = Self::sample_indices(delivered.len(), returns_count, rng);

        let category_by_product: HashMap<&str, ProductCategory> = data
            .products
            .iter()
            .map(|p| (p.product_id.as_str(), p.category))
            .collect();
        let items_by_order: HashMap<&str, Vec<usize>> = {
            let mut map: HashMap<&str, Vec<usize>> = HashMap::new();
            for (i, item) in data.order_items.iter().enumerate() {
                map.entry(item.order_id.as_str()).or_default().push(i);
            }
            map
        };

        let returns_wave = matches!(ctx.scenario.kind, ScenarioKind::ReturnsWave { .. });
        let mut returns = Vec::new();

        for slot in sampled {
            let order = &data.orders[delivered[slot]];

            let return_ts = match order.actual_delivery_ts {
                Some(delivered_ts) => delivered_ts + Duration::days(rng.int_between(1, 14)),
                None => order.order_ts + Duration::days(rng.int_between(3, 21)),
            };

            let item_indices = match items_by_order.get(order.order_id.as_str()) {
                Some(indices) => indices,
                None => continue,
            };

            for &item_idx in item_indices {
                let item = &data.order_items[item_idx];
                let category = category_by_product.get(item.product_id.as_str()).copied();
                let return_reason = Self::reason_for(category, rng);

                // Backlogs stretch processing during a returns wave.
                let processing_days = 3 + if returns_wave {
                    rng.int_between(2, 10) as u32
                } else {
                    rng.int_between(0, 4) as u32
                };

                let (return_status, processed_ts) = if rng.chance(0.9) {
                    let status = *rng.pick(&[("processed", 0.3), ("refunded", 0.7)]);
                    (status, Some(return_ts + Duration::days(processing_days as i64)))
                } else if rng.chance(0.5) {
                    ("approved", None)
                } else {
                    ("requested", None)
                };

                returns.push(ReturnRecord {
                    return_id: rng.uuid().to_string(),
                    order_id: order.order_id.clone(),
                    customer_id: order.customer_id.clone(),
                    product_id: item.product_id.clone(),
                    return_reason: return_reason.into(),
                    return_ts,
                    processed_ts,
                    refund_amount: round_cents(item.total_price * 0.95),
                    return_status: return_status.into(),
                    processing_days,
                });
            }
        }

        data.returns.extend(returns);
        Ok(())
    }
}
