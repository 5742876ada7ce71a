//! Order generation engine.
//!
//! For each simulated hour, order volume is
//!   round(orders_per_hour x intensity x hourly_multiplier)
//! with the payment-outage scenario additionally cutting volume to 20%
//! inside its window. Per-order attributes are sampled from cohort- and
//! scenario-conditioned distributions; each order emits exactly one
//! correlated order-item row.
//!
//! Order state machine: created -> cancelled (payment failure, terminal)
//! or a single probabilistic terminal status. Non-delivered orders carry
//! no delivery timestamp, no SLA breach, and zero delay.

use crate::{
    dataset::Dataset,
    error::SimResult,
    generator::{GenContext, TableGenerator},
    intensity::hourly_multiplier,
    rng::GeneratorRng,
    types::{round_cents, Cohort, EntityId, Hour, OrderStatus, PaymentStatus},
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: EntityId,
    pub customer_id: EntityId,
    pub campaign_id: Option<EntityId>,
    pub order_ts: DateTime<Utc>,
    pub channel: String,
    pub session_id: EntityId,
    pub payment_type: String,
    pub payment_status: PaymentStatus,
    /// None on successful payment — a true null, never a sentinel string.
    pub payment_failure_reason: Option<String>,
    pub order_status: OrderStatus,
    pub subtotal: f64,
    pub discount: f64,
    pub tax: f64,
    pub shipping_cost: f64,
    pub total_amount: f64,
    pub warehouse_id: String,
    pub expected_delivery_ts: DateTime<Utc>,
    pub actual_delivery_ts: Option<DateTime<Utc>>,
    pub is_sla_breach: bool,
    pub delivery_delay_hours: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemRecord {
    pub order_item_id: EntityId,
    pub order_id: EntityId,
    pub product_id: EntityId,
    pub sku: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub discount_per_unit: f64,
    pub total_price: f64,
}

pub struct OrderGenerator;

impl OrderGenerator {
    /// Order volume for one hour, after intensity, time-of-day shaping,
    /// and the outage volume cut.
    pub fn orders_for_hour(ctx: &GenContext, hour: Hour) -> u64 {
        let scenario = &ctx.scenario;
        let shaped = scenario.orders_per_hour
            * scenario.intensity_multiplier
            * hourly_multiplier(hour, &scenario.kind);
        let mut count = shaped.round();
        if scenario.kind.in_outage_window(hour) {
            count = (count * 0.2).round();
        }
        count.max(0.0) as u64
    }

    fn pick_order_channel(cohort: Cohort, rng: &mut GeneratorRng) -> &'static str {
        match cohort {
            Cohort::GenZ => *rng.pick(&[
                ("mobile_app", 0.5),
                ("mobile_web", 0.3),
                ("web", 0.2),
            ]),
            Cohort::Boomer => *rng.pick(&[("web", 0.7), ("mobile_web", 0.3)]),
            _ => *rng.pick(&[
                ("web", 0.4),
                ("mobile_web", 0.35),
                ("mobile_app", 0.25),
            ]),
        }
    }

    fn pick_payment_type(cohort: Cohort, rng: &mut GeneratorRng) -> &'static str {
        match cohort {
            Cohort::GenZ => *rng.pick(&[("card", 0.4), ("bnpl", 0.4), ("upi", 0.2)]),
            _ => *rng.pick(&[("card", 0.6), ("upi", 0.25), ("cod", 0.15)]),
        }
    }

    /// Payment outcome: 70% failure inside an outage window (gateway
    /// down), 5% baseline failure otherwise.
    fn payment_outcome(
        in_outage: bool,
        rng: &mut GeneratorRng,
    ) -> (PaymentStatus, Option<String>) {
        if in_outage {
            if rng.chance(0.7) {
                (PaymentStatus::Failed, Some("gateway_down".into()))
            } else {
                (PaymentStatus::Success, None)
            }
        } else if rng.chance(0.05) {
            let reason = if rng.chance(0.5) {
                "insufficient_funds"
            } else {
                "expired_card"
            };
            (PaymentStatus::Failed, Some(reason.into()))
        } else {
            (PaymentStatus::Success, None)
        }
    }
}

impl TableGenerator for OrderGenerator {
    fn name(&self) -> &'static str {
        "order"
    }

    fn generate(
        &self,
        ctx: &GenContext,
        data: &mut Dataset,
        rng: &mut GeneratorRng,
    ) -> SimResult<()> {
        if data.customers.is_empty() || data.products.is_empty() {
            log::warn!("order: empty customer or product table, generating no orders");
            return Ok(());
        }

        let campaign = data.campaigns.first().cloned();
        // Product indices inside the campaign's target categories. An
        // empty filter falls back to the unfiltered catalog.
        let campaign_pool: Vec<usize> = campaign
            .as_ref()
            .map(|c| {
                (0..data.products.len())
                    .filter(|&i| c.targets(data.products[i].category))
                    .collect()
            })
            .unwrap_or_default();

        let intensity = ctx.scenario.intensity_multiplier;
        let sla_breach_prob = 0.05 * intensity;

        for hour in 0..ctx.total_hours {
            let count = Self::orders_for_hour(ctx, hour);
            let hour_start = ctx.start_ts + Duration::hours(hour as i64);
            let in_outage = ctx.scenario.kind.in_outage_window(hour);
            if in_outage {
                log::debug!("hour={hour} order: outage window, volume cut to 20%");
            }

            for _ in 0..count {
                let order_ts = hour_start + Duration::minutes(rng.int_between(0, 59));

                let customer = &data.customers[rng.index_below(data.customers.len())];
                let customer_id = customer.customer_id.clone();
                let cohort = customer.cohort;

                let channel = Self::pick_order_channel(cohort, rng);
                let payment_type = Self::pick_payment_type(cohort, rng);
                let (payment_status, payment_failure_reason) =
                    Self::payment_outcome(in_outage, rng);

                // Campaign-weighted product draw.
                let product_idx = if campaign.is_some() && !campaign_pool.is_empty() {
                    campaign_pool[rng.index_below(campaign_pool.len())]
                } else {
                    rng.index_below(data.products.len())
                };
                let product = &data.products[product_idx];
                let product_id = product.product_id.clone();
                let sku = product.sku.clone();
                let unit_price = product.price;
                let category = product.category;

                let quantity = *rng.pick(&[(1u32, 0.6), (2, 0.25), (3, 0.10), (4, 0.05)]);

                // Discount applies only when the campaign targets the
                // chosen product's category.
                let discount_per_unit = match &campaign {
                    Some(c) if c.targets(category) => {
                        round_cents(unit_price * c.discount_rate)
                    }
                    _ => 0.0,
                };
                let campaign_id = campaign.as_ref().map(|c| c.campaign_id.clone());

                let subtotal = round_cents(quantity as f64 * unit_price);
                let discount = round_cents(quantity as f64 * discount_per_unit);
                let tax = round_cents((subtotal - discount) * 0.08);
                let shipping_cost = if subtotal < 50.0 { 5.99 } else { 0.0 };
                let total_amount = round_cents(subtotal - discount + tax + shipping_cost);

                let expected_delivery_ts = order_ts + Duration::days(rng.int_between(1, 3));

                // Delivery outcome: breach probability rises with
                // intensity; the non-breach path jitters around the
                // estimate.
                let (mut actual_delivery_ts, mut is_sla_breach, mut delivery_delay_hours) =
                    if rng.chance(sla_breach_prob) {
                        let delay = rng.int_between(12, 72) as u32;
                        (
                            Some(expected_delivery_ts + Duration::hours(delay as i64)),
                            true,
                            delay,
                        )
                    } else {
                        (
                            Some(expected_delivery_ts + Duration::hours(rng.int_between(-6, 6))),
                            false,
                            0,
                        )
                    };

                let order_status = if payment_status == PaymentStatus::Failed {
                    OrderStatus::Cancelled
                } else {
                    *rng.pick(&[
                        (OrderStatus::Delivered, 0.85),
                        (OrderStatus::Shipped, 0.10),
                        (OrderStatus::Processing, 0.03),
                        (OrderStatus::Cancelled, 0.02),
                    ])
                };

                // Only delivered orders carry delivery outcome fields.
                if order_status != OrderStatus::Delivered {
                    actual_delivery_ts = None;
                    is_sla_breach = false;
                    delivery_delay_hours = 0;
                }

                let order_id = rng.uuid().to_string();

                data.order_items.push(OrderItemRecord {
                    order_item_id: rng.uuid().to_string(),
                    order_id: order_id.clone(),
                    product_id,
                    sku,
                    quantity,
                    unit_price,
                    discount_per_unit,
                    total_price: round_cents(
                        (unit_price - discount_per_unit) * quantity as f64,
                    ),
                });

                data.orders.push(OrderRecord {
                    order_id,
                    customer_id,
                    campaign_id,
                    order_ts,
                    channel: channel.into(),
                    session_id: rng.uuid().to_string(),
                    payment_type: payment_type.into(),
                    payment_status,
                    payment_failure_reason,
                    order_status,
                    subtotal,
                    discount,
                    tax,
                    shipping_cost,
                    total_amount,
                    warehouse_id: format!("WH_{:02}", rng.int_between(1, 5)),
                    expected_delivery_ts,
                    actual_delivery_ts,
                    is_sla_breach,
                    delivery_delay_hours,
                });
            }
        }

        Ok(())
    }
}
