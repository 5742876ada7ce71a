//! Marketing campaign generator.
//!
//! At most one campaign exists per run, and only for the scenario kinds
//! that imply one. Orders reference it by id (nullable).

use crate::{
    dataset::Dataset,
    error::SimResult,
    generator::{GenContext, TableGenerator},
    rng::GeneratorRng,
    scenario::ScenarioKind,
    types::{EntityId, ProductCategory},
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub campaign_id: EntityId,
    pub name: String,
    pub campaign_type: String,
    pub start_ts: DateTime<Utc>,
    pub end_ts: DateTime<Utc>,
    /// Discount as a fraction in [0, 1].
    pub discount_rate: f64,
    pub target_categories: Vec<ProductCategory>,
    pub intensity_multiplier: f64,
}

impl CampaignRecord {
    pub fn targets(&self, category: ProductCategory) -> bool {
        self.target_categories.contains(&category)
    }
}

fn title_case(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct CampaignGenerator;

impl TableGenerator for CampaignGenerator {
    fn name(&self) -> &'static str {
        "campaign"
    }

    fn generate(
        &self,
        ctx: &GenContext,
        data: &mut Dataset,
        rng: &mut GeneratorRng,
    ) -> SimResult<()> {
        let start = ctx.start_ts;
        let window_end = start + Duration::hours(ctx.total_hours as i64);

        let campaign = match &ctx.scenario.kind {
            ScenarioKind::FlashSale {
                discount_percent,
                category,
            } => Some(CampaignRecord {
                campaign_id: rng.uuid().to_string(),
                name: format!(
                    "Flash Sale {} {discount_percent:.0}% Off",
                    title_case(category.as_str())
                ),
                campaign_type: "flash_sale".into(),
                start_ts: start,
                end_ts: window_end,
                discount_rate: discount_percent / 100.0,
                target_categories: vec![*category],
                intensity_multiplier: ctx.scenario.intensity_multiplier,
            }),
            ScenarioKind::ViralMoment { platform } => Some(CampaignRecord {
                campaign_id: rng.uuid().to_string(),
                name: format!("Viral {} Campaign", title_case(platform)),
                campaign_type: "influencer".into(),
                start_ts: start,
                end_ts: start + Duration::hours(24),
                discount_rate: 0.0,
                target_categories: vec![ProductCategory::Beauty],
                intensity_multiplier: ctx.scenario.intensity_multiplier,
            }),
            ScenarioKind::SeasonalPlanning { season } => Some(CampaignRecord {
                campaign_id: rng.uuid().to_string(),
                name: title_case(season),
                campaign_type: "seasonal".into(),
                start_ts: start,
                end_ts: window_end,
                discount_rate: 0.15,
                target_categories: vec![
                    ProductCategory::Electronics,
                    ProductCategory::Clothing,
                    ProductCategory::Books,
                ],
                intensity_multiplier: ctx.scenario.intensity_multiplier,
            }),
            _ => None,
        };

        if let Some(campaign) = campaign {
            data.campaigns.push(campaign);
        }
        Ok(())
    }
}
