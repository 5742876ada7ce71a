//! Scenario configuration — the declarative description that drives a
//! generation run.
//!
//! Each scenario kind is a tagged variant with typed, documented knobs.
//! There is deliberately no free-form parameter bag: a mistyped knob is a
//! compile error or a serde error, never a silently ignored key.

use crate::{
    error::{SimError, SimResult},
    types::{Hour, ProductCategory},
};
use serde::{Deserialize, Serialize};

/// Endpoints of the correlation matrix. DeliveryDelays is not a table of
/// its own — it names the SLA-breach signal carried on orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Orders,
    SupportTickets,
    DeliveryDelays,
    CartAbandonment,
}

/// One heuristic correlation coefficient between an ordered entity pair.
/// These are volume-scaling knobs, not fitted statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationEntry {
    pub from: Entity,
    pub to: Entity,
    pub coefficient: f64,
}

/// The base correlation matrix applied when a config does not override a
/// pair.
pub fn base_correlations() -> Vec<CorrelationEntry> {
    use Entity::*;
    [
        (Orders, SupportTickets, 0.85),
        (SupportTickets, DeliveryDelays, 0.91),
        (Orders, DeliveryDelays, 0.72),
        (Orders, CartAbandonment, -0.43),
        (SupportTickets, CartAbandonment, -0.22),
        (DeliveryDelays, CartAbandonment, -0.15),
    ]
    .into_iter()
    .map(|(from, to, coefficient)| CorrelationEntry {
        from,
        to,
        coefficient,
    })
    .collect()
}

/// The named business situation being simulated. Variant fields carry the
/// scenario-specific knobs with their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "scenario", rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Steady-state traffic, no overlay.
    Baseline,
    /// Short, heavily discounted sale: traffic doubles every hour for the
    /// first four hours, then collapses to half the diurnal baseline.
    FlashSale {
        /// Campaign discount in percent (e.g. 70.0 for 70% off).
        #[serde(default = "default_discount_percent")]
        discount_percent: f64,
        /// Category the campaign targets.
        #[serde(default = "default_flash_category")]
        category: ProductCategory,
    },
    /// Payment gateway outage: order volume drops to 20% and payment
    /// failures jump to 70% inside the window (hours are inclusive).
    PaymentOutage {
        #[serde(default = "default_outage_start")]
        outage_start_hour: Hour,
        #[serde(default = "default_outage_end")]
        outage_end_hour: Hour,
    },
    /// Social-media spike: traffic grows exp(hour/3) for the first eight
    /// hours, then returns to the diurnal curve.
    ViralMoment {
        #[serde(default = "default_platform")]
        platform: String,
    },
    /// Post-holiday returns surge.
    ReturnsWave {
        #[serde(default = "default_return_multiplier")]
        return_rate_multiplier: f64,
    },
    /// Seasonal campaign window (e.g. back-to-school).
    SeasonalPlanning {
        #[serde(default = "default_season")]
        season: String,
    },
    /// Demographic drift: the gen-z cohort share grows by the given
    /// percentage points before renormalization.
    CustomerSegments {
        #[serde(default = "default_gen_z_growth")]
        gen_z_growth_percent: f64,
    },
}

fn default_discount_percent() -> f64 {
    50.0
}
fn default_flash_category() -> ProductCategory {
    ProductCategory::Electronics
}
fn default_outage_start() -> Hour {
    1
}
fn default_outage_end() -> Hour {
    3
}
fn default_platform() -> String {
    "tiktok".into()
}
fn default_return_multiplier() -> f64 {
    3.0
}
fn default_season() -> String {
    "back_to_school".into()
}
fn default_gen_z_growth() -> f64 {
    15.0
}

impl ScenarioKind {
    /// Stable scenario name, used in logs and output file naming.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::Baseline => "baseline",
            ScenarioKind::FlashSale { .. } => "flash_sale",
            ScenarioKind::PaymentOutage { .. } => "payment_outage",
            ScenarioKind::ViralMoment { .. } => "viral_moment",
            ScenarioKind::ReturnsWave { .. } => "returns_wave",
            ScenarioKind::SeasonalPlanning { .. } => "seasonal_planning",
            ScenarioKind::CustomerSegments { .. } => "customer_segments",
        }
    }

    /// Inclusive outage window, when this scenario has one.
    pub fn outage_window(&self) -> Option<(Hour, Hour)> {
        match self {
            ScenarioKind::PaymentOutage {
                outage_start_hour,
                outage_end_hour,
            } => Some((*outage_start_hour, *outage_end_hour)),
            _ => None,
        }
    }

    pub fn in_outage_window(&self, hour: Hour) -> bool {
        self.outage_window()
            .is_some_and(|(start, end)| hour >= start && hour <= end)
    }

    /// Category that should dominate product draws, when any.
    pub fn focus_category(&self) -> Option<ProductCategory> {
        match self {
            ScenarioKind::FlashSale { category, .. } => Some(*category),
            ScenarioKind::ViralMoment { .. } => Some(ProductCategory::Beauty),
            _ => None,
        }
    }
}

/// A complete generation run description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(flatten)]
    pub kind: ScenarioKind,
    /// Compact duration string, e.g. "4h", "14d", "90m", "2mo".
    #[serde(default = "default_duration")]
    pub duration: String,
    /// Scales overall event volume independent of time-of-day shape.
    #[serde(default = "default_intensity")]
    pub intensity_multiplier: f64,
    /// Base order rate before intensity and hourly shaping.
    #[serde(default = "default_orders_per_hour")]
    pub orders_per_hour: f64,
    #[serde(default = "default_customer_count")]
    pub customer_count: usize,
    #[serde(default = "default_product_count")]
    pub product_count: usize,
    /// Overrides for the base correlation matrix.
    #[serde(default)]
    pub correlations: Vec<CorrelationEntry>,
}

fn default_duration() -> String {
    "1d".into()
}
fn default_intensity() -> f64 {
    1.0
}
fn default_orders_per_hour() -> f64 {
    800.0
}
fn default_customer_count() -> usize {
    15_000
}
fn default_product_count() -> usize {
    2_500
}

impl ScenarioConfig {
    pub fn new(kind: ScenarioKind) -> Self {
        Self {
            kind,
            duration: default_duration(),
            intensity_multiplier: default_intensity(),
            orders_per_hour: default_orders_per_hour(),
            customer_count: default_customer_count(),
            product_count: default_product_count(),
            correlations: Vec::new(),
        }
    }

    /// Fail fast on configuration errors, before any generation begins.
    pub fn validate(&self) -> SimResult<()> {
        if !(self.intensity_multiplier > 0.0) {
            return Err(SimError::NonPositiveIntensity {
                value: self.intensity_multiplier,
            });
        }
        parse_duration_hours(&self.duration)?;
        for entry in &self.correlations {
            if !entry.coefficient.is_finite() || entry.coefficient.abs() > 1.0 {
                return Err(SimError::CorrelationOutOfRange {
                    coefficient: entry.coefficient,
                });
            }
        }
        Ok(())
    }

    /// Coefficient for an ordered entity pair. Config overrides win over
    /// the base matrix; an unknown pair reads as uncorrelated.
    pub fn correlation(&self, from: Entity, to: Entity) -> f64 {
        self.correlations
            .iter()
            .chain(base_correlations().iter())
            .find(|e| e.from == from && e.to == to)
            .map(|e| e.coefficient)
            .unwrap_or(0.0)
    }

    /// Total whole hours in the generation window.
    pub fn total_hours(&self) -> SimResult<Hour> {
        parse_duration_hours(&self.duration)
    }

    /// Named preset catalog. Mirrors the scenarios the runner exposes.
    pub fn preset(name: &str) -> Option<ScenarioConfig> {
        let config = match name {
            "baseline" => {
                let mut c = ScenarioConfig::new(ScenarioKind::Baseline);
                c.duration = "30d".into();
                c
            }
            "flash_sale" => {
                let mut c = ScenarioConfig::new(ScenarioKind::FlashSale {
                    discount_percent: 70.0,
                    category: ProductCategory::Electronics,
                });
                c.duration = "4h".into();
                c.intensity_multiplier = 8.5;
                c.orders_per_hour = 1000.0;
                c
            }
            "payment_outage" => {
                let mut c = ScenarioConfig::new(ScenarioKind::PaymentOutage {
                    outage_start_hour: default_outage_start(),
                    outage_end_hour: default_outage_end(),
                });
                c.duration = "6h".into();
                c.intensity_multiplier = 1.5;
                c
            }
            "viral_moment" => {
                let mut c = ScenarioConfig::new(ScenarioKind::ViralMoment {
                    platform: default_platform(),
                });
                c.duration = "24h".into();
                c.intensity_multiplier = 2.5;
                c
            }
            "returns_wave" => {
                let mut c = ScenarioConfig::new(ScenarioKind::ReturnsWave {
                    return_rate_multiplier: 3.0,
                });
                c.duration = "14d".into();
                c.intensity_multiplier = 1.2;
                c
            }
            "seasonal_planning" => {
                let mut c = ScenarioConfig::new(ScenarioKind::SeasonalPlanning {
                    season: default_season(),
                });
                c.duration = "60d".into();
                c.intensity_multiplier = 1.8;
                c
            }
            "customer_segments" => {
                let mut c = ScenarioConfig::new(ScenarioKind::CustomerSegments {
                    gen_z_growth_percent: 15.0,
                });
                c.duration = "180d".into();
                c
            }
            // Config-only scenarios: no generator branches on these, the
            // duration and intensity are the whole story.
            "supply_disruption" => {
                let mut c = ScenarioConfig::new(ScenarioKind::Baseline);
                c.duration = "14d".into();
                c.intensity_multiplier = 0.8;
                c
            }
            "multi_channel" => {
                let mut c = ScenarioConfig::new(ScenarioKind::Baseline);
                c.duration = "90d".into();
                c.intensity_multiplier = 1.18;
                c
            }
            _ => return None,
        };
        Some(config)
    }

    pub fn preset_names() -> [&'static str; 9] {
        [
            "baseline",
            "flash_sale",
            "payment_outage",
            "viral_moment",
            "returns_wave",
            "seasonal_planning",
            "customer_segments",
            "supply_disruption",
            "multi_channel",
        ]
    }

    /// Load a custom scenario from JSON (the runner's --config path).
    pub fn from_json(json: &str) -> SimResult<ScenarioConfig> {
        let config: ScenarioConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Parse a compact duration string into whole hours.
///
/// Grammar: `<int><unit>` with unit `h` (hours), `d` (days), `m` (minutes,
/// rounded up to a whole hour), or `mo` (months of 30 days). A trailing
/// bare `m` always means minutes here; the ambiguity in earlier tooling
/// that read it as months is resolved by the explicit `mo` token.
/// Valid input always yields at least 1 hour.
pub fn parse_duration_hours(input: &str) -> SimResult<Hour> {
    let s = input.trim();
    let err = || SimError::InvalidDuration {
        input: input.to_string(),
    };

    let digits_end = s
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(err)?;
    let (digits, unit) = s.split_at(digits_end);
    let n: u64 = digits.parse().map_err(|_| err())?;
    if n == 0 {
        return Err(err());
    }

    let hours = match unit {
        "h" => n,
        "d" => n * 24,
        "mo" => n * 24 * 30,
        "m" => (n + 59) / 60,
        _ => return Err(err()),
    };
    Ok(hours.max(1))
}
