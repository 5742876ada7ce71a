//! Shared primitive and domain types used across the entire generator.

use serde::{Deserialize, Serialize};

/// A simulated hour offset from the scenario start. Hour 0 is the first
/// hour of the generation window.
pub type Hour = u64;

/// A stable, unique identifier for any generated entity.
pub type EntityId = String;

/// Customer demographic cohort. Drives channel, payment, and
/// price-sensitivity distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cohort {
    GenZ,
    Millennial,
    GenX,
    Boomer,
}

impl Cohort {
    pub const ALL: [Cohort; 4] = [
        Cohort::GenZ,
        Cohort::Millennial,
        Cohort::GenX,
        Cohort::Boomer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Cohort::GenZ => "gen_z",
            Cohort::Millennial => "millennial",
            Cohort::GenX => "gen_x",
            Cohort::Boomer => "boomer",
        }
    }
}

/// Product catalog category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Electronics,
    Clothing,
    Home,
    Beauty,
    Books,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 5] = [
        ProductCategory::Electronics,
        ProductCategory::Clothing,
        ProductCategory::Home,
        ProductCategory::Beauty,
        ProductCategory::Books,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Electronics => "electronics",
            ProductCategory::Clothing => "clothing",
            ProductCategory::Home => "home",
            ProductCategory::Beauty => "beauty",
            ProductCategory::Books => "books",
        }
    }

    /// Two-letter SKU prefix.
    pub fn sku_prefix(&self) -> &'static str {
        match self {
            ProductCategory::Electronics => "EL",
            ProductCategory::Clothing => "CL",
            ProductCategory::Home => "HO",
            ProductCategory::Beauty => "BE",
            ProductCategory::Books => "BO",
        }
    }
}

/// Support ticket severity. Determines the SLA resolution target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// SLA resolution target in hours.
    pub fn sla_target_hours(&self) -> f64 {
        match self {
            Severity::Low => 24.0,
            Severity::Medium => 8.0,
            Severity::High => 2.0,
            Severity::Critical => 1.0,
        }
    }
}

/// Terminal order status. Payment failure forces Cancelled; otherwise the
/// status is drawn once at creation and never updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Delivered,
    Shipped,
    Processing,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Success,
    Failed,
}

/// Round a monetary amount to whole cents.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
