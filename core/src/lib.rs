//! shopgen-core: scenario-driven e-commerce dataset generation.
//!
//! A run takes one [`scenario::ScenarioConfig`] and a master seed, and
//! produces a correlated set of tables (customers through system
//! metrics) in a [`dataset::Dataset`]. The same seed and scenario always
//! produce byte-identical output.

pub mod abandonment_generator;
pub mod campaign_generator;
pub mod customer_generator;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod generator;
pub mod intensity;
pub mod metrics_generator;
pub mod order_generator;
pub mod product_generator;
pub mod returns_generator;
pub mod rng;
pub mod scenario;
pub mod supplier_generator;
pub mod ticket_generator;
pub mod types;
