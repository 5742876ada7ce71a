//! Table generator trait and run context.
//!
//! RULE: Every table generator implements TableGenerator.
//! The engine calls generate() on each registered generator once per run,
//! in the documented dependency order (see engine.rs). A generator reads
//! upstream tables from the Dataset and appends its own rows; it never
//! calls another generator directly.

use crate::{
    dataset::Dataset,
    error::SimResult,
    rng::GeneratorRng,
    scenario::ScenarioConfig,
    types::Hour,
};
use chrono::{DateTime, Utc};

/// Immutable context shared by every generator in a run.
pub struct GenContext {
    pub scenario: ScenarioConfig,
    /// Wall-clock anchor for hour 0. Fixed per run so timestamps are
    /// reproducible under a fixed seed.
    pub start_ts: DateTime<Utc>,
    /// Whole hours in the generation window, from the scenario duration.
    pub total_hours: Hour,
}

/// The contract every table generator must fulfill.
pub trait TableGenerator: Send {
    /// Unique stable name for this generator.
    fn name(&self) -> &'static str;

    /// Called once per run by the engine.
    ///
    /// - `ctx`:  the run context (scenario, time anchor, hour count)
    /// - `data`: all tables generated so far; append output here
    /// - `rng`:  this generator's deterministic RNG stream
    ///
    /// Empty upstream tables are a valid input and must degrade to empty
    /// output, never an error.
    fn generate(
        &self,
        ctx: &GenContext,
        data: &mut Dataset,
        rng: &mut GeneratorRng,
    ) -> SimResult<()>;
}
