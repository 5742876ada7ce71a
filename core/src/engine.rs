//! The generation engine — sequences table generators for one run.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Customer generator     (independent)
//!   2. Supplier generator     (independent)
//!   3. Product generator      (needs suppliers)
//!   4. Campaign generator     (independent)
//!   5. Order generator        (needs customers, products, campaigns;
//!                              also emits order items)
//!   6. Support ticket generator   (needs customers, orders)
//!   7. Cart abandonment generator (needs customers, products, orders)
//!   8. Returns generator          (needs orders, order items, products)
//!   9. System metrics generator   (needs campaigns)
//!
//! RULES:
//!   - Generators execute in registration order, exactly once per run.
//!   - All randomness flows through the RngBank.
//!   - A generator failure stops the run, but every table generated
//!     before the failure is retained on the engine for the caller.

use crate::{
    abandonment_generator::CartAbandonmentGenerator,
    campaign_generator::CampaignGenerator,
    customer_generator::CustomerGenerator,
    dataset::Dataset,
    error::SimResult,
    generator::{GenContext, TableGenerator},
    metrics_generator::SystemMetricsGenerator,
    order_generator::OrderGenerator,
    product_generator::ProductGenerator,
    returns_generator::ReturnsGenerator,
    rng::{GeneratorSlot, RngBank},
    scenario::ScenarioConfig,
    supplier_generator::SupplierGenerator,
    ticket_generator::SupportTicketGenerator,
};
use chrono::{DateTime, Utc};

pub struct GenEngine {
    ctx: GenContext,
    rng_bank: RngBank,
    seed: u64,
    generators: Vec<(GeneratorSlot, Box<dyn TableGenerator>)>,
    pub dataset: Dataset,
}

impl GenEngine {
    /// Build a fully wired engine with all generators registered.
    /// Fails fast on configuration errors, before any generation.
    pub fn build(
        scenario: ScenarioConfig,
        seed: u64,
        start_ts: DateTime<Utc>,
    ) -> SimResult<Self> {
        scenario.validate()?;
        let total_hours = scenario.total_hours()?;

        let mut engine = Self {
            ctx: GenContext {
                scenario,
                start_ts,
                total_hours,
            },
            rng_bank: RngBank::new(seed),
            seed,
            generators: Vec::new(),
            dataset: Dataset::new(),
        };

        // EXECUTION ORDER — fixed, documented, never reordered.
        engine.register(GeneratorSlot::Customer, Box::new(CustomerGenerator));
        engine.register(GeneratorSlot::Supplier, Box::new(SupplierGenerator));
        engine.register(GeneratorSlot::Product, Box::new(ProductGenerator));
        engine.register(GeneratorSlot::Campaign, Box::new(CampaignGenerator));
        engine.register(GeneratorSlot::Order, Box::new(OrderGenerator));
        engine.register(
            GeneratorSlot::SupportTicket,
            Box::new(SupportTicketGenerator),
        );
        engine.register(
            GeneratorSlot::CartAbandonment,
            Box::new(CartAbandonmentGenerator),
        );
        engine.register(GeneratorSlot::Returns, Box::new(ReturnsGenerator));
        engine.register(
            GeneratorSlot::SystemMetrics,
            Box::new(SystemMetricsGenerator),
        );

        Ok(engine)
    }

    /// Register a generator. Call in the documented execution order.
    pub fn register(&mut self, slot: GeneratorSlot, generator: Box<dyn TableGenerator>) {
        self.generators.push((slot, generator));
    }

    pub fn ctx(&self) -> &GenContext {
        &self.ctx
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Run every generator once, in registration order.
    ///
    /// On error the partially filled dataset stays on the engine, so the
    /// caller can still persist the tables that did generate.
    pub fn run(&mut self) -> SimResult<()> {
        log::info!(
            "run start: scenario={} duration={} ({}h) intensity={} seed={:#x}",
            self.ctx.scenario.kind.name(),
            self.ctx.scenario.duration,
            self.ctx.total_hours,
            self.ctx.scenario.intensity_multiplier,
            self.seed,
        );

        for (slot, generator) in &self.generators {
            let before = self.dataset.total_rows();
            let mut rng = self.rng_bank.for_generator(*slot);
            generator.generate(&self.ctx, &mut self.dataset, &mut rng)?;
            log::info!(
                "{}: {} rows",
                generator.name(),
                self.dataset.total_rows() - before
            );
        }

        log::info!("run complete: {} total rows", self.dataset.total_rows());
        Ok(())
    }

    /// Consume the engine, yielding the generated tables.
    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }
}
