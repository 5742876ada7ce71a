//! Supplier table generator.
//!
//! The supplier catalog is a fixed eight-row list: same rows, same
//! columns on every run. Only the identifiers vary with the seed.

use crate::{
    dataset::Dataset,
    error::SimResult,
    generator::{GenContext, TableGenerator},
    rng::GeneratorRng,
    types::EntityId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierRecord {
    pub supplier_id: EntityId,
    pub name: String,
    pub country: String,
    pub lead_time_days: u32,
    pub reliability_score: f64,
    pub is_primary: bool,
}

struct CatalogRow {
    name: &'static str,
    country: &'static str,
    lead_time_days: u32,
    reliability: f64,
    primary: bool,
}

const CATALOG: [CatalogRow; 8] = [
    CatalogRow { name: "China Main Electronics",  country: "China",      lead_time_days: 14, reliability: 0.85, primary: true },
    CatalogRow { name: "India Textiles Co",       country: "India",      lead_time_days: 10, reliability: 0.92, primary: true },
    CatalogRow { name: "USA Local Supply",        country: "USA",        lead_time_days: 3,  reliability: 0.98, primary: false },
    CatalogRow { name: "Vietnam Manufacturing",   country: "Vietnam",    lead_time_days: 12, reliability: 0.88, primary: false },
    CatalogRow { name: "Bangladesh Apparel",      country: "Bangladesh", lead_time_days: 16, reliability: 0.82, primary: false },
    CatalogRow { name: "Mexico Backup",           country: "Mexico",     lead_time_days: 7,  reliability: 0.90, primary: false },
    CatalogRow { name: "Germany Premium",         country: "Germany",    lead_time_days: 8,  reliability: 0.96, primary: false },
    CatalogRow { name: "Taiwan Tech",             country: "Taiwan",     lead_time_days: 11, reliability: 0.89, primary: false },
];

pub struct SupplierGenerator;

impl TableGenerator for SupplierGenerator {
    fn name(&self) -> &'static str {
        "supplier"
    }

    fn generate(
        &self,
        _ctx: &GenContext,
        data: &mut Dataset,
        rng: &mut GeneratorRng,
    ) -> SimResult<()> {
        for row in &CATALOG {
            data.suppliers.push(SupplierRecord {
                supplier_id: rng.uuid().to_string(),
                name: row.name.to_string(),
                country: row.country.to_string(),
                lead_time_days: row.lead_time_days,
                reliability_score: row.reliability,
                is_primary: row.primary,
            });
        }
        Ok(())
    }
}
