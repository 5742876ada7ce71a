//! Product catalog generator.
//!
//! Prices are log-normal per category; cost is a correlated 30-70% margin
//! slice of price. A scenario with a focus category (flash sale, viral
//! moment) claims 60% of the draws for that category.

use crate::{
    dataset::Dataset,
    error::SimResult,
    generator::{GenContext, TableGenerator},
    rng::GeneratorRng,
    types::{round_cents, EntityId, ProductCategory},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_id: EntityId,
    pub sku: String,
    pub category: ProductCategory,
    pub subcategory: String,
    pub price: f64,
    pub cost: f64,
    pub weight_kg: f64,
    pub is_seasonal: bool,
    pub seasonality_pattern: String,
    pub supplier_id: EntityId,
}

const CATEGORY_WEIGHTS: [(ProductCategory, f64); 5] = [
    (ProductCategory::Electronics, 0.25),
    (ProductCategory::Clothing, 0.25),
    (ProductCategory::Home, 0.20),
    (ProductCategory::Beauty, 0.15),
    (ProductCategory::Books, 0.15),
];

fn subcategories(category: ProductCategory) -> &'static [&'static str] {
    match category {
        ProductCategory::Electronics => {
            &["smartphones", "laptops", "headphones", "tablets", "smart_watches"]
        }
        ProductCategory::Clothing => &["shirts", "pants", "dresses", "shoes", "accessories"],
        ProductCategory::Home => &["furniture", "kitchen", "decor", "garden", "storage"],
        ProductCategory::Beauty => &["skincare", "makeup", "haircare", "fragrances", "tools"],
        ProductCategory::Books => &["fiction", "non_fiction", "textbooks", "children", "technical"],
    }
}

fn seasonality_pattern(category: ProductCategory) -> &'static str {
    match category {
        ProductCategory::Electronics => "holiday",
        ProductCategory::Home => "summer",
        ProductCategory::Books => "back_to_school",
        ProductCategory::Clothing | ProductCategory::Beauty => "none",
    }
}

/// Log-normal price parameters (mu, sigma) per category.
fn price_params(category: ProductCategory) -> (f64, f64) {
    match category {
        ProductCategory::Electronics => (5.5, 0.8),
        ProductCategory::Clothing => (3.5, 0.6),
        _ => (4.0, 0.7),
    }
}

pub struct ProductGenerator;

impl TableGenerator for ProductGenerator {
    fn name(&self) -> &'static str {
        "product"
    }

    fn generate(
        &self,
        ctx: &GenContext,
        data: &mut Dataset,
        rng: &mut GeneratorRng,
    ) -> SimResult<()> {
        if data.suppliers.is_empty() {
            log::warn!("product: supplier table is empty, generating no products");
            return Ok(());
        }

        let focus = ctx.scenario.kind.focus_category();
        let count = ctx.scenario.product_count;
        data.products.reserve(count);

        for i in 0..count {
            let category = match focus {
                Some(focus) if rng.chance(0.6) => focus,
                _ => *rng.pick(&CATEGORY_WEIGHTS),
            };
            let subs = subcategories(category);
            let subcategory = subs[rng.index_below(subs.len())].to_string();

            let (mu, sigma) = price_params(category);
            let price = round_cents(rng.lognormal(mu, sigma));
            let cost = round_cents(price * rng.uniform(0.3, 0.7));
            let pattern = seasonality_pattern(category);

            let supplier = &data.suppliers[rng.index_below(data.suppliers.len())];

            data.products.push(ProductRecord {
                product_id: rng.uuid().to_string(),
                sku: format!("{}{i:06}", category.sku_prefix()),
                category,
                subcategory,
                price,
                cost,
                weight_kg: rng.exponential(2.0),
                is_seasonal: pattern != "none",
                seasonality_pattern: pattern.to_string(),
                supplier_id: supplier.supplier_id.clone(),
            });
        }

        Ok(())
    }
}
