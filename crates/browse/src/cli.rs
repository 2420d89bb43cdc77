use clap::Parser;
use std::path::PathBuf;

use bazaar_catalog::FacetValue;
use bazaar_core::{CategoryId, MicroCategoryId, SubcategoryId};
use bazaar_products::CategoryScope;

#[derive(Parser, Debug)]
#[command(name = "bazaar-browse")]
#[command(about = "Browse a catalog snapshot with facet filters and pagination", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Catalog snapshot (JSON with `categories` and `products`)
    #[arg(long, env = "BAZAAR_CATALOG")]
    pub catalog: PathBuf,

    /// Print the category tree instead of a listing
    #[arg(long)]
    pub tree: bool,

    /// Category to browse
    #[arg(long, required_unless_present = "tree")]
    pub category: Option<CategoryId>,

    /// Narrow to a subcategory of the category
    #[arg(long, requires = "category")]
    pub subcategory: Option<SubcategoryId>,

    /// Narrow to a microcategory of the subcategory
    #[arg(long = "micro-category", requires = "subcategory")]
    pub micro_category: Option<MicroCategoryId>,

    /// Brands to keep (repeatable)
    #[arg(long = "brand")]
    pub brands: Vec<String>,

    /// Conditions to keep (repeatable)
    #[arg(long = "condition")]
    pub conditions: Vec<String>,

    /// Price range keys to keep, e.g. 100-179 (repeatable)
    #[arg(long = "price-range")]
    pub price_ranges: Vec<String>,

    /// Only show products in stock
    #[arg(long = "in-stock")]
    pub in_stock: bool,

    /// Page to show (clamped to the pages that exist)
    #[arg(long, default_value = "1")]
    pub page: usize,
}

impl Cli {
    pub fn scope(&self) -> Option<CategoryScope> {
        let mut scope = CategoryScope::category(self.category?);
        if let Some(sub) = self.subcategory {
            scope = scope.with_subcategory(sub);
        }
        if let Some(micro) = self.micro_category {
            scope = scope.with_micro_category(micro);
        }
        Some(scope)
    }

    pub fn selections(&self) -> impl Iterator<Item = FacetValue> + '_ {
        let brands = self.brands.iter().cloned().map(FacetValue::Brand);
        let conditions = self.conditions.iter().cloned().map(FacetValue::Condition);
        let ranges = self.price_ranges.iter().cloned().map(FacetValue::PriceRange);
        brands.chain(conditions).chain(ranges)
    }
}
