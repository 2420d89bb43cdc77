//! Facet vocabulary derived from the data rather than a fixed schema.

use std::collections::HashSet;

use serde::Serialize;

use bazaar_products::Product;

use crate::price::{PriceBucketizer, PriceRange};

/// Every facet value a shopper can pick for the current base set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetVocabulary {
    pub conditions: Vec<String>,
    pub brands: Vec<String>,
    pub price_ranges: Vec<PriceRange>,
}

impl FacetVocabulary {
    pub fn build(products: &[Product], bucketizer: &PriceBucketizer) -> Self {
        Self {
            conditions: extract_conditions(products),
            brands: extract_brands(products),
            price_ranges: bucketizer.bucketize(products),
        }
    }

    pub fn price_range(&self, key: &str) -> Option<&PriceRange> {
        self.price_ranges.iter().find(|r| r.key == key)
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.brands.is_empty() && self.price_ranges.is_empty()
    }
}

/// Distinct non-blank brands, in order of first appearance.
pub fn extract_brands(products: &[Product]) -> Vec<String> {
    distinct(products.iter().filter_map(Product::brand_name))
}

/// Distinct non-blank conditions, in order of first appearance.
pub fn extract_conditions(products: &[Product]) -> Vec<String> {
    distinct(products.iter().filter_map(Product::condition_name))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
