//! Per-facet-value match counts shown next to each filter option.

use std::collections::BTreeMap;

use serde::Serialize;

use bazaar_products::Product;

use crate::facets::FacetVocabulary;
use crate::filter::{self, Facet, FacetValue, FilterState};

/// Display counts keyed by facet value (brand, condition, price-range key).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetCounts {
    pub conditions: BTreeMap<String, usize>,
    pub brands: BTreeMap<String, usize>,
    pub price_ranges: BTreeMap<String, usize>,
    pub in_stock: usize,
}

impl FacetCounts {
    /// Count for one facet value; 0 for values outside the vocabulary.
    pub fn count(&self, value: &FacetValue) -> usize {
        let map = match value.facet() {
            Facet::Condition => &self.conditions,
            Facet::Brand => &self.brands,
            Facet::PriceRange => &self.price_ranges,
        };
        map.get(value.value()).copied().unwrap_or(0)
    }
}

/// Strategy for computing facet counts over a base set.
pub trait FacetCounter: core::fmt::Debug + Send + Sync {
    fn count(&self, base: &[Product], vocabulary: &FacetVocabulary, state: &FilterState) -> FacetCounts;
}

/// Counts each facet value as if it were the only active filter.
///
/// Counts always reflect the whole base set, so selecting a brand never
/// changes the numbers shown next to other brands or conditions. `state` is
/// not consulted.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsolatedFacetCounter;

impl FacetCounter for IsolatedFacetCounter {
    fn count(&self, base: &[Product], vocabulary: &FacetVocabulary, _state: &FilterState) -> FacetCounts {
        tally(base, vocabulary, FilterState::only, FilterState::in_stock_only())
    }
}

/// Conventional faceted narrowing.
///
/// A value's count is the number of base products that pass every other
/// facet's active selection together with that value alone for its own facet.
#[derive(Debug, Clone, Copy, Default)]
pub struct NarrowingFacetCounter;

impl FacetCounter for NarrowingFacetCounter {
    fn count(&self, base: &[Product], vocabulary: &FacetVocabulary, state: &FilterState) -> FacetCounts {
        let in_stock = FilterState {
            in_stock: true,
            ..state.clone()
        };
        tally(
            base,
            vocabulary,
            |value| {
                let mut narrowed = state.clone();
                let selection = narrowed.selected_mut(value.facet());
                selection.clear();
                selection.insert(value.value().to_string());
                narrowed
            },
            in_stock,
        )
    }
}

fn tally<F>(base: &[Product], vocabulary: &FacetVocabulary, state_for: F, in_stock: FilterState) -> FacetCounts
where
    F: Fn(FacetValue) -> FilterState,
{
    let ranges = &vocabulary.price_ranges;
    let count_for = |value: FacetValue| {
        let state = state_for(value);
        base.iter()
            .filter(|p| filter::matches(p, &state, ranges))
            .count()
    };

    FacetCounts {
        conditions: vocabulary
            .conditions
            .iter()
            .map(|c| (c.clone(), count_for(FacetValue::Condition(c.clone()))))
            .collect(),
        brands: vocabulary
            .brands
            .iter()
            .map(|b| (b.clone(), count_for(FacetValue::Brand(b.clone()))))
            .collect(),
        price_ranges: ranges
            .iter()
            .map(|r| (r.key.clone(), count_for(FacetValue::PriceRange(r.key.clone()))))
            .collect(),
        in_stock: base
            .iter()
            .filter(|p| filter::matches(p, &in_stock, ranges))
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::PriceBucketizer;
    use bazaar_core::ProductId;
    use bazaar_products::StockStatus;
    use proptest::prelude::*;

    fn item(price: f64, brand: &str, condition: &str, in_stock: bool) -> Product {
        Product::new(ProductId::new(), "item")
            .with_price(price)
            .with_brand(brand)
            .with_condition(condition)
            .with_stock(if in_stock { StockStatus::InStock } else { StockStatus::OutOfStock })
    }

    fn base() -> Vec<Product> {
        vec![
            item(100.0, "Sony", "new", true),
            item(200.0, "Sony", "used", false),
            item(300.0, "Apple", "new", true),
            item(400.0, "Apple", "new", false),
            item(500.0, "Walton", "refurbished", true),
        ]
    }

    fn vocabulary(products: &[Product]) -> FacetVocabulary {
        FacetVocabulary::build(products, &PriceBucketizer::default())
    }

    #[test]
    fn isolated_counts_each_value_over_the_base_set() {
        let products = base();
        let counts = IsolatedFacetCounter.count(&products, &vocabulary(&products), &FilterState::default());

        assert_eq!(counts.brands["Sony"], 2);
        assert_eq!(counts.brands["Apple"], 2);
        assert_eq!(counts.brands["Walton"], 1);
        assert_eq!(counts.conditions["new"], 3);
        assert_eq!(counts.conditions["used"], 1);
        assert_eq!(counts.conditions["refurbished"], 1);
        assert_eq!(counts.price_ranges["100-179"], 1);
        assert_eq!(counts.price_ranges["420-500"], 1);
        assert_eq!(counts.in_stock, 3);
    }

    #[test]
    fn isolated_counts_ignore_active_selection() {
        let products = base();
        let vocabulary = vocabulary(&products);
        let unfiltered = IsolatedFacetCounter.count(&products, &vocabulary, &FilterState::default());

        let mut state = FilterState::only(FacetValue::Brand("Sony".into()));
        state.in_stock = true;
        let filtered = IsolatedFacetCounter.count(&products, &vocabulary, &state);

        assert_eq!(unfiltered, filtered);
    }

    #[test]
    fn narrowing_counts_respect_other_facets() {
        let products = base();
        let vocabulary = vocabulary(&products);
        let state = FilterState::only(FacetValue::Brand("Apple".into()));
        let counts = NarrowingFacetCounter.count(&products, &vocabulary, &state);

        // brand counts are not narrowed by the brand selection itself
        assert_eq!(counts.brands["Sony"], 2);
        assert_eq!(counts.brands["Apple"], 2);
        // conditions are narrowed to Apple products
        assert_eq!(counts.conditions["new"], 2);
        assert_eq!(counts.conditions["used"], 0);
        assert_eq!(counts.in_stock, 1);
    }

    #[test]
    fn empty_base_set_counts_nothing() {
        let counts = IsolatedFacetCounter.count(&[], &FacetVocabulary::default(), &FilterState::default());
        assert_eq!(counts, FacetCounts::default());
        assert_eq!(counts.count(&FacetValue::Brand("Sony".into())), 0);
    }

    #[test]
    fn lookup_by_facet_value() {
        let products = base();
        let counts = IsolatedFacetCounter.count(&products, &vocabulary(&products), &FilterState::default());
        assert_eq!(counts.count(&FacetValue::Condition("new".into())), 3);
        assert_eq!(counts.count(&FacetValue::PriceRange("260-339".into())), 1);
        assert_eq!(counts.count(&FacetValue::Brand("Nokia".into())), 0);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: changing the brand selection never changes condition counts.
        #[test]
        fn brand_selection_does_not_move_condition_counts(
            brands in prop::collection::vec(prop::sample::select(vec!["Sony", "Apple", "Walton"]), 1..30),
            selected in prop::collection::btree_set(prop::sample::select(vec!["Sony", "Apple", "Walton"]), 0..3),
        ) {
            let products: Vec<_> = brands
                .iter()
                .enumerate()
                .map(|(i, b)| item((i * 37 % 500) as f64, b, if i % 2 == 0 { "new" } else { "used" }, i % 3 == 0))
                .collect();
            let vocabulary = vocabulary(&products);

            let before = IsolatedFacetCounter.count(&products, &vocabulary, &FilterState::default());
            let state = FilterState {
                brand: selected.into_iter().map(str::to_string).collect(),
                ..FilterState::default()
            };
            let after = IsolatedFacetCounter.count(&products, &vocabulary, &state);

            prop_assert_eq!(before.conditions, after.conditions);
        }
    }
}
