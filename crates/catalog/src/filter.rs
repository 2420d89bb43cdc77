//! Filter selection state and the product predicate.
//!
//! Facets combine with AND; values selected within one facet combine with OR.
//! An empty selection for a facet places no constraint on it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use bazaar_core::ValueObject;
use bazaar_products::Product;

use crate::price::PriceRange;

/// The set-valued facets a shopper can select from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Condition,
    Brand,
    PriceRange,
}

impl core::fmt::Display for Facet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Facet::Condition => "condition",
            Facet::Brand => "brand",
            Facet::PriceRange => "price_range",
        };
        f.write_str(name)
    }
}

/// One concrete facet value (a brand name, a condition, a price-range key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "facet", content = "value", rename_all = "snake_case")]
pub enum FacetValue {
    Condition(String),
    Brand(String),
    PriceRange(String),
}

impl FacetValue {
    pub fn facet(&self) -> Facet {
        match self {
            FacetValue::Condition(_) => Facet::Condition,
            FacetValue::Brand(_) => Facet::Brand,
            FacetValue::PriceRange(_) => Facet::PriceRange,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            FacetValue::Condition(v) | FacetValue::Brand(v) | FacetValue::PriceRange(v) => v,
        }
    }

    fn into_value(self) -> String {
        match self {
            FacetValue::Condition(v) | FacetValue::Brand(v) | FacetValue::PriceRange(v) => v,
        }
    }
}

/// The shopper's active filter selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    #[serde(default)]
    pub condition: BTreeSet<String>,
    #[serde(default)]
    pub brand: BTreeSet<String>,
    /// Selected price-range keys.
    #[serde(default)]
    pub price_range: BTreeSet<String>,
    #[serde(default)]
    pub in_stock: bool,
}

impl FilterState {
    /// A state selecting exactly one facet value and nothing else.
    pub fn only(value: FacetValue) -> Self {
        let mut state = Self::default();
        state.select(value);
        state
    }

    /// A state that only requires products to be in stock.
    pub fn in_stock_only() -> Self {
        Self {
            in_stock: true,
            ..Self::default()
        }
    }

    pub fn selected(&self, facet: Facet) -> &BTreeSet<String> {
        match facet {
            Facet::Condition => &self.condition,
            Facet::Brand => &self.brand,
            Facet::PriceRange => &self.price_range,
        }
    }

    pub fn selected_mut(&mut self, facet: Facet) -> &mut BTreeSet<String> {
        match facet {
            Facet::Condition => &mut self.condition,
            Facet::Brand => &mut self.brand,
            Facet::PriceRange => &mut self.price_range,
        }
    }

    pub fn is_selected(&self, value: &FacetValue) -> bool {
        self.selected(value.facet()).contains(value.value())
    }

    /// Returns `true` if the value was not selected before.
    pub fn select(&mut self, value: FacetValue) -> bool {
        let facet = value.facet();
        self.selected_mut(facet).insert(value.into_value())
    }

    /// Returns `true` if the value was selected before.
    pub fn deselect(&mut self, value: &FacetValue) -> bool {
        self.selected_mut(value.facet()).remove(value.value())
    }

    /// Flip a value's selection; returns whether it is selected afterwards.
    pub fn toggle(&mut self, value: FacetValue) -> bool {
        if self.deselect(&value) {
            false
        } else {
            self.select(value)
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.condition.is_empty()
            && self.brand.is_empty()
            && self.price_range.is_empty()
            && !self.in_stock
    }
}

impl ValueObject for FilterState {}

/// Condition test: passes when nothing is selected or the product's condition is.
pub fn condition_matches(product: &Product, selected: &BTreeSet<String>) -> bool {
    selected.is_empty() || product.condition_name().is_some_and(|c| selected.contains(c))
}

/// Brand test: passes when nothing is selected or the product's brand is.
pub fn brand_matches(product: &Product, selected: &BTreeSet<String>) -> bool {
    selected.is_empty() || product.brand_name().is_some_and(|b| selected.contains(b))
}

/// Price test: the product must fall inside at least one selected range.
///
/// Keys that are not in `ranges` (left over from a previous base set) are
/// ignored; if no selected key is known, the facet does not constrain.
/// Absent or malformed prices compare as 0.
pub fn price_matches(product: &Product, selected: &BTreeSet<String>, ranges: &[PriceRange]) -> bool {
    let mut known = ranges.iter().filter(|r| selected.contains(&r.key)).peekable();
    if known.peek().is_none() {
        return true;
    }
    let price = product.price_or_zero();
    known.any(|r| r.contains(price))
}

/// Stock test: only enforced when `in_stock` is requested.
pub fn stock_matches(product: &Product, in_stock: bool) -> bool {
    !in_stock || product.is_in_stock()
}

/// Whether `product` passes every facet of `state`.
pub fn matches(product: &Product, state: &FilterState, ranges: &[PriceRange]) -> bool {
    condition_matches(product, &state.condition)
        && brand_matches(product, &state.brand)
        && price_matches(product, &state.price_range, ranges)
        && stock_matches(product, state.in_stock)
}

/// Keep the products passing `state`, preserving their relative order.
pub fn filter_products<'a, I>(products: I, state: &FilterState, ranges: &[PriceRange]) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    products
        .into_iter()
        .filter(|p| matches(p, state, ranges))
        .collect()
}
