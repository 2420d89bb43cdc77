use serde::de::{Deserializer, IgnoredAny};
use serde::{Deserialize, Serialize};

use bazaar_core::{CategoryId, Entity, MicroCategoryId, ProductId, SubcategoryId};

/// Wire value of the in-stock status.
pub const IN_STOCK: &str = "in-stock";
/// Wire value of the out-of-stock status.
pub const OUT_OF_STOCK: &str = "out-of-stock";

/// Stock availability as reported by the catalog API.
///
/// Only `"in-stock"` is meaningful to the storefront; any other value is kept
/// verbatim so it survives a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StockStatus {
    InStock,
    OutOfStock,
    Other(String),
}

impl StockStatus {
    pub fn as_str(&self) -> &str {
        match self {
            StockStatus::InStock => IN_STOCK,
            StockStatus::OutOfStock => OUT_OF_STOCK,
            StockStatus::Other(s) => s,
        }
    }
}

impl From<String> for StockStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            IN_STOCK => StockStatus::InStock,
            OUT_OF_STOCK => StockStatus::OutOfStock,
            _ => StockStatus::Other(value),
        }
    }
}

impl From<&str> for StockStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<StockStatus> for String {
    fn from(value: StockStatus) -> Self {
        match value {
            StockStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product listing as delivered by the catalog collaborator.
///
/// Treated as immutable input by the browsing engine. Every facet-relevant
/// field is optional; absence is handled explicitly by the filter rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub name: String,
    /// Listed price. `None` when the API sent nothing usable.
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<f64>,
    #[serde(default)]
    pub discount_percent: Option<f64>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub product_condition: Option<String>,
    #[serde(default)]
    pub stock_status: Option<StockStatus>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub subcategory_id: Option<SubcategoryId>,
    #[serde(default)]
    pub micro_category_id: Option<MicroCategoryId>,
}

impl Product {
    /// A bare listing with only an identity and a name.
    pub fn new(id: ProductId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price: None,
            discount_percent: None,
            brand: None,
            product_condition: None,
            stock_status: None,
            category_id: None,
            subcategory_id: None,
            micro_category_id: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_discount(mut self, percent: f64) -> Self {
        self.discount_percent = Some(percent);
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.product_condition = Some(condition.into());
        self
    }

    pub fn with_stock(mut self, status: impl Into<StockStatus>) -> Self {
        self.stock_status = Some(status.into());
        self
    }

    pub fn placed_in(
        mut self,
        category_id: CategoryId,
        subcategory_id: Option<SubcategoryId>,
        micro_category_id: Option<MicroCategoryId>,
    ) -> Self {
        self.category_id = Some(category_id);
        self.subcategory_id = subcategory_id;
        self.micro_category_id = micro_category_id;
        self
    }

    /// The price if it is a usable finite number.
    pub fn valid_price(&self) -> Option<f64> {
        self.price.filter(|p| p.is_finite())
    }

    /// The price used for range comparisons: absent or malformed prices count as 0.
    pub fn price_or_zero(&self) -> f64 {
        self.valid_price().unwrap_or(0.0)
    }

    /// Price after applying `discount_percent` (clamped to 0..=100).
    pub fn effective_price(&self) -> Option<f64> {
        let price = self.valid_price()?;
        let discount = self
            .discount_percent
            .filter(|d| d.is_finite())
            .unwrap_or(0.0)
            .clamp(0.0, 100.0);
        Some((price * (100.0 - discount) / 100.0).min(price))
    }

    /// Brand name, trimmed; `None` for missing or blank values.
    pub fn brand_name(&self) -> Option<&str> {
        non_blank(self.brand.as_deref())
    }

    /// Condition name, trimmed; `None` for missing or blank values.
    pub fn condition_name(&self) -> Option<&str> {
        non_blank(self.product_condition.as_deref())
    }

    pub fn is_in_stock(&self) -> bool {
        matches!(self.stock_status, Some(StockStatus::InStock))
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Accepts a JSON number or a numeric string; anything else becomes `None`.
fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match RawPrice::deserialize(deserializer)? {
        RawPrice::Number(n) => Some(n),
        RawPrice::Text(s) => s.trim().parse::<f64>().ok(),
        RawPrice::Other(_) => None,
    })
}
