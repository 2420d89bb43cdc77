//! Price-range buckets derived from the products being browsed.

use serde::{Deserialize, Serialize};

use bazaar_core::ValueObject;
use bazaar_products::Product;

/// One derived price bucket.
///
/// `min` is inclusive; `max` is inclusive, or `None` for the open-ended last
/// bucket. `key` is `"{min}-{max}"` and is what filter selections refer to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceRange {
    pub label: String,
    pub min: i64,
    pub max: Option<i64>,
    pub key: String,
}

impl PriceRange {
    pub fn is_open_ended(&self) -> bool {
        self.max.is_none()
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min as f64 && self.max.is_none_or(|max| price <= max as f64)
    }
}

impl ValueObject for PriceRange {}

/// Splits the observed price span of a product set into equal-width buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceBucketizer {
    bucket_count: usize,
    currency_symbol: String,
}

impl PriceBucketizer {
    pub const DEFAULT_BUCKET_COUNT: usize = 5;
    pub const DEFAULT_CURRENCY_SYMBOL: &'static str = "৳";

    pub fn new(bucket_count: usize, currency_symbol: impl Into<String>) -> Self {
        Self {
            bucket_count,
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    /// Derive the buckets for `products`.
    ///
    /// Returns an empty list when no product carries a finite price. Bounds are
    /// integers (`floor` of the lowest price, `ceil` of the highest). Exactly
    /// `bucket_count` buckets come back unless the span is narrower than the
    /// bucket count; then buckets that would start past the highest price are
    /// dropped and the last emitted one is open-ended.
    pub fn bucketize(&self, products: &[Product]) -> Vec<PriceRange> {
        if self.bucket_count == 0 {
            return Vec::new();
        }

        let Some((lowest, highest)) = products
            .iter()
            .filter_map(Product::valid_price)
            .fold(None, |acc: Option<(f64, f64)>, price| match acc {
                None => Some((price, price)),
                Some((lo, hi)) => Some((lo.min(price), hi.max(price))),
            })
        else {
            return Vec::new();
        };

        let min_price = lowest.floor() as i64;
        let max_price = highest.ceil() as i64;

        if max_price <= min_price {
            return vec![self.open_range(min_price, max_price)];
        }

        let count = self.bucket_count as u64;
        let span = max_price.saturating_sub(min_price) as u64;
        let range_size = span.div_ceil(count).max(1) as i64;
        // Only a span narrower than the bucket count may yield fewer buckets.
        let narrow = span < count;

        let mut ranges = Vec::with_capacity(self.bucket_count);
        for i in 0..self.bucket_count as i64 {
            let range_min = min_price.saturating_add(i.saturating_mul(range_size));
            let next_min = range_min.saturating_add(range_size);
            let is_last =
                i == self.bucket_count as i64 - 1 || (narrow && next_min > max_price);
            if is_last {
                ranges.push(self.open_range(range_min, max_price));
                break;
            }
            ranges.push(self.closed_range(range_min, next_min - 1));
        }
        ranges
    }

    fn closed_range(&self, min: i64, max: i64) -> PriceRange {
        let c = &self.currency_symbol;
        PriceRange {
            label: format!("{c}{min} - {c}{max}"),
            min,
            max: Some(max),
            key: format!("{min}-{max}"),
        }
    }

    fn open_range(&self, min: i64, key_max: i64) -> PriceRange {
        PriceRange {
            label: format!("{}{min}+", self.currency_symbol),
            min,
            max: None,
            key: format!("{min}-{key_max}"),
        }
    }
}

impl Default for PriceBucketizer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BUCKET_COUNT, Self::DEFAULT_CURRENCY_SYMBOL)
    }
}
