//! Browsing configuration.
//!
//! Loaded from `BAZAAR_*` environment variables; anything missing or
//! unparsable falls back to the default with a warning.

use core::fmt::Display;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use bazaar_core::{DomainError, DomainResult};

use crate::counts::{FacetCounter, IsolatedFacetCounter, NarrowingFacetCounter};
use crate::pagination::Paginator;
use crate::price::PriceBucketizer;

pub const ENV_PAGE_SIZE: &str = "BAZAAR_PAGE_SIZE";
pub const ENV_MAX_VISIBLE_PAGES: &str = "BAZAAR_MAX_VISIBLE_PAGES";
pub const ENV_PRICE_BUCKETS: &str = "BAZAAR_PRICE_BUCKETS";
pub const ENV_CURRENCY_SYMBOL: &str = "BAZAAR_CURRENCY_SYMBOL";
pub const ENV_FACET_COUNTING: &str = "BAZAAR_FACET_COUNTING";

/// How facet counts relate to the active selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetCountingMode {
    /// Every value is counted against the whole base set.
    #[default]
    Isolated,
    /// Counts narrow with the selections made on other facets.
    Narrowing,
}

impl FacetCountingMode {
    pub fn counter(self) -> Box<dyn FacetCounter> {
        match self {
            FacetCountingMode::Isolated => Box::new(IsolatedFacetCounter),
            FacetCountingMode::Narrowing => Box::new(NarrowingFacetCounter),
        }
    }
}

impl FromStr for FacetCountingMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "isolated" => Ok(FacetCountingMode::Isolated),
            "narrowing" => Ok(FacetCountingMode::Narrowing),
            other => Err(DomainError::validation(format!(
                "unknown facet counting mode '{other}' (expected isolated or narrowing)"
            ))),
        }
    }
}

impl Display for FacetCountingMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FacetCountingMode::Isolated => f.write_str("isolated"),
            FacetCountingMode::Narrowing => f.write_str("narrowing"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowseConfig {
    pub page_size: usize,
    pub max_visible_pages: usize,
    pub price_bucket_count: usize,
    pub currency_symbol: String,
    pub facet_counting: FacetCountingMode,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            page_size: Paginator::DEFAULT_PAGE_SIZE,
            max_visible_pages: Paginator::DEFAULT_MAX_VISIBLE,
            price_bucket_count: PriceBucketizer::DEFAULT_BUCKET_COUNT,
            currency_symbol: PriceBucketizer::DEFAULT_CURRENCY_SYMBOL.to_string(),
            facet_counting: FacetCountingMode::default(),
        }
    }
}

impl BrowseConfig {
    pub fn validate(&self) -> DomainResult<()> {
        if self.page_size == 0 {
            return Err(DomainError::validation("page_size must be at least 1"));
        }
        if self.max_visible_pages < Paginator::MIN_VISIBLE {
            return Err(DomainError::validation(format!(
                "max_visible_pages must be at least {}",
                Paginator::MIN_VISIBLE
            )));
        }
        if self.price_bucket_count == 0 {
            return Err(DomainError::validation("price_bucket_count must be at least 1"));
        }
        Ok(())
    }

    /// Load from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let config = Self {
            page_size: load(&lookup, ENV_PAGE_SIZE, defaults.page_size),
            max_visible_pages: load(&lookup, ENV_MAX_VISIBLE_PAGES, defaults.max_visible_pages),
            price_bucket_count: load(&lookup, ENV_PRICE_BUCKETS, defaults.price_bucket_count),
            currency_symbol: lookup(ENV_CURRENCY_SYMBOL)
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| defaults.currency_symbol.clone()),
            facet_counting: load(&lookup, ENV_FACET_COUNTING, defaults.facet_counting),
        };

        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                tracing::warn!("invalid browse configuration ({e}); using defaults");
                defaults
            }
        }
    }

    pub fn paginator(&self) -> Paginator {
        Paginator::new(self.page_size, self.max_visible_pages)
    }

    pub fn bucketizer(&self) -> PriceBucketizer {
        PriceBucketizer::new(self.price_bucket_count, self.currency_symbol.clone())
    }
}

fn load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    raw.trim().parse().unwrap_or_else(|e| {
        tracing::warn!("invalid {key} value '{raw}': {e}; using default {default}");
        default
    })
}
