//! `bazaar-catalog`: faceted filtering and pagination for category browsing.
//!
//! Given the products of one category scope, this crate derives the facet
//! vocabulary (brands, conditions, price ranges), evaluates the shopper's
//! selection, counts matches per facet value and pages the result. Everything
//! here is pure, synchronous computation over in-memory snapshots.

pub mod browser;
pub mod config;
pub mod counts;
pub mod facets;
pub mod filter;
pub mod pagination;
pub mod price;

pub use browser::{CatalogBrowser, CatalogView};
pub use config::{BrowseConfig, FacetCountingMode};
pub use counts::{FacetCounter, FacetCounts, IsolatedFacetCounter, NarrowingFacetCounter};
pub use facets::{FacetVocabulary, extract_brands, extract_conditions};
pub use filter::{Facet, FacetValue, FilterState, filter_products, matches};
pub use pagination::{Page, PageEntry, PageWindow, Paginator};
pub use price::{PriceBucketizer, PriceRange};
