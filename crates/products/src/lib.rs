//! Products and catalog collaborator.
//!
//! This crate holds the product value type the storefront browses, the
//! category tree used to scope browsing, and the `CatalogSource` seam behind
//! which the remote catalog API sits.

pub mod category;
pub mod product;
pub mod source;

pub use category::{
    Category, CategoryScope, CategoryTree, MicroCategory, ScopePath, Subcategory,
};
pub use product::{IN_STOCK, OUT_OF_STOCK, Product, StockStatus};
pub use source::{CatalogSource, InMemoryCatalog};
