//! Catalog data collaborator.
//!
//! The storefront fetches category trees and scoped product lists from a remote
//! REST API. The browsing engine only depends on this trait; `InMemoryCatalog`
//! serves a loaded snapshot (tests, the CLI, offline demos).

use serde::{Deserialize, Serialize};

use bazaar_core::{DomainError, DomainResult, Entity, ProductId};

use crate::category::{CategoryScope, CategoryTree};
use crate::product::Product;

/// Read-only access to catalog data.
pub trait CatalogSource {
    /// The full category tree.
    fn category_tree(&self) -> DomainResult<CategoryTree>;

    /// Products placed inside `scope`, in catalog order.
    fn products(&self, scope: &CategoryScope) -> DomainResult<Vec<Product>>;

    /// A single product by identifier.
    fn product(&self, id: &ProductId) -> DomainResult<Product>;
}

/// A catalog snapshot held in memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryCatalog {
    #[serde(default)]
    categories: CategoryTree,
    #[serde(default)]
    products: Vec<Product>,
}

impl InMemoryCatalog {
    pub fn new(categories: CategoryTree, products: Vec<Product>) -> Self {
        Self {
            categories,
            products,
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl CatalogSource for InMemoryCatalog {
    fn category_tree(&self) -> DomainResult<CategoryTree> {
        Ok(self.categories.clone())
    }

    fn products(&self, scope: &CategoryScope) -> DomainResult<Vec<Product>> {
        let path = self.categories.resolve(scope)?;
        let products: Vec<Product> = self
            .products
            .iter()
            .filter(|p| scope.contains(p))
            .cloned()
            .collect();

        tracing::debug!(
            scope = %path.breadcrumbs().join(" / "),
            count = products.len(),
            "loaded scoped products"
        );
        Ok(products)
    }

    fn product(&self, id: &ProductId) -> DomainResult<Product> {
        self.products
            .iter()
            .find(|p| p.id() == id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("product {id}")))
    }
}
