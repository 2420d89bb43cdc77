//! Category tree (category -> subcategories -> microcategories) and browse scopes.

use serde::{Deserialize, Serialize};

use bazaar_core::{
    CategoryId, DomainError, DomainResult, Entity, MicroCategoryId, SubcategoryId,
};

use crate::product::Product;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroCategory {
    pub id: MicroCategoryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub name: String,
    #[serde(default)]
    pub micro_categories: Vec<MicroCategory>,
}

impl Subcategory {
    pub fn micro_category(&self, id: MicroCategoryId) -> Option<&MicroCategory> {
        self.micro_categories.iter().find(|m| m.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

impl Category {
    pub fn subcategory(&self, id: SubcategoryId) -> Option<&Subcategory> {
        self.subcategories.iter().find(|s| s.id == id)
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Which slice of the catalog is being browsed.
///
/// A microcategory is only meaningful together with its subcategory.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScope {
    pub category_id: CategoryId,
    #[serde(default)]
    pub subcategory_id: Option<SubcategoryId>,
    #[serde(default)]
    pub micro_category_id: Option<MicroCategoryId>,
}

impl CategoryScope {
    pub fn category(category_id: CategoryId) -> Self {
        Self {
            category_id,
            subcategory_id: None,
            micro_category_id: None,
        }
    }

    pub fn with_subcategory(mut self, subcategory_id: SubcategoryId) -> Self {
        self.subcategory_id = Some(subcategory_id);
        self
    }

    pub fn with_micro_category(mut self, micro_category_id: MicroCategoryId) -> Self {
        self.micro_category_id = Some(micro_category_id);
        self
    }

    /// Whether a product's placement falls inside this scope.
    pub fn contains(&self, product: &Product) -> bool {
        if product.category_id != Some(self.category_id) {
            return false;
        }
        if let Some(sub) = self.subcategory_id {
            if product.subcategory_id != Some(sub) {
                return false;
            }
        }
        if let Some(micro) = self.micro_category_id {
            if product.micro_category_id != Some(micro) {
                return false;
            }
        }
        true
    }
}

/// A resolved scope: the tree nodes a `CategoryScope` points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopePath<'a> {
    pub category: &'a Category,
    pub subcategory: Option<&'a Subcategory>,
    pub micro_category: Option<&'a MicroCategory>,
}

impl ScopePath<'_> {
    /// Display names from the category down to the most specific node.
    pub fn breadcrumbs(&self) -> Vec<&str> {
        let mut names = vec![self.category.name.as_str()];
        names.extend(self.subcategory.map(|s| s.name.as_str()));
        names.extend(self.micro_category.map(|m| m.name.as_str()));
        names
    }
}

/// The whole category tree as delivered by the catalog API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTree {
    categories: Vec<Category>,
}

impl CategoryTree {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Validate a scope against the tree and return the nodes it names.
    pub fn resolve(&self, scope: &CategoryScope) -> DomainResult<ScopePath<'_>> {
        let category = self
            .category(scope.category_id)
            .ok_or_else(|| DomainError::not_found(format!("category {}", scope.category_id)))?;

        let subcategory = match scope.subcategory_id {
            Some(sub_id) => Some(category.subcategory(sub_id).ok_or_else(|| {
                if self.has_subcategory(sub_id) {
                    DomainError::invariant(format!(
                        "subcategory {sub_id} does not belong to category {}",
                        category.id
                    ))
                } else {
                    DomainError::not_found(format!("subcategory {sub_id}"))
                }
            })?),
            None => None,
        };

        let micro_category = match (scope.micro_category_id, subcategory) {
            (None, _) => None,
            (Some(_), None) => {
                return Err(DomainError::validation(
                    "a microcategory scope requires a subcategory",
                ));
            }
            (Some(micro_id), Some(sub)) => Some(sub.micro_category(micro_id).ok_or_else(|| {
                if self.has_micro_category(micro_id) {
                    DomainError::invariant(format!(
                        "microcategory {micro_id} does not belong to subcategory {}",
                        sub.id
                    ))
                } else {
                    DomainError::not_found(format!("microcategory {micro_id}"))
                }
            })?),
        };

        Ok(ScopePath {
            category,
            subcategory,
            micro_category,
        })
    }

    fn has_subcategory(&self, id: SubcategoryId) -> bool {
        self.categories.iter().any(|c| c.subcategory(id).is_some())
    }

    fn has_micro_category(&self, id: MicroCategoryId) -> bool {
        self.categories
            .iter()
            .flat_map(|c| c.subcategories.iter())
            .any(|s| s.micro_category(id).is_some())
    }
}
