//! Category browsing session.
//!
//! `CatalogBrowser` holds the state the shopper controls (filter selection,
//! current page) next to the base set it applies to, and derives everything
//! the listing page renders on demand.

use serde::Serialize;

use bazaar_core::DomainResult;
use bazaar_products::{CatalogSource, CategoryScope, Product};

use crate::config::BrowseConfig;
use crate::counts::{FacetCounter, FacetCounts};
use crate::facets::FacetVocabulary;
use crate::filter::{self, FacetValue, FilterState};
use crate::pagination::{Page, Paginator};
use crate::price::PriceBucketizer;

/// Everything a category listing page renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView<'a> {
    pub facets: &'a FacetVocabulary,
    pub facet_counts: FacetCounts,
    pub filters: &'a FilterState,
    pub filtered_products: Vec<&'a Product>,
    pub page: Page<&'a Product>,
}

#[derive(Debug)]
pub struct CatalogBrowser {
    paginator: Paginator,
    bucketizer: PriceBucketizer,
    counter: Box<dyn FacetCounter>,
    products: Vec<Product>,
    vocabulary: FacetVocabulary,
    filters: FilterState,
    current_page: usize,
}

impl CatalogBrowser {
    /// A browser with an empty base set, counting facets as `config` says.
    pub fn new(config: &BrowseConfig) -> DomainResult<Self> {
        Self::with_counter(config, config.facet_counting.counter())
    }

    pub fn with_counter(config: &BrowseConfig, counter: Box<dyn FacetCounter>) -> DomainResult<Self> {
        config.validate()?;
        Ok(Self {
            paginator: config.paginator(),
            bucketizer: config.bucketizer(),
            counter,
            products: Vec::new(),
            vocabulary: FacetVocabulary::default(),
            filters: FilterState::default(),
            current_page: 1,
        })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn vocabulary(&self) -> &FacetVocabulary {
        &self.vocabulary
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Replace the base set.
    ///
    /// The vocabulary is rebuilt and the page goes back to 1. The filter
    /// selection is kept; selections the new vocabulary no longer offers stop
    /// constraining anything.
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.vocabulary = FacetVocabulary::build(&products, &self.bucketizer);
        self.products = products;
        self.current_page = 1;
        tracing::debug!(
            products = self.products.len(),
            brands = self.vocabulary.brands.len(),
            conditions = self.vocabulary.conditions.len(),
            price_ranges = self.vocabulary.price_ranges.len(),
            "base set replaced"
        );
    }

    /// Fetch the products of `scope` from `source` and make them the base set.
    pub fn load_scope<S>(&mut self, source: &S, scope: &CategoryScope) -> DomainResult<()>
    where
        S: CatalogSource + ?Sized,
    {
        let products = source.products(scope)?;
        self.set_products(products);
        Ok(())
    }

    /// Toggle a facet value; returns whether it is selected afterwards.
    pub fn set_filter(&mut self, value: FacetValue) -> bool {
        tracing::debug!(facet = %value.facet(), value = value.value(), "toggle filter");
        let selected = self.filters.toggle(value);
        self.filters_changed();
        selected
    }

    pub fn select(&mut self, value: FacetValue) {
        tracing::debug!(facet = %value.facet(), value = value.value(), "select filter");
        self.filters.select(value);
        self.filters_changed();
    }

    pub fn deselect(&mut self, value: &FacetValue) {
        tracing::debug!(facet = %value.facet(), value = value.value(), "deselect filter");
        self.filters.deselect(value);
        self.filters_changed();
    }

    pub fn set_in_stock(&mut self, in_stock: bool) {
        tracing::debug!(in_stock, "set stock filter");
        self.filters.in_stock = in_stock;
        self.filters_changed();
    }

    pub fn reset_filters(&mut self) {
        tracing::debug!("reset filters");
        self.filters.clear();
        self.filters_changed();
    }

    /// Move to page `page`, clamped to the pages that exist; returns the page landed on.
    pub fn set_page(&mut self, page: usize) -> usize {
        let last = self.total_pages().max(1);
        self.current_page = page.clamp(1, last);
        if self.current_page != page {
            tracing::debug!(requested = page, page = self.current_page, "page clamped");
        }
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        let matching = self
            .products
            .iter()
            .filter(|p| filter::matches(p, &self.filters, &self.vocabulary.price_ranges))
            .count();
        self.paginator.total_pages(matching)
    }

    pub fn filtered(&self) -> Vec<&Product> {
        filter::filter_products(&self.products, &self.filters, &self.vocabulary.price_ranges)
    }

    pub fn facet_counts(&self) -> FacetCounts {
        self.counter
            .count(&self.products, &self.vocabulary, &self.filters)
    }

    pub fn view(&self) -> CatalogView<'_> {
        let filtered = self.filtered();
        let page = self.paginator.paginate(&filtered, self.current_page);
        tracing::trace!(
            base = self.products.len(),
            filtered = filtered.len(),
            page = page.current_page,
            total_pages = page.total_pages,
            "catalog view computed"
        );

        CatalogView {
            facets: &self.vocabulary,
            facet_counts: self.facet_counts(),
            filters: &self.filters,
            filtered_products: filtered,
            page,
        }
    }

    // A page number only means something for the filtered set it was computed against.
    fn filters_changed(&mut self) {
        self.current_page = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FacetCountingMode;
    use crate::counts::IsolatedFacetCounter;
    use crate::pagination::PageEntry;
    use bazaar_core::{CategoryId, ProductId};
    use bazaar_products::{Category, CategoryTree, InMemoryCatalog, StockStatus};

    fn catalog_of(count: usize) -> Vec<Product> {
        (0..count)
            .map(|i| {
                Product::new(ProductId::new(), format!("item {i}"))
                    .with_price(100.0 + (i % 5) as f64 * 100.0)
                    .with_brand(if i % 2 == 0 { "Sony" } else { "Apple" })
                    .with_condition(if i % 10 == 0 { "used" } else { "new" })
                    .with_stock(if i % 3 == 0 { StockStatus::InStock } else { StockStatus::OutOfStock })
            })
            .collect()
    }

    fn browser_with(count: usize) -> CatalogBrowser {
        let mut browser = CatalogBrowser::new(&BrowseConfig::default()).unwrap();
        browser.set_products(catalog_of(count));
        browser
    }

    #[test]
    fn new_browser_is_empty() {
        let browser = CatalogBrowser::new(&BrowseConfig::default()).unwrap();
        let view = browser.view();

        assert!(view.facets.is_empty());
        assert!(view.filtered_products.is_empty());
        assert_eq!(view.page.total_pages, 0);
        assert!(view.page.window.is_empty());
        assert_eq!(view.facet_counts, FacetCounts::default());
    }

    #[test]
    fn rejects_invalid_config() {
        let config = BrowseConfig {
            page_size: 0,
            ..BrowseConfig::default()
        };
        assert!(CatalogBrowser::new(&config).is_err());
    }

    #[test]
    fn set_page_clamps_to_existing_pages() {
        let mut browser = browser_with(100);
        assert_eq!(browser.total_pages(), 5);
        assert_eq!(browser.set_page(3), 3);
        assert_eq!(browser.set_page(9), 5);
        assert_eq!(browser.set_page(0), 1);

        let mut empty = browser_with(0);
        assert_eq!(empty.set_page(4), 1);
    }

    #[test]
    fn filter_change_resets_page() {
        let mut browser = browser_with(200);
        browser.set_page(3);

        browser.select(FacetValue::Condition("used".into()));
        assert_eq!(browser.current_page(), 1);
        assert_eq!(browser.view().page.total_pages, 1);

        browser.set_page(1);
        browser.set_in_stock(true);
        assert_eq!(browser.current_page(), 1);
    }

    #[test]
    fn every_mutator_resets_page() {
        let mut browser = browser_with(200);
        let sony = FacetValue::Brand("Sony".into());

        browser.set_page(4);
        browser.set_filter(sony.clone());
        assert_eq!(browser.current_page(), 1);

        browser.set_page(2);
        browser.deselect(&sony);
        assert_eq!(browser.current_page(), 1);

        browser.set_page(5);
        browser.reset_filters();
        assert_eq!(browser.current_page(), 1);
        assert!(browser.filters().is_empty());
    }

    #[test]
    fn set_filter_toggles() {
        let mut browser = browser_with(10);
        let apple = FacetValue::Brand("Apple".into());

        assert!(browser.set_filter(apple.clone()));
        assert_eq!(browser.filtered().len(), 5);
        assert!(!browser.set_filter(apple));
        assert_eq!(browser.filtered().len(), 10);
    }

    #[test]
    fn view_pages_the_filtered_set() {
        let mut browser = browser_with(100);
        browser.select(FacetValue::Brand("Sony".into()));
        browser.set_page(2);

        let view = browser.view();
        assert_eq!(view.filtered_products.len(), 50);
        assert_eq!(view.page.total_pages, 3);
        assert_eq!(view.page.current_page, 2);
        assert_eq!(view.page.items.len(), 20);
        assert!(view.page.items.iter().all(|p| p.brand_name() == Some("Sony")));
        assert_eq!(
            view.page.window.entries(),
            &[PageEntry::Page(1), PageEntry::Page(2), PageEntry::Page(3)]
        );
    }

    #[test]
    fn counts_stay_on_the_base_set_by_default() {
        let mut browser = browser_with(100);
        let before = browser.facet_counts();
        browser.select(FacetValue::Brand("Apple".into()));
        browser.set_in_stock(true);
        assert_eq!(browser.facet_counts(), before);
        assert_eq!(before.brands["Sony"], 50);
    }

    #[test]
    fn narrowing_counter_can_be_swapped_in() {
        let config = BrowseConfig {
            facet_counting: FacetCountingMode::Narrowing,
            ..BrowseConfig::default()
        };
        let mut browser = CatalogBrowser::new(&config).unwrap();
        browser.set_products(catalog_of(100));
        browser.select(FacetValue::Condition("used".into()));

        let counts = browser.facet_counts();
        // items 0, 10, 20, ... are used; all have even indices, so all are Sony
        assert_eq!(counts.brands["Sony"], 10);
        assert_eq!(counts.brands["Apple"], 0);
    }

    #[test]
    fn new_base_set_keeps_selection_but_ignores_stale_ranges() {
        let mut browser = CatalogBrowser::with_counter(&BrowseConfig::default(), Box::new(IsolatedFacetCounter)).unwrap();
        browser.set_products(catalog_of(50));
        let key = browser.vocabulary().price_ranges[0].key.clone();
        browser.select(FacetValue::PriceRange(key.clone()));
        let narrowed = browser.filtered().len();
        assert!(narrowed < 50);

        let cheap: Vec<_> = (0..30)
            .map(|i| Product::new(ProductId::new(), format!("cheap {i}")).with_price(5.0 + i as f64))
            .collect();
        browser.set_products(cheap);

        assert!(browser.filters().price_range.contains(&key));
        assert!(browser.vocabulary().price_range(&key).is_none());
        assert_eq!(browser.filtered().len(), 30);
        assert_eq!(browser.current_page(), 1);
    }

    #[test]
    fn loads_scope_from_catalog_source() {
        let books = CategoryId::new();
        let tree = CategoryTree::new(vec![Category {
            id: books,
            name: "Books".to_string(),
            subcategories: vec![],
        }]);
        let products = catalog_of(30)
            .into_iter()
            .enumerate()
            .map(|(i, p)| if i < 25 { p.placed_in(books, None, None) } else { p })
            .collect();
        let source = InMemoryCatalog::new(tree, products);

        let mut browser = CatalogBrowser::new(&BrowseConfig::default()).unwrap();
        browser
            .load_scope(&source, &CategoryScope::category(books))
            .unwrap();
        assert_eq!(browser.products().len(), 25);
        assert_eq!(browser.total_pages(), 2);

        let err = browser
            .load_scope(&source, &CategoryScope::category(CategoryId::new()))
            .unwrap_err();
        assert!(matches!(err, bazaar_core::DomainError::NotFound(_)));
        assert_eq!(browser.products().len(), 25);
    }

    #[test]
    fn view_serializes_for_the_ui() {
        let mut browser = browser_with(3);
        browser.select(FacetValue::Condition("used".into()));
        let json = serde_json::to_value(browser.view()).unwrap();

        assert_eq!(json["page"]["currentPage"], 1);
        assert_eq!(json["page"]["totalPages"], 1);
        assert_eq!(json["page"]["window"], serde_json::json!([1]));
        assert_eq!(json["filters"]["condition"], serde_json::json!(["used"]));
        assert_eq!(json["facetCounts"]["conditions"]["new"], 2);
        assert_eq!(json["facets"]["priceRanges"][0]["key"], "100-139");
    }
}
