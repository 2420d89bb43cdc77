use anyhow::{Context, Result};
use clap::Parser;

use bazaar_catalog::{BrowseConfig, CatalogBrowser};
use bazaar_products::{CatalogSource, InMemoryCatalog};

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    bazaar_observability::init();
    let cli = Cli::parse();

    let raw = std::fs::read_to_string(&cli.catalog)
        .with_context(|| format!("failed to read catalog {}", cli.catalog.display()))?;
    let catalog: InMemoryCatalog = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse catalog {}", cli.catalog.display()))?;
    tracing::info!(products = catalog.len(), "catalog loaded");

    let Some(scope) = cli.scope().filter(|_| !cli.tree) else {
        let tree = catalog.category_tree()?;
        println!("{}", serde_json::to_string_pretty(&tree)?);
        return Ok(());
    };

    let config = BrowseConfig::from_env();
    let mut browser = CatalogBrowser::new(&config)?;
    browser
        .load_scope(&catalog, &scope)
        .context("failed to load category scope")?;

    for value in cli.selections() {
        browser.select(value);
    }
    browser.set_in_stock(cli.in_stock);
    let page = browser.set_page(cli.page);
    if page != cli.page {
        tracing::warn!(requested = cli.page, page, "requested page out of range");
    }

    println!("{}", serde_json::to_string_pretty(&browser.view())?);
    Ok(())
}
