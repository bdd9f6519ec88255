//! Catalog and seeding commands.

use technova_core::format_clp;
use technova_storefront::Storefront;
use technova_storefront::db::Store;
use technova_storefront::error::Result;
use technova_storefront::models::Product;
use technova_storefront::services::seed;

/// Run the seeders.
pub fn seed(store: &dyn Store) -> Result<()> {
    let report = seed::seed_defaults(store)?;
    if report == seed::SeedReport::default() {
        tracing::info!("Store already seeded; nothing to do");
    } else {
        tracing::info!(
            products = report.products,
            users = report.users,
            "Seeded defaults"
        );
    }
    Ok(())
}

/// List the catalog.
pub fn products(storefront: &Storefront<'_>) -> Result<()> {
    let catalog = storefront.catalog()?;
    if catalog.is_empty() {
        tracing::info!(
            "The catalog is empty. Run `tn-cli seed` to load the default products."
        );
        return Ok(());
    }

    for product in catalog.list_all() {
        log_product(product);
    }
    Ok(())
}

pub(crate) fn log_product(product: &Product) {
    tracing::info!(
        "{:<6} {:<28} {:>10}  stock {}",
        product.id.as_str(),
        product.name,
        format_clp(product.unit_price),
        product.stock
    );
}
