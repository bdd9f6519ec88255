//! Staff console commands.
//!
//! Every command here requires a signed-in `admin` or `seller` account.

use technova_core::format_clp;
use technova_storefront::Storefront;
use technova_storefront::error::Result;
use technova_storefront::receipt::render_receipt;
use technova_storefront::services::admin::{INITIAL_SECRET, ProductInput, UserInput};

use super::catalog::log_product;

/// Create or replace a product.
pub fn product(storefront: &Storefront<'_>, input: ProductInput) -> Result<()> {
    let product = storefront.admin().upsert_product(input)?;
    tracing::info!(
        "Saved {} ({}) at {}",
        product.id,
        product.name,
        format_clp(product.unit_price)
    );
    Ok(())
}

/// Create a user with the initial password.
pub fn user(storefront: &Storefront<'_>, input: UserInput) -> Result<()> {
    let account = storefront.admin().create_user(input)?;
    tracing::info!(
        "Created {} as {}. Initial password: {INITIAL_SECRET}",
        account.email,
        account.role
    );
    Ok(())
}

/// List users.
pub fn users(storefront: &Storefront<'_>) -> Result<()> {
    for account in storefront.admin().users()? {
        tracing::info!(
            "{:<10} {:<28} {:<24} {}",
            account.id.as_str(),
            account.display_name(),
            account.email.as_str(),
            account.role
        );
    }
    Ok(())
}

/// List products.
pub fn products(storefront: &Storefront<'_>) -> Result<()> {
    for product in storefront.admin().products()? {
        log_product(&product);
    }
    Ok(())
}

/// List every order.
pub fn orders(storefront: &Storefront<'_>) -> Result<()> {
    let orders = storefront.admin().orders()?;
    if orders.is_empty() {
        tracing::info!("No orders yet");
    }
    for order in &orders {
        for line in render_receipt(order).lines() {
            tracing::info!("{line}");
        }
        tracing::info!("");
    }
    Ok(())
}
