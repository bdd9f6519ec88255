//! Cart and checkout commands.

use technova_core::{ProductId, format_clp};
use technova_storefront::error::Result;
use technova_storefront::receipt::render_receipt;
use technova_storefront::{CartCommand, CommandOutcome, Storefront};

/// Add one unit of a catalog product.
pub fn add(storefront: &Storefront<'_>, product_id: &str) -> Result<()> {
    let outcome = storefront.add_product(&ProductId::new(product_id))?;
    log_outcome(&outcome);
    Ok(())
}

/// Adjust a line by `delta` units.
pub fn change(storefront: &Storefront<'_>, product_id: &str, delta: i64) -> Result<()> {
    let outcome = storefront.apply(CartCommand::ChangeQuantity {
        product_id: ProductId::new(product_id),
        delta,
    })?;
    log_outcome(&outcome);
    Ok(())
}

/// Drop a line.
pub fn remove(storefront: &Storefront<'_>, product_id: &str) -> Result<()> {
    let outcome = storefront.apply(CartCommand::Remove {
        product_id: ProductId::new(product_id),
    })?;
    log_outcome(&outcome);
    Ok(())
}

/// Empty the cart.
pub fn clear(storefront: &Storefront<'_>) -> Result<()> {
    let outcome = storefront.apply(CartCommand::Clear)?;
    log_outcome(&outcome);
    Ok(())
}

/// Show the cart.
pub fn show(storefront: &Storefront<'_>) -> Result<()> {
    let cart = storefront.cart()?;
    if cart.is_empty() {
        tracing::info!("Your cart is empty");
        return Ok(());
    }

    for line in cart.lines() {
        tracing::info!(
            "{:<6} {}x {} @ {} = {}",
            line.product_id.as_str(),
            line.quantity,
            line.name,
            format_clp(line.unit_price),
            format_clp(line.subtotal())
        );
    }
    tracing::info!(
        "Items: {}  Total: {}",
        cart.item_count(),
        format_clp(cart.total())
    );
    Ok(())
}

/// Place an order for the cart.
pub fn checkout(storefront: &Storefront<'_>) -> Result<()> {
    let outcome = storefront.apply(CartCommand::Checkout)?;
    log_outcome(&outcome);
    Ok(())
}

fn log_outcome(outcome: &CommandOutcome) {
    match outcome {
        CommandOutcome::CartUpdated { item_count, total } => {
            tracing::info!("Cart ({item_count})  Total: {}", format_clp(*total));
        }
        CommandOutcome::OrderPlaced(order) => {
            tracing::info!("Purchase complete");
            for line in render_receipt(order).lines() {
                tracing::info!("{line}");
            }
        }
    }
}
