//! Account commands.

use technova_storefront::Storefront;
use technova_storefront::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use technova_storefront::models::NewAccount;
use technova_storefront::receipt::render_receipt;
use technova_storefront::services::auth::validation::{describe, validate_registration};

/// Register a customer account and sign it in.
pub fn register(storefront: &Storefront<'_>, form: NewAccount) -> Result<()> {
    validate_registration(&form).map_err(|fields| AppError::BadRequest(describe(&fields)))?;

    let account = storefront.accounts().sign_up(form)?;
    set_sentry_user(&account.id, Some(account.email.as_str()));
    tracing::info!("Welcome, {}! You are now signed in.", account.short_name());
    Ok(())
}

/// Sign in.
pub fn login(storefront: &Storefront<'_>, email: &str, password: &str) -> Result<()> {
    let account = storefront.accounts().login(email, password)?;
    set_sentry_user(&account.id, Some(account.email.as_str()));
    tracing::info!("Signed in as {} ({})", account.display_name(), account.role);
    Ok(())
}

/// Sign out.
pub fn logout(storefront: &Storefront<'_>) -> Result<()> {
    storefront.accounts().logout()?;
    clear_sentry_user();
    tracing::info!("Signed out");
    Ok(())
}

/// Show the signed-in account.
pub fn whoami(storefront: &Storefront<'_>) -> Result<()> {
    match storefront.profile()? {
        Some(account) => {
            tracing::info!("{} <{}>", account.display_name(), account.email);
            tracing::info!("RUN: {}  Role: {}", account.id, account.role);
            if !account.address.is_empty() {
                tracing::info!("Address: {}", account.address);
            }
        }
        None => tracing::info!("Not signed in"),
    }
    Ok(())
}

/// Show the signed-in account's order history.
pub fn orders(storefront: &Storefront<'_>) -> Result<()> {
    let (account, orders) = storefront.my_orders()?;
    if orders.is_empty() {
        tracing::info!("No orders yet for {}", account.email);
        return Ok(());
    }

    for order in &orders {
        for line in render_receipt(order).lines() {
            tracing::info!("{line}");
        }
        tracing::info!("");
    }
    Ok(())
}
