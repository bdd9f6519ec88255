//! First-run data.
//!
//! Both seeders only write when their record is absent or unreadable, so
//! running them on every start is safe.

use tracing::instrument;

use technova_core::Role;

use crate::db::products::ProductRepository;
use crate::db::users::UserRepository;
use crate::db::{Store, StoreError};
use crate::models::{Catalog, NewAccount, Product};
use crate::services::auth::{AccountDirectory, AccountError};

/// Email of the seeded administrator.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@duoc.cl";

/// Secret of the seeded administrator.
pub const DEFAULT_ADMIN_SECRET: &str = "admin";

/// What a seeding run wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub products: bool,
    pub users: bool,
}

/// The six launch products.
#[must_use]
pub fn default_products() -> Vec<Product> {
    [
        ("P001", "Martillo de uña 16oz", 15_990, 25, "images/martillo.png"),
        ("P002", "Teclado Mecánico", 34_990, 12, "images/teclado-mecanico.png"),
        ("P003", "Audífonos Bluetooth", 22_500, 30, "images/audifonos.png"),
        ("P004", "Smartwatch FitNova", 29_990, 18, "images/smartwatch.png"),
        ("P005", "Notebook Ultraliviano", 399_990, 7, "images/laptop.png"),
        ("P006", "Silla Gamer Ergonómica", 149_990, 10, "images/silla.png"),
    ]
    .into_iter()
    .map(|(id, name, price, stock, image)| Product {
        image: Some(image.to_owned()),
        ..Product::new(id, name, price, stock)
    })
    .collect()
}

/// Write the default catalog if no usable catalog is stored.
///
/// Returns whether anything was written.
///
/// # Errors
///
/// Returns `StoreError` if the catalog cannot be read or written.
#[instrument(skip(store))]
pub fn seed_products(store: &dyn Store) -> Result<bool, StoreError> {
    let products = ProductRepository::new(store);
    if !products.load()?.is_empty() {
        return Ok(false);
    }

    products.save(&Catalog::new(default_products()))?;
    tracing::info!("Seeded default catalog");
    Ok(true)
}

/// Write the default administrator unless the `users` record holds a list.
///
/// A missing or malformed record is replaced; an empty list is kept.
///
/// Returns whether anything was written.
///
/// # Errors
///
/// Returns `AccountError` if the directory cannot be read or written.
#[instrument(skip(store))]
pub fn seed_users(store: &dyn Store) -> Result<bool, AccountError> {
    if UserRepository::new(store).exists()? {
        return Ok(false);
    }

    AccountDirectory::new(store).insert_with_role(
        NewAccount {
            id: "19011022K".to_owned(),
            name: "Admin".to_owned(),
            surname: "TechNova".to_owned(),
            email: DEFAULT_ADMIN_EMAIL.to_owned(),
            secret: DEFAULT_ADMIN_SECRET.to_owned(),
            address: "Sede Central".to_owned(),
        },
        Role::Admin,
    )?;
    tracing::info!(email = DEFAULT_ADMIN_EMAIL, "Seeded administrator");
    Ok(true)
}

/// Run both seeders.
///
/// # Errors
///
/// Returns `AccountError` if either record cannot be read or written.
pub fn seed_defaults(store: &dyn Store) -> Result<SeedReport, AccountError> {
    Ok(SeedReport {
        products: seed_products(store)?,
        users: seed_users(store)?,
    })
}
