//! Admin console.
//!
//! Product and user management plus read-only listings. Every operation
//! requires the signed-in account to have a staff role (`Admin` or `Seller`).

use thiserror::Error;
use tracing::instrument;

use technova_core::{ProductId, Role};

use crate::db::orders::OrderRepository;
use crate::db::products::ProductRepository;
use crate::db::{Store, StoreError};
use crate::models::{Account, NewAccount, Order, Product};
use crate::services::auth::validation::{self, FieldError};
use crate::services::auth::{AccountDirectory, AccountError};

/// Secret assigned to accounts created from the console.
pub const INITIAL_SECRET: &str = "1234";

/// Image used for products created without one.
pub const PLACEHOLDER_IMAGE: &str = "images/placeholder.png";

/// Errors from admin console operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// The session is missing or does not belong to staff.
    #[error("admin console access is restricted to staff accounts")]
    Forbidden,

    /// Product form failed validation.
    #[error("invalid product: {0}")]
    InvalidProduct(&'static str),

    /// User form failed validation.
    #[error("invalid user: {}", validation::describe(.0))]
    InvalidUser(Vec<FieldError>),

    /// Account operation failed.
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Product form submitted from the console.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub id: String,
    pub name: String,
    pub price: u64,
    pub stock: u32,
    pub category: Option<String>,
}

/// User form submitted from the console.
#[derive(Debug, Clone)]
pub struct UserInput {
    pub run: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub role: Role,
}

/// Staff-only management operations.
pub struct AdminConsole<'a> {
    store: &'a dyn Store,
    accounts: AccountDirectory<'a>,
}

impl<'a> AdminConsole<'a> {
    /// Create an admin console over `store`.
    #[must_use]
    pub const fn new(store: &'a dyn Store) -> Self {
        Self {
            store,
            accounts: AccountDirectory::new(store),
        }
    }

    /// The signed-in staff account.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Forbidden` if nobody is signed in or the account
    /// is a customer.
    pub fn require_staff(&self) -> Result<Account, AdminError> {
        match self.accounts.current_account()? {
            Some(account) if account.role.can_administer() => Ok(account),
            _ => Err(AdminError::Forbidden),
        }
    }

    /// Create or replace a product. Returns the stored product.
    ///
    /// A replaced product keeps its catalog position and image.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Forbidden` for non-staff sessions.
    /// Returns `AdminError::InvalidProduct` if the id or name is blank or the
    /// price is zero.
    #[instrument(skip(self), fields(product_id = %input.id))]
    pub fn upsert_product(&self, input: ProductInput) -> Result<Product, AdminError> {
        let staff = self.require_staff()?;

        let id = input.id.trim();
        let name = input.name.trim();
        if id.is_empty() {
            return Err(AdminError::InvalidProduct("code is required"));
        }
        if name.is_empty() {
            return Err(AdminError::InvalidProduct("name is required"));
        }
        if input.price == 0 {
            return Err(AdminError::InvalidProduct("price must be greater than 0"));
        }

        let products = ProductRepository::new(self.store);
        let mut catalog = products.load()?;
        let id = ProductId::new(id);
        let image = catalog
            .find_by_id(&id)
            .and_then(|p| p.image.clone())
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_owned());

        let product = Product {
            id,
            name: name.to_owned(),
            unit_price: input.price,
            stock: input.stock,
            image: Some(image),
            category: input.category.filter(|c| !c.trim().is_empty()),
        };
        let replaced = catalog.upsert(product.clone());
        products.save(&catalog)?;

        tracing::info!(by = %staff.email, replaced, "Product saved");
        Ok(product)
    }

    /// Create an account with the given role and the initial secret.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Forbidden` for non-staff sessions.
    /// Returns `AdminError::InvalidUser` if the RUN, name, surname or email
    /// fails the form checks.
    /// Returns `AdminError::Account` on a duplicate email.
    #[instrument(skip(self), fields(email = %input.email))]
    pub fn create_user(&self, input: UserInput) -> Result<Account, AdminError> {
        let staff = self.require_staff()?;

        let new = NewAccount {
            id: input.run,
            name: input.name,
            surname: input.surname,
            email: input.email,
            secret: INITIAL_SECRET.to_owned(),
            address: String::new(),
        };
        validation::validate_identity(&new).map_err(AdminError::InvalidUser)?;

        let account = self.accounts.insert_with_role(new, input.role)?;

        tracing::info!(by = %staff.email, role = %account.role, "User created");
        Ok(account)
    }

    /// All accounts.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Forbidden` for non-staff sessions.
    pub fn users(&self) -> Result<Vec<Account>, AdminError> {
        self.require_staff()?;
        Ok(self.accounts.list()?)
    }

    /// All products in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Forbidden` for non-staff sessions.
    pub fn products(&self) -> Result<Vec<Product>, AdminError> {
        self.require_staff()?;
        Ok(ProductRepository::new(self.store)
            .load()?
            .list_all()
            .to_vec())
    }

    /// Every order, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Forbidden` for non-staff sessions.
    pub fn orders(&self) -> Result<Vec<Order>, AdminError> {
        self.require_staff()?;
        Ok(OrderRepository::new(self.store)
            .load()?
            .orders()
            .cloned()
            .collect())
    }
}
