//! Command dispatch.
//!
//! Front ends translate user actions into a [`CartCommand`] and pass it to
//! [`Storefront::apply`]. After every call they re-read whatever they display
//! through the accessors; nothing is pushed to them.

use technova_core::{Email, ProductId};

use crate::clock::Clock;
use crate::db::Store;
use crate::db::orders::OrderRepository;
use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::{Account, Cart, Catalog, Order};
use crate::services::admin::AdminConsole;
use crate::services::auth::AccountDirectory;
use crate::services::cart::CartLedger;
use crate::services::checkout::CheckoutService;

/// A cart or checkout action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    /// Add one unit.
    Add {
        product_id: ProductId,
        name: String,
        unit_price: u64,
    },
    /// Adjust a line by `delta` units.
    ChangeQuantity { product_id: ProductId, delta: i64 },
    /// Drop a line.
    Remove { product_id: ProductId },
    /// Empty the cart.
    Clear,
    /// Place an order for the cart.
    Checkout,
}

/// Result of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The cart changed; the badge and total to show.
    CartUpdated { item_count: u64, total: u64 },
    /// An order was placed and the cart emptied.
    OrderPlaced(Order),
}

impl CommandOutcome {
    fn from_cart(cart: &Cart) -> Self {
        Self::CartUpdated {
            item_count: cart.item_count(),
            total: cart.total(),
        }
    }
}

/// Entry point tying the services to one store and clock.
pub struct Storefront<'a> {
    store: &'a dyn Store,
    clock: &'a dyn Clock,
}

impl<'a> Storefront<'a> {
    #[must_use]
    pub const fn new(store: &'a dyn Store, clock: &'a dyn Clock) -> Self {
        Self { store, clock }
    }

    /// Run one command to completion.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the cart cannot be read or written, and
    /// `AppError::Checkout` if checkout is refused.
    pub fn apply(&self, command: CartCommand) -> Result<CommandOutcome> {
        let ledger = self.ledger();
        let cart = match command {
            CartCommand::Add {
                product_id,
                name,
                unit_price,
            } => ledger.add(product_id, name, unit_price)?,
            CartCommand::ChangeQuantity { product_id, delta } => {
                ledger.change_quantity(&product_id, delta)?
            }
            CartCommand::Remove { product_id } => ledger.remove(&product_id)?,
            CartCommand::Clear => ledger.clear()?,
            CartCommand::Checkout => {
                let order = CheckoutService::new(self.store, self.clock).checkout()?;
                return Ok(CommandOutcome::OrderPlaced(order));
            }
        };
        Ok(CommandOutcome::from_cart(&cart))
    }

    /// Add one unit of a catalog product, taking name and price from the
    /// catalog.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the product is not in the catalog.
    pub fn add_product(&self, product_id: &ProductId) -> Result<CommandOutcome> {
        let product = ProductRepository::new(self.store)
            .find_by_id(product_id)?
            .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

        self.apply(CartCommand::Add {
            product_id: product.id,
            name: product.name,
            unit_price: product.unit_price,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The catalog.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the catalog cannot be read.
    pub fn catalog(&self) -> Result<Catalog> {
        Ok(ProductRepository::new(self.store).load()?)
    }

    /// The cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the cart cannot be read.
    pub fn cart(&self) -> Result<Cart> {
        Ok(self.ledger().cart()?)
    }

    #[must_use]
    pub const fn ledger(&self) -> CartLedger<'a> {
        CartLedger::new(self.store)
    }

    #[must_use]
    pub const fn accounts(&self) -> AccountDirectory<'a> {
        AccountDirectory::new(self.store)
    }

    #[must_use]
    pub const fn admin(&self) -> AdminConsole<'a> {
        AdminConsole::new(self.store)
    }

    /// Orders placed by `email`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the order log cannot be read.
    pub fn orders_for(&self, email: &Email) -> Result<Vec<Order>> {
        Ok(OrderRepository::new(self.store)
            .load()?
            .for_customer(email)
            .cloned()
            .collect())
    }

    /// The signed-in account, if any.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Account` if the session cannot be resolved.
    pub fn profile(&self) -> Result<Option<Account>> {
        Ok(self.accounts().current_account()?)
    }

    /// The signed-in account and its order history.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Account` with `NoActiveSession` if nobody is signed in.
    pub fn my_orders(&self) -> Result<(Account, Vec<Order>)> {
        let account = self.accounts().require_account()?;
        let orders = self.orders_for(&account.email)?;
        Ok((account, orders))
    }
}
