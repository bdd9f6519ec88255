//! Order transaction.
//!
//! Checkout turns the cart into an order in two phases:
//!
//! 1. **Validate** - a session must be active, the cart must have lines, and
//!    every line must be covered by live catalog stock. All lines are checked
//!    before anything is changed.
//! 2. **Commit** - stock is decremented, the order is stamped and appended to
//!    the log, and the cart is emptied. The catalog, order log and cart are
//!    written with a single [`Store::put_many`], so no reader sees stock taken
//!    without the matching order or an order without its stock.
//!
//! A failed checkout leaves every record as it was.

use thiserror::Error;
use tracing::instrument;

use technova_core::{OrderId, ProductId};

use crate::clock::Clock;
use crate::db::cart::CartRepository;
use crate::db::orders::OrderRepository;
use crate::db::products::ProductRepository;
use crate::db::session::SessionRepository;
use crate::db::users::UserRepository;
use crate::db::{Store, StoreError};
use crate::models::{Account, Cart, CartLine, Catalog, Order};

/// Reasons a checkout is refused.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nobody is signed in.
    #[error("you must sign in to place an order")]
    NoActiveSession,

    /// The cart has no lines.
    #[error("your cart is empty")]
    EmptyCart,

    /// A line asks for more than the catalog holds, or its product is gone.
    #[error("not enough stock for {name}: requested {requested}")]
    OutOfStock {
        product_id: ProductId,
        name: String,
        requested: u32,
        /// `None` when the product no longer exists.
        available: Option<u32>,
    },

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Checkout service.
pub struct CheckoutService<'a> {
    store: &'a dyn Store,
    clock: &'a dyn Clock,
}

impl<'a> CheckoutService<'a> {
    /// Create a checkout service.
    #[must_use]
    pub const fn new(store: &'a dyn Store, clock: &'a dyn Clock) -> Self {
        Self { store, clock }
    }

    /// Place an order for the current cart.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::NoActiveSession` if nobody is signed in.
    /// Returns `CheckoutError::EmptyCart` if the cart has no lines.
    /// Returns `CheckoutError::OutOfStock` for the first line that cannot be
    /// covered. Returns `CheckoutError::Store` if a record cannot be read or
    /// the commit cannot be written.
    #[instrument(skip(self))]
    pub fn checkout(&self) -> Result<Order, CheckoutError> {
        let session = SessionRepository::new(self.store)
            .current()?
            .ok_or(CheckoutError::NoActiveSession)?;

        let cart = CartRepository::new(self.store).load()?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let mut catalog = ProductRepository::new(self.store).load()?;
        validate_stock(&catalog, cart.lines())?;

        // Commit phase: nothing below can be refused by the catalog.
        for line in cart.lines() {
            catalog.decrement_stock(&line.product_id, line.quantity);
        }

        let customer_name = UserRepository::new(self.store)
            .get_by_email(session.email.as_str())?
            .map_or_else(|| session.email.to_string(), |account: Account| account.display_name());

        let mut log = OrderRepository::new(self.store).load()?;
        let now = self.clock.now();
        let id = OrderId::next_after(now, log.last().map(Order::id));
        let lines = cart.lines().to_vec();
        let order = Order::new(id, now, session.email, customer_name, lines);
        debug_assert_eq!(order.total(), cart.total());
        log.append(order.clone());

        self.store.put_many(vec![
            ProductRepository::entry(&catalog)?,
            OrderRepository::entry(&log)?,
            CartRepository::entry(&Cart::new())?,
        ])?;

        tracing::info!(
            order_id = %order.id(),
            customer = %order.customer_email(),
            lines = order.lines().len(),
            total = order.total(),
            "Order placed"
        );

        Ok(order)
    }
}

/// Check every line against the catalog without changing anything.
fn validate_stock(catalog: &Catalog, lines: &[CartLine]) -> Result<(), CheckoutError> {
    for line in lines {
        let available = catalog.find_by_id(&line.product_id).map(|p| p.stock);
        if available.is_none_or(|stock| stock < line.quantity) {
            tracing::info!(
                product_id = %line.product_id,
                requested = line.quantity,
                available = ?available,
                "Checkout refused: insufficient stock"
            );
            return Err(CheckoutError::OutOfStock {
                product_id: line.product_id.clone(),
                name: line.name.clone(),
                requested: line.quantity,
                available,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use technova_core::Email;

    use super::*;
    use crate::clock::FixedClock;
    use crate::db::MemoryStore;
    use crate::models::Product;
    use crate::services::cart::CartLedger;

    fn clock() -> FixedClock {
        FixedClock(Utc.timestamp_millis_opt(1_700_000_000_000).unwrap())
    }

    fn p(id: &str) -> ProductId {
        ProductId::new(id)
    }

    fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        ProductRepository::new(&store)
            .save(&Catalog::new(vec![
                Product::new("P001", "Martillo", 15_990, 25),
                Product::new("P002", "Teclado", 34_990, 3),
            ]))
            .unwrap();
        store
    }

    fn sign_in(store: &MemoryStore, email: &str) {
        SessionRepository::new(store)
            .start(&Email::parse(email).unwrap())
            .unwrap();
    }

    fn stock(store: &MemoryStore, id: &str) -> u32 {
        ProductRepository::new(store)
            .find_by_id(&p(id))
            .unwrap()
            .unwrap()
            .stock
    }

    #[test]
    fn test_requires_session() {
        let store = seeded_store();
        let clock = clock();
        CartLedger::new(&store)
            .add(p("P001"), "Martillo".into(), 15_990)
            .unwrap();

        let err = CheckoutService::new(&store, &clock).checkout().unwrap_err();
        assert!(matches!(err, CheckoutError::NoActiveSession));
    }

    #[test]
    fn test_rejects_empty_cart() {
        let store = seeded_store();
        let clock = clock();
        sign_in(&store, "ana@gmail.com");

        let err = CheckoutService::new(&store, &clock).checkout().unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
    }

    #[test]
    fn test_session_checked_before_cart() {
        let store = seeded_store();
        let clock = clock();
        let err = CheckoutService::new(&store, &clock).checkout().unwrap_err();
        assert!(matches!(err, CheckoutError::NoActiveSession));
    }

    #[test]
    fn test_successful_checkout_commits_everything() {
        let store = seeded_store();
        let clock = clock();
        sign_in(&store, "ana@gmail.com");
        let ledger = CartLedger::new(&store);
        ledger.add(p("P001"), "Martillo".into(), 15_990).unwrap();
        ledger.add(p("P001"), "Martillo".into(), 15_990).unwrap();

        let order = CheckoutService::new(&store, &clock).checkout().unwrap();

        assert_eq!(order.total(), 31_980);
        assert_eq!(order.id().as_str(), "ORD-1700000000000");
        // No account for the session email: the email doubles as the name.
        assert_eq!(order.customer_name(), "ana@gmail.com");
        assert_eq!(stock(&store, "P001"), 23);
        assert!(ledger.cart().unwrap().is_empty());
        assert_eq!(OrderRepository::new(&store).load().unwrap().len(), 1);
    }

    #[test]
    fn test_out_of_stock_changes_nothing() {
        let store = seeded_store();
        let clock = clock();
        sign_in(&store, "ana@gmail.com");
        let ledger = CartLedger::new(&store);
        ledger.add(p("P001"), "Martillo".into(), 15_990).unwrap();
        ledger.add(p("P002"), "Teclado".into(), 34_990).unwrap();
        ledger.change_quantity(&p("P002"), 4).unwrap();

        let err = CheckoutService::new(&store, &clock).checkout().unwrap_err();

        match err {
            CheckoutError::OutOfStock {
                product_id,
                requested,
                available,
                ..
            } => {
                assert_eq!(product_id.as_str(), "P002");
                assert_eq!(requested, 5);
                assert_eq!(available, Some(3));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(stock(&store, "P001"), 25);
        assert_eq!(stock(&store, "P002"), 3);
        assert!(OrderRepository::new(&store).load().unwrap().is_empty());
        assert_eq!(ledger.item_count().unwrap(), 6);
    }

    #[test]
    fn test_unknown_product_is_out_of_stock() {
        let store = seeded_store();
        let clock = clock();
        sign_in(&store, "ana@gmail.com");
        CartLedger::new(&store)
            .add(p("P999"), "Descontinuado".into(), 1_000)
            .unwrap();

        let err = CheckoutService::new(&store, &clock).checkout().unwrap_err();
        let CheckoutError::OutOfStock { available, .. } = err else {
            panic!("expected OutOfStock, got {err:?}");
        };
        assert_eq!(available, None);
    }

    #[test]
    fn test_order_ids_increase_within_same_instant() {
        let store = seeded_store();
        let clock = clock();
        sign_in(&store, "ana@gmail.com");
        let ledger = CartLedger::new(&store);
        let checkout = CheckoutService::new(&store, &clock);

        ledger.add(p("P001"), "Martillo".into(), 15_990).unwrap();
        let first = checkout.checkout().unwrap();
        ledger.add(p("P001"), "Martillo".into(), 15_990).unwrap();
        let second = checkout.checkout().unwrap();

        assert!(second.id().sequence() > first.id().sequence());
    }
}
