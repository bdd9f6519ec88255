//! Cart ledger service.
//!
//! Every operation loads the stored cart, applies one change and writes it
//! back before returning. There is no staged cart state.

use tracing::instrument;

use technova_core::ProductId;

use crate::db::cart::CartRepository;
use crate::db::{Store, StoreError};
use crate::models::{Cart, CartLine};

/// Persistent cart operations.
pub struct CartLedger<'a> {
    carts: CartRepository<'a>,
}

impl<'a> CartLedger<'a> {
    /// Create a cart ledger over `store`.
    #[must_use]
    pub const fn new(store: &'a dyn Store) -> Self {
        Self {
            carts: CartRepository::new(store),
        }
    }

    /// Current cart contents.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cart cannot be read.
    pub fn cart(&self) -> Result<Cart, StoreError> {
        self.carts.load()
    }

    /// Current lines.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cart cannot be read.
    pub fn lines(&self) -> Result<Vec<CartLine>, StoreError> {
        Ok(self.carts.load()?.lines().to_vec())
    }

    /// Add one unit of a product.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cart cannot be read or written.
    #[instrument(skip(self, name))]
    pub fn add(
        &self,
        product_id: ProductId,
        name: String,
        unit_price: u64,
    ) -> Result<Cart, StoreError> {
        let mut cart = self.carts.load()?;
        cart.add(product_id, name, unit_price);
        self.carts.save(&cart)?;
        tracing::debug!(items = cart.item_count(), "Added to cart");
        Ok(cart)
    }

    /// Adjust a line's quantity; a result of zero or less removes the line.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cart cannot be read or written.
    #[instrument(skip(self))]
    pub fn change_quantity(&self, product_id: &ProductId, delta: i64) -> Result<Cart, StoreError> {
        let mut cart = self.carts.load()?;
        if cart.line(product_id).is_none() {
            return Ok(cart);
        }

        match cart.change_quantity(product_id, delta) {
            Some(quantity) => tracing::debug!(quantity, "Cart quantity changed"),
            None => tracing::debug!("Cart line removed"),
        }
        self.carts.save(&cart)?;
        Ok(cart)
    }

    /// Remove a product's line if present.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cart cannot be read or written.
    #[instrument(skip(self))]
    pub fn remove(&self, product_id: &ProductId) -> Result<Cart, StoreError> {
        let mut cart = self.carts.load()?;
        if cart.remove(product_id) {
            self.carts.save(&cart)?;
            tracing::debug!("Cart line removed");
        }
        Ok(cart)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cart cannot be written.
    pub fn clear(&self) -> Result<Cart, StoreError> {
        let cart = Cart::new();
        self.carts.save(&cart)?;
        tracing::debug!("Cart cleared");
        Ok(cart)
    }

    /// Sum of `unit_price * quantity` over the stored lines.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cart cannot be read.
    pub fn total(&self) -> Result<u64, StoreError> {
        Ok(self.carts.load()?.total())
    }

    /// Sum of quantities over the stored lines.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cart cannot be read.
    pub fn item_count(&self) -> Result<u64, StoreError> {
        Ok(self.carts.load()?.item_count())
    }
}
