//! Cart ledger types.
//!
//! The cart holds at most one line per product, and every line has a quantity
//! of at least one. A change that would take a line to zero or below removes
//! the line instead.

use serde::{Deserialize, Serialize};

use technova_core::ProductId;

/// One product in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product this line refers to.
    #[serde(rename = "id")]
    pub product_id: ProductId,
    /// Product name at the time it was added.
    pub name: String,
    /// Unit price at the time it was added.
    #[serde(rename = "price")]
    pub unit_price: u64,
    /// Units requested. Always at least 1.
    #[serde(rename = "qty")]
    pub quantity: u32,
}

impl CartLine {
    /// `unit_price * quantity`.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

/// The shopping cart, in the order products were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Line for a product, if present.
    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product_id == product_id)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing line, or appends a new line with quantity 1.
    /// Name and price of an existing line are left as first recorded.
    pub fn add(&mut self, product_id: ProductId, name: String, unit_price: u64) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine {
                product_id,
                name,
                unit_price,
                quantity: 1,
            });
        }
    }

    /// Adjust a line's quantity by `delta`.
    ///
    /// Returns the new quantity, or `None` if the line was removed (result
    /// `<= 0`) or was never in the cart.
    pub fn change_quantity(&mut self, product_id: &ProductId, delta: i64) -> Option<u32> {
        let pos = self.lines.iter().position(|l| &l.product_id == product_id)?;
        let line = self.lines.get_mut(pos)?;
        let updated = i64::from(line.quantity).saturating_add(delta);

        if updated <= 0 {
            self.lines.remove(pos);
            return None;
        }

        line.quantity = u32::try_from(updated).unwrap_or(u32::MAX);
        Some(line.quantity)
    }

    /// Remove a product's line. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| &l.product_id != product_id);
        self.lines.len() != before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `unit_price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.lines
            .iter()
            .fold(0, |acc, line| acc.saturating_add(line.subtotal()))
    }

    /// Sum of quantities (the cart badge count).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }
}

/// Stored lines are normalised on load: zero-quantity lines are dropped and
/// duplicate product lines are merged into the first occurrence.
impl From<Vec<CartLine>> for Cart {
    fn from(stored: Vec<CartLine>) -> Self {
        let mut lines: Vec<CartLine> = Vec::with_capacity(stored.len());
        for line in stored.into_iter().filter(|l| l.quantity > 0) {
            match lines.iter_mut().find(|l| l.product_id == line.product_id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => lines.push(line),
            }
        }
        Self { lines }
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn p(id: &str) -> ProductId {
        ProductId::new(id)
    }

    #[test]
    fn test_add_twice_merges_into_one_line() {
        let mut cart = Cart::new();
        cart.add(p("P001"), "Martillo".into(), 15_990);
        cart.add(p("P001"), "Martillo".into(), 15_990);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line(&p("P001")).unwrap().quantity, 2);
        assert_eq!(cart.total(), 31_980);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_change_quantity_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(p("P001"), "Martillo".into(), 15_990);
        cart.add(p("P001"), "Martillo".into(), 15_990);

        assert_eq!(cart.change_quantity(&p("P001"), -2), None);
        assert!(cart.line(&p("P001")).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_change_quantity_below_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(p("P001"), "Martillo".into(), 100);
        assert_eq!(cart.change_quantity(&p("P001"), -10), None);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_change_quantity_increments() {
        let mut cart = Cart::new();
        cart.add(p("P002"), "Teclado".into(), 34_990);
        assert_eq!(cart.change_quantity(&p("P002"), 3), Some(4));
        assert_eq!(cart.total(), 4 * 34_990);
    }

    #[test]
    fn test_change_quantity_unknown_product_is_noop() {
        let mut cart = Cart::new();
        cart.add(p("P001"), "Martillo".into(), 100);
        assert_eq!(cart.change_quantity(&p("P404"), 1), None);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new();
        cart.add(p("P001"), "Martillo".into(), 100);
        cart.add(p("P002"), "Teclado".into(), 200);

        assert!(cart.remove(&p("P001")));
        assert!(!cart.remove(&p("P001")));
        assert_eq!(cart.total(), 200);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0);
    }

    #[test]
    fn test_stored_lines_are_normalised() {
        let raw = r#"[
            {"id":"P001","name":"Martillo","price":100,"qty":0},
            {"id":"P002","name":"Teclado","price":200,"qty":1},
            {"id":"P002","name":"Teclado","price":200,"qty":2}
        ]"#;
        let cart: Cart = serde_json::from_str(raw).unwrap();
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line(&p("P002")).unwrap().quantity, 3);
    }

    #[test]
    fn test_negative_stored_quantity_is_rejected() {
        let raw = r#"[{"id":"P001","name":"Martillo","price":100,"qty":-1}]"#;
        assert!(serde_json::from_str::<Cart>(raw).is_err());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(u8),
        Change(u8, i64),
        Remove(u8),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0_u8..4).prop_map(Op::Add),
            ((0_u8..4), -5_i64..5).prop_map(|(i, d)| Op::Change(i, d)),
            (0_u8..4).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn prop_lines_stay_positive_and_total_reconciles(
            ops in prop::collection::vec(op(), 0..64)
        ) {
            let mut cart = Cart::new();
            for op in ops {
                match op {
                    Op::Add(i) => {
                        let price = u64::from(i) * 1_000 + 990;
                        cart.add(p(&format!("P{i}")), format!("Item {i}"), price);
                    }
                    Op::Change(i, d) => {
                        cart.change_quantity(&p(&format!("P{i}")), d);
                    }
                    Op::Remove(i) => {
                        cart.remove(&p(&format!("P{i}")));
                    }
                }

                prop_assert!(cart.lines().iter().all(|l| l.quantity >= 1));

                let expected: u64 = cart
                    .lines()
                    .iter()
                    .map(|l| l.unit_price * u64::from(l.quantity))
                    .sum();
                prop_assert_eq!(cart.total(), expected);
            }
        }
    }
}
