//! Catalog domain types.

use serde::{Deserialize, Serialize};

use technova_core::ProductId;

/// A product offered in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product code (e.g., `P001`).
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in CLP.
    #[serde(rename = "price")]
    pub unit_price: u64,
    /// Units available for sale.
    pub stock: u32,
    /// Image path used by front ends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Free-form category label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Product {
    /// Create a product with no image or category.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: u64,
        stock: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            stock,
            image: None,
            category: None,
        }
    }
}

/// The catalog: products in the order they were first written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Wrap an ordered product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find_by_id(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn list_all(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Remove `amount` units from a product's stock.
    ///
    /// Callers validate `amount <= stock` beforehand; the subtraction
    /// saturates at zero rather than re-checking. Unknown ids are ignored.
    pub fn decrement_stock(&mut self, id: &ProductId, amount: u32) {
        if let Some(product) = self.products.iter_mut().find(|p| &p.id == id) {
            product.stock = product.stock.saturating_sub(amount);
        }
    }

    /// Insert or replace a product.
    ///
    /// A replaced product keeps its position. Returns `true` if an existing
    /// product was replaced.
    pub fn upsert(&mut self, product: Product) -> bool {
        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => {
                *existing = product;
                true
            }
            None => {
                self.products.push(product);
                false
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Product::new("P001", "Martillo", 15_990, 25),
            Product::new("P002", "Teclado", 34_990, 12),
        ])
    }

    #[test]
    fn test_find_by_id() {
        let catalog = catalog();
        assert_eq!(
            catalog.find_by_id(&ProductId::new("P002")).unwrap().name,
            "Teclado"
        );
        assert!(catalog.find_by_id(&ProductId::new("P999")).is_none());
    }

    #[test]
    fn test_decrement_stock() {
        let mut catalog = catalog();
        catalog.decrement_stock(&ProductId::new("P001"), 2);
        assert_eq!(
            catalog.find_by_id(&ProductId::new("P001")).unwrap().stock,
            23
        );
    }

    #[test]
    fn test_decrement_stock_never_goes_below_zero() {
        let mut catalog = catalog();
        catalog.decrement_stock(&ProductId::new("P002"), 50);
        assert_eq!(
            catalog.find_by_id(&ProductId::new("P002")).unwrap().stock,
            0
        );
    }

    #[test]
    fn test_upsert_keeps_position() {
        let mut catalog = catalog();
        let replaced = catalog.upsert(Product::new("P001", "Martillo 20oz", 17_990, 5));
        assert!(replaced);
        assert_eq!(catalog.list_all().first().unwrap().name, "Martillo 20oz");

        let replaced = catalog.upsert(Product::new("P003", "Audífonos", 22_500, 30));
        assert!(!replaced);
        let ids: Vec<&str> = catalog.list_all().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["P001", "P002", "P003"]);
    }

    #[test]
    fn test_stored_shape_uses_price_field() {
        let product = Product::new("P001", "Martillo", 15_990, 25);
        let json = serde_json::to_value(product).unwrap();
        assert_eq!(json.get("price"), Some(&serde_json::json!(15_990)));
        assert!(json.get("image").is_none());
    }

    #[test]
    fn test_record_missing_fields_is_rejected() {
        let parsed = serde_json::from_str::<Catalog>(r#"[{"id":"P001","name":"Martillo"}]"#);
        assert!(parsed.is_err());
    }
}
