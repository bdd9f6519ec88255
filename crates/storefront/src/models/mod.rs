//! Domain models for the storefront.
//!
//! These are the record shapes persisted in the store. Required fields are
//! enforced by `serde`: a stored record missing one fails to decode and is
//! replaced by the record's default.

pub mod cart;
pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use cart::{Cart, CartLine};
pub use order::{Order, OrderLog};
pub use product::{Catalog, Product};
pub use session::Session;
pub use user::{Account, NewAccount};
