//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `cart` - Cart ledger (add, adjust, remove, clear, totals)
//! - `checkout` - Order transaction
//! - `auth` - Account directory, sign-in and the session marker
//! - `admin` - Staff-only catalog and user management
//! - `seed` - First-run catalog and administrator

pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod seed;
