//! Storefront library.
//!
//! Catalog, cart ledger, checkout, account directory and admin console for
//! the demo electronics store. All state lives in a [`db::Store`] that callers
//! construct and lend to each component; operations are synchronous and run
//! to completion.
//!
//! # Modules
//!
//! - [`db`] - Record storage and repositories
//! - [`models`] - Persisted record shapes
//! - [`services`] - Cart, checkout, accounts, admin and seeding
//! - [`commands`] - Single dispatch point for front ends
//! - [`receipt`] - Plain-text order receipts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod clock;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod receipt;
pub mod services;

pub use clock::{Clock, SystemClock};
pub use commands::{CartCommand, CommandOutcome, Storefront};
pub use error::{AppError, Result};
