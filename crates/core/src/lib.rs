//! Core - Shared types library.
//!
//! This crate provides common types used across all storefront components:
//! - `storefront` - Catalog, cart, checkout, accounts and the admin console
//! - `cli` - Command-line front end over a file-backed store
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no storage
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, emails, secrets, roles and money display

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
