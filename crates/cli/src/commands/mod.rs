//! Subcommand implementations.
//!
//! Each command drives the library through a [`technova_storefront::Storefront`]
//! and reports results through `tracing`.

pub mod account;
pub mod admin;
pub mod cart;
pub mod catalog;
