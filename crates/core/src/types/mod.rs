//! Core types shared by the storefront crates.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod credential;
pub mod email;
pub mod id;
pub mod money;
pub mod role;

pub use credential::CredentialSecret;
pub use email::{Email, EmailError};
pub use id::*;
pub use money::format_clp;
pub use role::{Role, RoleParseError};
