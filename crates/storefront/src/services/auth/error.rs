//! Account error types.

use thiserror::Error;

use crate::db::StoreError;

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] technova_core::EmailError),

    /// Wrong secret or unknown email.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account with this email already exists.
    #[error("email already registered")]
    DuplicateEmail,

    /// The operation needs a signed-in account.
    #[error("no active session")]
    NoActiveSession,

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
