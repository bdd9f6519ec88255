//! Unified error handling with Sentry integration.
//!
//! Each service has its own error enum. `AppError` gathers them for callers
//! that drive several services, such as [`crate::commands::Storefront`] and
//! the CLI. Storage failures are captured to Sentry when reported.

use thiserror::Error;

use crate::db::StoreError;
use crate::services::admin::AdminError;
use crate::services::auth::AccountError;
use crate::services::auth::validation;
use crate::services::checkout::CheckoutError;

const INTERNAL_MESSAGE: &str = "Something went wrong saving your data. Please try again.";

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Checkout was refused.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Account operation failed.
    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    /// Admin console operation failed.
    #[error("Admin error: {0}")]
    Admin(#[from] AdminError),

    /// Unknown product.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad input from the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether the error comes from the backend rather than the caller.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Store(_)
                | Self::Checkout(CheckoutError::Store(_))
                | Self::Account(AccountError::Store(_))
                | Self::Admin(
                    AdminError::Store(_) | AdminError::Account(AccountError::Store(_))
                )
        )
    }

    /// Log the error, capturing backend failures to Sentry.
    pub fn report(&self) {
        if self.is_internal() {
            let event_id = sentry::capture_error(self);
            tracing::error!(error = %self, sentry_event_id = %event_id, "Command error");
        } else {
            tracing::warn!(error = %self, "Command refused");
        }
    }

    /// Message suitable for showing to a shopper.
    ///
    /// Storage details are not exposed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Store(_) | Self::Admin(AdminError::Store(_)) => INTERNAL_MESSAGE.to_string(),
            Self::Checkout(err) => match err {
                CheckoutError::NoActiveSession => {
                    "Please sign in to complete your purchase".to_string()
                }
                CheckoutError::EmptyCart => "Your cart is empty".to_string(),
                CheckoutError::OutOfStock {
                    name, available, ..
                } => match available {
                    Some(available) => {
                        format!("Not enough stock for {name} (available: {available})")
                    }
                    None => format!("{name} is no longer available"),
                },
                CheckoutError::Store(_) => INTERNAL_MESSAGE.to_string(),
            },
            Self::Account(err) | Self::Admin(AdminError::Account(err)) => account_message(err),
            Self::Admin(AdminError::Forbidden) => {
                "Admin console access requires an Admin or Seller account".to_string()
            }
            Self::Admin(AdminError::InvalidProduct(reason)) => format!("Invalid product: {reason}"),
            Self::Admin(AdminError::InvalidUser(fields)) => {
                format!("Invalid user: {}", validation::describe(fields))
            }
            Self::NotFound(_) | Self::BadRequest(_) => self.to_string(),
        }
    }
}

fn account_message(err: &AccountError) -> String {
    match err {
        AccountError::InvalidCredentials => "Invalid email or password".to_string(),
        AccountError::DuplicateEmail => "An account with this email already exists".to_string(),
        AccountError::InvalidEmail(_) => "Invalid email address".to_string(),
        AccountError::NoActiveSession => "Please sign in first".to_string(),
        AccountError::Store(_) => INTERNAL_MESSAGE.to_string(),
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context after a successful sign-in.
pub fn set_sentry_user(account_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(account_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context on sign-out.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use technova_core::ProductId;

    use super::*;
    use crate::services::auth::validation::FieldError;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("P999".to_string());
        assert_eq!(err.to_string(), "Not found: P999");

        let err = AppError::from(CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), "Checkout error: your cart is empty");
    }

    #[test]
    fn test_internal_classification() {
        let io = || StoreError::Io(std::io::Error::other("disk full"));
        assert!(AppError::from(io()).is_internal());
        assert!(AppError::from(CheckoutError::Store(io())).is_internal());
        let nested = AppError::from(AdminError::Account(AccountError::Store(io())));
        assert!(nested.is_internal());
        assert!(!AppError::from(AdminError::Forbidden).is_internal());
        assert!(!AppError::from(AccountError::DuplicateEmail).is_internal());
    }

    #[test]
    fn test_user_messages_hide_storage_details() {
        let err = AppError::from(StoreError::Io(std::io::Error::other("/var/data locked")));
        assert!(!err.user_message().contains("/var/data"));

        let err = AppError::from(CheckoutError::OutOfStock {
            product_id: ProductId::new("P002"),
            name: "Teclado".to_string(),
            requested: 5,
            available: Some(3),
        });
        assert_eq!(
            err.user_message(),
            "Not enough stock for Teclado (available: 3)"
        );

        let err = AppError::from(AdminError::Account(AccountError::DuplicateEmail));
        assert_eq!(
            err.user_message(),
            "An account with this email already exists"
        );

        let err = AppError::from(AdminError::InvalidUser(vec![FieldError::Name]));
        assert!(!err.is_internal());
        assert_eq!(err.user_message(), "Invalid user: name is required");
    }
}
