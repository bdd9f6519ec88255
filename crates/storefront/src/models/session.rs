//! Session-related types.

use serde::{Deserialize, Serialize};

use technova_core::Email;

/// The signed-in identity for this context.
///
/// At most one exists at a time; it carries only the email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Email of the signed-in account.
    pub email: Email,
}
