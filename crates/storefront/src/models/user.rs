//! Account domain types.

use serde::{Deserialize, Serialize};

use technova_core::{AccountId, CredentialSecret, Email, Role};

/// A registered storefront account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// National id (RUN), upper-cased.
    pub id: AccountId,
    /// Given name.
    pub name: String,
    /// Family name(s).
    pub surname: String,
    /// Sign-in email, stored lower-cased.
    pub email: Email,
    /// Sign-in secret.
    pub secret: CredentialSecret,
    /// Account role.
    #[serde(default)]
    pub role: Role,
    /// Shipping address.
    #[serde(default)]
    pub address: String,
}

impl Account {
    /// `name surname`, trimmed.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.surname).trim().to_owned()
    }

    /// First word of the given name, falling back to the email.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.name
            .split_whitespace()
            .next()
            .unwrap_or_else(|| self.email.as_str())
    }
}

/// Registration input. The role is assigned by whoever stores it.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub secret: String,
    pub address: String,
}
