//! Account credential types.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The secret an account signs in with.
///
/// Stored as entered: the storefront is a demo and keeps plaintext-equivalent
/// credentials. `Debug` is redacted so secrets never reach log output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialSecret(String);

impl CredentialSecret {
    /// Wrap a secret.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Exact (case-sensitive) comparison with a presented secret.
    #[must_use]
    pub fn verify(&self, presented: &str) -> bool {
        self.0 == presented
    }
}

impl fmt::Debug for CredentialSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CredentialSecret([REDACTED])")
    }
}

impl From<&str> for CredentialSecret {
    fn from(secret: &str) -> Self {
        Self(secret.to_owned())
    }
}
