//! Account email addresses.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Why a string was not accepted as an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,
    #[error("email must be at most {max} characters")]
    TooLong { max: usize },
    #[error("email must look like name@domain")]
    Malformed,
}

/// A sign-in email, in canonical (trimmed, lower-case) form.
///
/// Accounts are keyed by email and lookups ignore case, so the canonical
/// form is the only one ever stored. Only the overall shape is checked here;
/// registration applies its own domain rules on top.
///
/// ```
/// use technova_core::Email;
///
/// let email = Email::parse("  Admin@Duoc.cl ").unwrap();
/// assert_eq!(email.as_str(), "admin@duoc.cl");
/// assert!(email.matches("ADMIN@duoc.cl"));
///
/// assert!(Email::parse("no-at-symbol").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// RFC 5321 path limit.
    pub const MAX_LENGTH: usize = 254;

    /// Parse and canonicalize an address.
    ///
    /// # Errors
    ///
    /// Returns `EmailError` if the trimmed input is empty, longer than
    /// [`Self::MAX_LENGTH`], or lacks a non-empty part on either side of `@`.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        match s.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
                Ok(Self(s.to_lowercase()))
            }
            _ => Err(EmailError::Malformed),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Whether `other` names the same address, ignoring case and padding.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        other.trim().to_lowercase() == self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_form() {
        let email = Email::parse("\tCliente@Gmail.COM\n").unwrap();
        assert_eq!(email.as_str(), "cliente@gmail.com");
        assert_eq!(email.to_string(), "cliente@gmail.com");
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert_eq!(Email::parse("   "), Err(EmailError::Empty));
        assert_eq!(Email::parse("sin-arroba"), Err(EmailError::Malformed));
        assert_eq!(Email::parse("@duoc.cl"), Err(EmailError::Malformed));
        assert_eq!(Email::parse("ana@"), Err(EmailError::Malformed));

        let long = format!("{}@duoc.cl", "a".repeat(250));
        assert!(matches!(
            Email::parse(&long),
            Err(EmailError::TooLong { .. })
        ));
    }

    #[test]
    fn test_matches_ignores_case_and_padding() {
        let email = Email::parse("cliente@gmail.com").unwrap();
        assert!(email.matches(" CLIENTE@gmail.com "));
        assert!(!email.matches("otro@gmail.com"));
    }

    #[test]
    fn test_stored_values_are_validated() {
        assert!(serde_json::from_str::<Email>("\"not-an-email\"").is_err());
        let parsed: Email = serde_json::from_str("\"Ana@Duoc.cl\"").unwrap();
        assert_eq!(parsed.as_str(), "ana@duoc.cl");
    }
}
