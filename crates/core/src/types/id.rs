//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

use chrono::{DateTime, Utc};

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<&str>`, `From<String>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use technova_core::define_id;
/// define_id!(SkuId);
/// define_id!(WarehouseId);
///
/// let sku = SkuId::new("P001");
/// let warehouse = WarehouseId::new("P001");
/// assert_eq!(sku.as_str(), warehouse.as_str());
///
/// // These are different types, so this won't compile:
/// // let _: SkuId = warehouse;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);
define_id!(AccountId);
define_id!(OrderId);

impl OrderId {
    /// Prefix shared by every order identifier.
    pub const PREFIX: &'static str = "ORD-";

    /// Build the identifier for an order created at `created_at`.
    ///
    /// The numeric suffix is the creation time in unix milliseconds. When the
    /// previous order already used that millisecond (or a later one, after a
    /// clock step backwards) the suffix becomes `previous + 1`, so identifiers
    /// within one order log are strictly increasing.
    #[must_use]
    pub fn next_after(created_at: DateTime<Utc>, previous: Option<&Self>) -> Self {
        let millis = u64::try_from(created_at.timestamp_millis()).unwrap_or(0);
        let sequence = match previous.and_then(Self::sequence) {
            Some(last) if last >= millis => last.saturating_add(1),
            _ => millis,
        };
        Self(format!("{}{sequence}", Self::PREFIX))
    }

    /// Numeric suffix of the identifier, if it has the standard format.
    #[must_use]
    pub fn sequence(&self) -> Option<u64> {
        self.0.strip_prefix(Self::PREFIX)?.parse().ok()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_id_display_and_conversions() {
        let id = ProductId::new("P001");
        assert_eq!(id.to_string(), "P001");
        assert_eq!(ProductId::from("P001"), id);
        assert_eq!(id.clone().into_inner(), "P001".to_string());
    }

    #[test]
    fn test_id_serde_is_transparent() {
        let json = serde_json::to_string(&ProductId::new("P002")).unwrap();
        assert_eq!(json, "\"P002\"");
    }

    #[test]
    fn test_order_id_uses_creation_millis() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let id = OrderId::next_after(at, None);
        assert_eq!(id.as_str(), "ORD-1700000000123");
        assert_eq!(id.sequence(), Some(1_700_000_000_123));
    }

    #[test]
    fn test_order_id_stays_increasing_within_same_millisecond() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let first = OrderId::next_after(at, None);
        let second = OrderId::next_after(at, Some(&first));
        assert_eq!(second.sequence(), Some(1_700_000_000_124));
    }

    #[test]
    fn test_order_id_ignores_foreign_previous_format() {
        let at = Utc.timestamp_millis_opt(5_000).unwrap();
        let legacy = OrderId::new("legacy-order");
        assert_eq!(OrderId::next_after(at, Some(&legacy)).as_str(), "ORD-5000");
    }
}
