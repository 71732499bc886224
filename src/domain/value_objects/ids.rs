//! # Identifier Types
//!
//! Strongly-typed identifiers for domain entities.
//!
//! UUID-backed identifiers ([`RfqId`], [`QuoteId`], [`EventId`]) are generated
//! with UUID v4. [`DealerId`] wraps the free-form string identifier that an
//! external dealer is known by on the inbound channel.
//!
//! # Examples
//!
//! ```
//! use fx_rfq::domain::value_objects::ids::{DealerId, RfqId};
//!
//! let rfq_id = RfqId::new_v4();
//! let dealer = DealerId::new("JPM");
//!
//! assert_eq!(dealer.as_str(), "JPM");
//! assert_ne!(rfq_id, RfqId::new_v4());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a new random (v4) identifier.
            #[must_use]
            pub fn new_v4() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID.
            #[inline]
            #[must_use]
            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

uuid_id! {
    /// Unique identifier for an RFQ.
    RfqId
}

uuid_id! {
    /// Unique identifier for a dealer quote.
    QuoteId
}

uuid_id! {
    /// Unique identifier for a domain event.
    EventId
}

/// Identifier for an external quote-providing dealer.
///
/// Dealers are identified by an opaque string assigned by the inbound
/// channel, e.g. `"JPM"` or `"dealer-7"`.
///
/// # Examples
///
/// ```
/// use fx_rfq::domain::value_objects::ids::DealerId;
///
/// let dealer = DealerId::new("JPM");
/// assert_eq!(dealer.to_string(), "JPM");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DealerId(String);

impl DealerId {
    /// Creates a dealer identifier from a string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DealerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DealerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DealerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rfq_ids_are_unique() {
        let a = RfqId::new_v4();
        let b = RfqId::new_v4();
        assert_ne!(a, b);
    }

    #[test]
    fn from_uuid_roundtrip() {
        let uuid = Uuid::new_v4();
        let id = QuoteId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), uuid);
    }

    #[test]
    fn dealer_id_display() {
        let dealer = DealerId::new("JPM");
        assert_eq!(dealer.to_string(), "JPM");
        assert_eq!(dealer.as_str(), "JPM");
    }

    #[test]
    fn dealer_id_from_conversions() {
        assert_eq!(DealerId::from("a"), DealerId::new("a"));
        assert_eq!(DealerId::from("a".to_string()), DealerId::new("a"));
    }

    #[test]
    fn serde_roundtrip() {
        let id = RfqId::new_v4();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: RfqId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn serde_is_transparent() {
        let dealer = DealerId::new("JPM");
        let json = serde_json::to_string(&dealer).unwrap();
        assert_eq!(json, "\"JPM\"");
    }
}
