//! UUIDv7-based identifiers for pipeline records
//!
//! Every persisted record type gets its own id newtype so that references
//! between records (item → measurements, conflict → items, cost item → item)
//! cannot be crossed accidentally. UUIDv7 provides:
//! - Chronological sortability within a batch
//! - 128-bit uniqueness without coordination
//! - RFC 9562-standard string form for the persistence collaborator

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u128);

        impl $name {
            /// Generate a new UUIDv7-based identifier
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7().as_u128())
            }

            /// Create an identifier from a raw u128 value
            ///
            /// Primarily for storage layer deserialization and tests.
            pub fn from_value(value: u128) -> Self {
                Self(value)
            }

            /// Parse an identifier from its UUID string form
            pub fn from_string(s: &str) -> Result<Self, String> {
                uuid::Uuid::parse_str(s)
                    .map(|u| Self(u.as_u128()))
                    .map_err(|e| format!("Invalid UUID string: {}", e))
            }

            /// Get the raw u128 value
            pub fn value(&self) -> u128 {
                self.0
            }

            /// Get the UUIDv7 timestamp component (milliseconds since Unix epoch)
            pub fn timestamp(&self) -> u64 {
                (self.0 >> 80) as u64
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", uuid::Uuid::from_u128(self.0))
            }
        }
    };
}

define_id!(
    /// Identifier of one OCR fragment (source image text span)
    FragmentId
);
define_id!(
    /// Identifier of one extracted measurement
    MeasurementId
);
define_id!(
    /// Identifier of one quantification item
    ItemId
);
define_id!(
    /// Identifier of one cost item
    CostItemId
);
define_id!(
    /// Identifier of one schedule task
    TaskId
);
define_id!(
    /// Identifier of one estimate version
    EstimateId
);


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: id ordering matches the underlying u128 ordering
        #[test]
        fn test_id_ordering_property(a: u128, b: u128) {
            let id_a = ItemId::from_value(a);
            let id_b = ItemId::from_value(b);
            prop_assert_eq!(id_a < id_b, a < b);
            prop_assert_eq!(id_a == id_b, a == b);
        }

        /// Property: round-trip through string representation preserves the id
        #[test]
        fn test_id_string_roundtrip(value: u128) {
            let id = MeasurementId::from_value(value);
            match MeasurementId::from_string(&id.to_string()) {
                Ok(parsed) => prop_assert_eq!(id, parsed),
                Err(e) => return Err(TestCaseError::fail(e)),
            }
        }
    }
}
