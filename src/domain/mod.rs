// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Each aggregate has its own subdirectory with:
// - Value objects
// - Commands (typed request payloads)
// - Errors (business rule outcomes)
// - Aggregate implementation
// - Command handler (the operation provider registered for dispatch)
//
// ============================================================================

pub mod order;
pub mod product;
pub mod user;

use serde::{Deserialize, Serialize};

/// Declares a `u64`-backed identifier newtype assigned by a repository.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map(Self)
            }
        }
    };
}

entity_id!(
    /// Identity of a stored user (registered user or admin).
    UserId
);
entity_id!(
    /// Identity of a catalog product.
    ProductId
);
entity_id!(
    /// Identity of an order.
    OrderId
);
entity_id!(
    /// Identity of an order line item.
    LineItemId
);
