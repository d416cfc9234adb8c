//! Domain types for users, the player catalog and rosters.
//!
//! Every entity id is wrapped in its own newtype so a `PlayerId` can never be
//! passed where a `RosterId` or `UserId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Returns the underlying database key.
            #[must_use]
            pub const fn value(&self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self::new(id)
            }
        }
    };
}

entity_id!(
    /// Primary key of a registered user. Used for every ownership check.
    UserId
);

entity_id!(
    /// Primary key of a catalog player.
    ///
    /// Ids arriving from clients are not guaranteed to exist; the catalog is
    /// the only authority on that.
    PlayerId
);

entity_id!(
    /// Primary key of a saved roster.
    RosterId
);

/// The authenticated identity attached to a request by the session gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
}
