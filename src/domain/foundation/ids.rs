//! Typed UUID identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Namespace for name-derived catalog identifiers.
///
/// Built-in products and questions have no database row to borrow an id from,
/// so their ids are UUID v5 hashes under this namespace and stay stable
/// between process restarts.
const CATALOG_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a4e_9b7d_4c3a_8e21_5d0f_b3a9_c714);

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

uuid_id! {
    /// One qualification run. Random, never reused across restarts.
    SessionId
}

uuid_id! {
    /// An insurance product in the catalog.
    ProductId
}

uuid_id! {
    /// A disqualifying question; this is what the session recorder stores
    /// against each answer.
    QuestionId
}

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductId {
    /// Stable id for a built-in product, keyed on its name.
    pub fn derived(name: &str) -> Self {
        Self(Uuid::new_v5(&CATALOG_NAMESPACE, name.as_bytes()))
    }
}

impl QuestionId {
    /// Stable id keyed on the owning product and the question text, so the
    /// same wording under two products gets two ids.
    pub fn derived(product_name: &str, text: &str) -> Self {
        let key = format!("{}\u{1f}{}", product_name, text);
        Self(Uuid::new_v5(&CATALOG_NAMESPACE, key.as_bytes()))
    }
}
