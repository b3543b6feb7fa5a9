//! Strongly-typed identifier wrappers to prevent accidental misuse of raw
//! UUIDs across the three id spaces (in-world objects, inventory items,
//! inventory folders).

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Wrap an existing UUID.
            pub fn new(id: Uuid) -> Self {
                Self(id)
            }

            /// Generate a fresh random id.
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// The underlying UUID.
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

uuid_id! {
    /// Identifier of a live in-world object (a prim), such as the scripted
    /// object issuing a command or the rezzed form of an attached item.
    ObjectId
}

uuid_id! {
    /// Identifier of an inventory item.
    ItemId
}

uuid_id! {
    /// Identifier of an inventory folder.
    FolderId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_roundtrip_through_json() {
        let id = ItemId::random();
        let json = serde_json::to_string(&id).unwrap();
        let back: ItemId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn id_spaces_are_distinct_types() {
        let raw = Uuid::new_v4();
        let obj = ObjectId::new(raw);
        let item = ItemId::new(raw);
        // Same UUID, different types; only the raw values compare equal.
        assert_eq!(obj.as_uuid(), item.as_uuid());
    }

    #[test]
    fn display_matches_uuid() {
        let raw = Uuid::new_v4();
        assert_eq!(FolderId::new(raw).to_string(), raw.to_string());
    }
}
