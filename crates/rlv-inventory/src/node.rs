//! Arena nodes for the shared-inventory tree.
//!
//! Folder names are stored raw: the protocol's name modifiers (`~`, `+`,
//! `.`) and even literal `/` characters stay part of the name. The helpers
//! here interpret the modifiers without altering the stored string.

use serde::{Deserialize, Serialize};

use rlv_types::{AttachmentPoint, FolderId, ItemId, ObjectId, WearableSlot};

/// Leading name characters the protocol treats as modifiers rather than as
/// part of the folder name: `~` (no-copy), `+` (add-to), `.` (hidden).
const NAME_MODIFIERS: [char; 3] = ['~', '+', '.'];

/// A folder in the shared-inventory arena.
///
/// Children are kept in listing order; that order is the deterministic
/// tie-break for ambiguous path matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderNode {
    /// Stable folder id.
    pub id: FolderId,
    /// Raw display name, unprocessed. May contain `/` and modifier prefixes.
    pub name: String,
    /// Parent folder id; `None` only for the shared root.
    pub parent: Option<FolderId>,
    /// Child folders, in listing order.
    pub folders: Vec<FolderId>,
    /// Direct child items, in listing order.
    pub items: Vec<ItemId>,
}

impl FolderNode {
    /// Whether this folder is hidden (name begins with `.`).
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }

    /// Whether this folder forces add-to semantics (name begins with `+`).
    pub fn is_add_to(&self) -> bool {
        self.name.starts_with('+')
    }
}

/// An item in the shared-inventory arena.
///
/// An item is at most one of unworn, attached to a point, or worn as a
/// layer; the three optional fields encode which.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemNode {
    /// Stable item id.
    pub id: ItemId,
    /// Id of the folder that directly contains this item.
    pub folder: FolderId,
    /// Display name.
    pub name: String,
    /// Configured attachment point, when the item carries one. Used to
    /// resolve the target point of a planned attach; absent means the
    /// default point.
    pub attach_point: Option<AttachmentPoint>,
    /// Point the item is currently attached to, if attached.
    pub attached_to: Option<AttachmentPoint>,
    /// Live in-world object id of the attached form, if attached.
    pub attached_prim_id: Option<ObjectId>,
    /// Layer the item is currently worn on, if worn as clothing.
    pub worn_on: Option<WearableSlot>,
}

impl ItemNode {
    /// Whether the item is currently on the avatar, either as a rigid
    /// attachment or as a worn layer.
    pub fn is_worn(&self) -> bool {
        self.attached_to.is_some() || self.worn_on.is_some()
    }
}

/// Strip at most one leading modifier character from a name.
pub(crate) fn strip_modifier(name: &str) -> &str {
    match name.chars().next() {
        Some(c) if NAME_MODIFIERS.contains(&c) => &name[c.len_utf8()..],
        _ => name,
    }
}
