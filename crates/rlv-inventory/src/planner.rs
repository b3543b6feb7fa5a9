//! Attachment and detach planning over folder subtrees.
//!
//! Turns a resolved target folder (optionally with all of its descendants)
//! into the concrete set of attach or detach operations, applying the
//! folder-name modifier rules: `.`-named descendants are always excluded,
//! and a `+`-named folder forces add-to semantics for its direct items.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use rlv_types::{AttachmentPoint, FolderId, ItemId};

use crate::map::InventoryMap;

/// One planned attach operation.
///
/// Equality and hashing are structural over all three fields, so planner
/// output compares as a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttachmentRequest {
    /// The inventory item to attach.
    pub item: ItemId,
    /// Resolved target point: the item's configured point when known,
    /// otherwise [`AttachmentPoint::Default`].
    pub point: AttachmentPoint,
    /// Whether to replace whatever is already worn at that point.
    pub replace: bool,
}

/// Plan the attach set for a folder.
///
/// Enumerates every item directly inside `folder` and, when `recursive`,
/// inside every descendant folder except hidden (`.`-named) ones. Each
/// folder's items use `default_replace` unless that folder's own name
/// begins with `+`, which forces `replace = false` for its direct items;
/// sub-folders re-evaluate independently from their own names.
pub fn plan_attachments(
    map: &InventoryMap,
    folder: FolderId,
    recursive: bool,
    default_replace: bool,
) -> HashSet<AttachmentRequest> {
    let mut requests = HashSet::new();
    map.walk_subtree(folder, recursive, |node| {
        let replace = if node.is_add_to() { false } else { default_replace };
        for item_id in &node.items {
            if let Some(item) = map.item(*item_id) {
                requests.insert(AttachmentRequest {
                    item: item.id,
                    point: item.attach_point.unwrap_or(AttachmentPoint::Default),
                    replace,
                });
            }
        }
    });
    requests
}

/// Plan the detach set for a folder: every item in the same folder walk as
/// [`plan_attachments`] that is currently attached or worn.
pub fn plan_detachments(map: &InventoryMap, folder: FolderId, recursive: bool) -> HashSet<ItemId> {
    let mut items = HashSet::new();
    map.walk_subtree(folder, recursive, |node| {
        for item_id in &node.items {
            if map.item(*item_id).is_some_and(|item| item.is_worn()) {
                items.insert(*item_id);
            }
        }
    });
    items
}
