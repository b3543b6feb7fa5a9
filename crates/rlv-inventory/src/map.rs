//! Read-only inventory snapshot with path and predicate resolution.
//!
//! Built once per command from the host-supplied shared folder tree and
//! discarded afterwards. All traversal carries a visited-set guard so a
//! malformed tree from the host fails closed ("not found") instead of
//! looping.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};
use uuid::Uuid;

use rlv_types::{AttachmentPoint, FolderId, ItemId, ObjectId, RlvError, WearableSlot};

use crate::node::{strip_modifier, FolderNode, ItemNode};

/// Immutable snapshot of the shared-inventory tree.
///
/// Folders and items live in id-indexed arenas; parent links are ids, so
/// the structure cannot express an owning cycle even if the host's input
/// was malformed.
#[derive(Debug, Clone)]
pub struct InventoryMap {
    root: FolderId,
    folders: HashMap<FolderId, FolderNode>,
    items: HashMap<ItemId, ItemNode>,
}

impl InventoryMap {
    /// Id of the shared root folder.
    pub fn root(&self) -> FolderId {
        self.root
    }

    /// Look up a folder node by id.
    pub fn folder(&self, id: FolderId) -> Option<&FolderNode> {
        self.folders.get(&id)
    }

    /// Look up an item node by id.
    pub fn item(&self, id: ItemId) -> Option<&ItemNode> {
        self.items.get(&id)
    }

    /// Find the item currently attached as the given in-world object, if
    /// any. This is the reverse lookup from a live prim back to the
    /// inventory item it was rezzed from.
    pub fn item_attached_as(&self, prim: ObjectId) -> Option<&ItemNode> {
        self.items
            .values()
            .find(|item| item.attached_prim_id == Some(prim))
    }

    /// Resolve a `/`-separated folder path below the shared root.
    ///
    /// Empty segments are discarded, so leading, trailing, and doubled
    /// slashes are tolerated. A folder whose own name contains `/` is still
    /// addressable: candidate names are compared component-wise against the
    /// remaining path, so a child named `"Clothing///"` matches the path
    /// `"Clothing///"` (both normalize to the single component `Clothing`).
    ///
    /// Per segment, an exact name match is preferred over a match that only
    /// succeeds after stripping one leading modifier (`~`, `+`, `.`) from
    /// the candidate; ties at the same precedence resolve to the
    /// first-listed sibling. Resolution is greedy, without backtracking
    /// across segments. Hidden (`.`-named) folders never match when
    /// `allow_hidden` is false.
    ///
    /// Returns `None` for an empty path or when any segment fails to
    /// resolve.
    pub fn try_get_folder_from_path(&self, path: &str, allow_hidden: bool) -> Option<FolderId> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            return None;
        }

        let mut current = self.root;
        let mut index = 0;
        while index < segments.len() {
            let folder = self.folders.get(&current)?;
            let mut exact: Option<(FolderId, usize)> = None;
            let mut stripped: Option<(FolderId, usize)> = None;

            for child_id in &folder.folders {
                let child = match self.folders.get(child_id) {
                    Some(child) => child,
                    None => continue,
                };
                if child.is_hidden() && !allow_hidden {
                    continue;
                }
                // First-listed exact match wins outright; no later sibling
                // can displace it.
                if let Some(consumed) = match_name(&child.name, &segments[index..]) {
                    exact = Some((*child_id, consumed));
                    break;
                }
                if stripped.is_none() {
                    let shorter = strip_modifier(&child.name);
                    if shorter.len() != child.name.len() {
                        if let Some(consumed) = match_name(shorter, &segments[index..]) {
                            stripped = Some((*child_id, consumed));
                        }
                    }
                }
            }

            let (next, consumed) = match exact.or(stripped) {
                Some(hit) => hit,
                None => {
                    debug!(segment = segments[index], "path segment did not resolve");
                    return None;
                }
            };
            current = next;
            index += consumed;
        }
        Some(current)
    }

    /// Find every folder with a direct child item matching ALL supplied
    /// predicates.
    ///
    /// `by_item_id` matches an item's own id or its live `attached_prim_id`,
    /// so callers can look up by inventory key or by in-world object id.
    ///
    /// `single_result` is deprecated and does not narrow the result: the
    /// full match set is returned regardless, preserving the historical
    /// behavior callers depend on.
    pub fn find_folders_containing(
        &self,
        single_result: bool,
        by_item_id: Option<Uuid>,
        by_attachment_point: Option<AttachmentPoint>,
        by_wearable_type: Option<WearableSlot>,
    ) -> HashSet<FolderId> {
        if single_result {
            trace!("single_result is deprecated; returning the full match set");
        }

        let mut found = HashSet::new();
        let mut visited = HashSet::new();
        let mut stack = vec![self.root];
        while let Some(folder_id) = stack.pop() {
            if !visited.insert(folder_id) {
                continue;
            }
            let folder = match self.folders.get(&folder_id) {
                Some(folder) => folder,
                None => continue,
            };
            let hit = folder.items.iter().any(|item_id| {
                self.items
                    .get(item_id)
                    .is_some_and(|item| item_matches(item, by_item_id, by_attachment_point, by_wearable_type))
            });
            if hit {
                found.insert(folder_id);
            }
            stack.extend(folder.folders.iter().copied());
        }
        found
    }

    /// Walk the subtree rooted at `start`, invoking `visit` per folder.
    ///
    /// Descendant folders whose names begin with `.` are skipped entirely
    /// (the starting folder itself is visited even if hidden, since the
    /// caller resolved it explicitly). Guarded against cycles.
    pub(crate) fn walk_subtree(
        &self,
        start: FolderId,
        recursive: bool,
        mut visit: impl FnMut(&FolderNode),
    ) {
        let mut visited = HashSet::new();
        let mut stack = vec![(start, true)];
        while let Some((folder_id, is_start)) = stack.pop() {
            if !visited.insert(folder_id) {
                continue;
            }
            let folder = match self.folders.get(&folder_id) {
                Some(folder) => folder,
                None => continue,
            };
            if !is_start && folder.is_hidden() {
                continue;
            }
            visit(folder);
            if recursive {
                stack.extend(folder.folders.iter().map(|id| (*id, false)));
            }
        }
    }
}

/// Compare a candidate folder name component-wise against the front of the
/// remaining path segments. Returns how many segments the name consumes.
fn match_name(name: &str, remaining: &[&str]) -> Option<usize> {
    let components: Vec<&str> = name.split('/').filter(|s| !s.is_empty()).collect();
    if components.is_empty() || components.len() > remaining.len() {
        return None;
    }
    let matches = components
        .iter()
        .zip(remaining)
        .all(|(component, segment)| component.eq_ignore_ascii_case(segment));
    matches.then_some(components.len())
}

fn item_matches(
    item: &ItemNode,
    by_item_id: Option<Uuid>,
    by_attachment_point: Option<AttachmentPoint>,
    by_wearable_type: Option<WearableSlot>,
) -> bool {
    if let Some(key) = by_item_id {
        let id_hit = item.id.as_uuid() == key
            || item.attached_prim_id.map(|prim| prim.as_uuid()) == Some(key);
        if !id_hit {
            return false;
        }
    }
    if let Some(point) = by_attachment_point {
        if item.attached_to != Some(point) {
            return false;
        }
    }
    if let Some(slot) = by_wearable_type {
        if item.worn_on != Some(slot) {
            return false;
        }
    }
    true
}

/// Builder for an [`InventoryMap`], used by the host's query callback to
/// assemble the snapshot from its live inventory data.
#[derive(Debug)]
pub struct InventoryMapBuilder {
    root: FolderId,
    folders: HashMap<FolderId, FolderNode>,
    items: HashMap<ItemId, ItemNode>,
}

impl InventoryMapBuilder {
    /// Start a new snapshot with a root folder of the given name.
    pub fn new(root_name: impl Into<String>) -> Self {
        let root = FolderId::random();
        let mut folders = HashMap::new();
        folders.insert(
            root,
            FolderNode {
                id: root,
                name: root_name.into(),
                parent: None,
                folders: Vec::new(),
                items: Vec::new(),
            },
        );
        Self {
            root,
            folders,
            items: HashMap::new(),
        }
    }

    /// Id of the root folder.
    pub fn root(&self) -> FolderId {
        self.root
    }

    /// Add a child folder under `parent`, returning its id.
    pub fn add_folder(&mut self, parent: FolderId, name: impl Into<String>) -> FolderId {
        let id = FolderId::random();
        self.folders.insert(
            id,
            FolderNode {
                id,
                name: name.into(),
                parent: Some(parent),
                folders: Vec::new(),
                items: Vec::new(),
            },
        );
        if let Some(parent_node) = self.folders.get_mut(&parent) {
            parent_node.folders.push(id);
        }
        id
    }

    /// Add an item directly inside `folder`, returning its id.
    pub fn add_item(&mut self, folder: FolderId, name: impl Into<String>) -> ItemId {
        let id = ItemId::random();
        self.items.insert(
            id,
            ItemNode {
                id,
                folder,
                name: name.into(),
                attach_point: None,
                attached_to: None,
                attached_prim_id: None,
                worn_on: None,
            },
        );
        if let Some(folder_node) = self.folders.get_mut(&folder) {
            folder_node.items.push(id);
        }
        id
    }

    /// Record the item's configured attachment point.
    pub fn set_attach_point(&mut self, item: ItemId, point: AttachmentPoint) {
        if let Some(node) = self.items.get_mut(&item) {
            node.attach_point = Some(point);
        }
    }

    /// Mark the item as currently attached at `point` as the live object
    /// `prim`.
    pub fn set_attached(&mut self, item: ItemId, point: AttachmentPoint, prim: ObjectId) {
        if let Some(node) = self.items.get_mut(&item) {
            node.attached_to = Some(point);
            node.attached_prim_id = Some(prim);
            node.worn_on = None;
        }
    }

    /// Mark the item as currently worn on the given layer.
    pub fn set_worn(&mut self, item: ItemId, slot: WearableSlot) {
        if let Some(node) = self.items.get_mut(&item) {
            node.worn_on = Some(slot);
            node.attached_to = None;
            node.attached_prim_id = None;
        }
    }

    /// Validate the tree and produce the immutable snapshot.
    ///
    /// Fails when a folder is unreachable from the root (orphaned parent
    /// link), when a child link points at a missing node, or when an item's
    /// owning folder does not exist.
    pub fn build(self) -> Result<InventoryMap, RlvError> {
        let mut visited = HashSet::new();
        let mut stack = vec![self.root];
        while let Some(folder_id) = stack.pop() {
            if !visited.insert(folder_id) {
                return Err(RlvError::Inventory(format!(
                    "folder {folder_id} linked from more than one parent"
                )));
            }
            let folder = self
                .folders
                .get(&folder_id)
                .ok_or_else(|| RlvError::Inventory(format!("missing folder {folder_id}")))?;
            for item_id in &folder.items {
                if !self.items.contains_key(item_id) {
                    return Err(RlvError::Inventory(format!("missing item {item_id}")));
                }
            }
            stack.extend(folder.folders.iter().copied());
        }
        if visited.len() != self.folders.len() {
            return Err(RlvError::Inventory(format!(
                "{} folder(s) unreachable from the root",
                self.folders.len() - visited.len()
            )));
        }
        for item in self.items.values() {
            if !self.folders.contains_key(&item.folder) {
                return Err(RlvError::Inventory(format!(
                    "item {} owned by missing folder {}",
                    item.id, item.folder
                )));
            }
        }
        Ok(InventoryMap {
            root: self.root,
            folders: self.folders,
            items: self.items,
        })
    }
}
