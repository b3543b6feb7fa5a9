//! Immutable shared-inventory snapshot for folder-path commands.
//!
//! An [`InventoryMap`] is built once per command from the host-supplied
//! shared folder tree, queried for folder paths and worn/attached items,
//! and discarded when the command completes. The arena holds folders and
//! items by stable id; parent links are id back-references, never owning
//! pointers.

pub mod map;
pub mod node;
pub mod planner;

pub use map::{InventoryMap, InventoryMapBuilder};
pub use node::{FolderNode, ItemNode};
pub use planner::{plan_attachments, plan_detachments, AttachmentRequest};
