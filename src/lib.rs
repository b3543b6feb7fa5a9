//! RLV core: restriction protocol engine for a virtual-world client.
//!
//! Facade over the member crates. A host constructs a [`Session`] with its
//! query/action collaborators, feeds inbound chat-channel messages to
//! [`Session::process_message`], and consults the session's
//! [`PermissionEvaluator`] everywhere a restricted behavior could occur.

pub use rlv_inventory as inventory;
pub use rlv_restrictions as restrictions;
pub use rlv_session as session;
pub use rlv_types as types;

pub use rlv_inventory::{
    plan_attachments, plan_detachments, AttachmentRequest, FolderNode, InventoryMap,
    InventoryMapBuilder, ItemNode,
};
pub use rlv_restrictions::{PermissionEvaluator, RestrictionRecord, RestrictionStore};
pub use rlv_session::{
    cancel_signal, parse_message, ActionCallbacks, Behavior, CancelSignal, ParsedCommand,
    QueryCallbacks, Session,
};
pub use rlv_types::{
    AttachmentPoint, FolderId, ItemId, ObjectId, RlvError, WearableSlot,
};
