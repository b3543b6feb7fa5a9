//! Core types shared across all RLV crates.
//!
//! Defines the strongly-typed identifiers, attachment points, wearable
//! slots, and error type used by the inventory resolver, restriction
//! store, and session dispatcher.

pub mod attach;
pub mod error;
pub mod ids;

pub use attach::{AttachmentPoint, WearableSlot};
pub use error::RlvError;
pub use ids::{FolderId, ItemId, ObjectId};
