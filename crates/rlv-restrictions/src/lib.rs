//! Restriction state and permission evaluation.
//!
//! The [`RestrictionStore`] is the single source of truth for active
//! restrictions, keyed by `(behavior, issuing object)`. The
//! [`PermissionEvaluator`] is the read-only query surface the rest of the
//! client calls to ask "is this currently allowed".

pub mod permissions;
pub mod store;

pub use permissions::PermissionEvaluator;
pub use store::{RestrictionRecord, RestrictionStore};
