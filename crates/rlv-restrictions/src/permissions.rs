//! Read-only permission predicates over the restriction store.
//!
//! A behavior is permitted iff no object currently restricts it:
//! restrictions are purely additive blocking, with no priority or override
//! between issuing objects. Safe to call from anywhere in the host's
//! control flow; never mutates.

use std::sync::Arc;

use crate::store::RestrictionStore;

/// Query surface answering "is behavior X currently allowed".
#[derive(Debug, Clone)]
pub struct PermissionEvaluator {
    store: Arc<RestrictionStore>,
}

macro_rules! predicates {
    ($($(#[$doc:meta])* $fn_name:ident => $behavior:literal),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $fn_name(&self) -> bool {
                self.can($behavior)
            }
        )*
    };
}

impl PermissionEvaluator {
    /// Create an evaluator over the given store.
    pub fn new(store: Arc<RestrictionStore>) -> Self {
        Self { store }
    }

    /// Generic form: whether `behavior` is currently permitted.
    pub fn can(&self, behavior: &str) -> bool {
        !self.store.is_restricted(behavior)
    }

    predicates! {
        /// Teleport to arbitrary coordinates.
        can_tp_loc => "tploc",
        /// Teleport to a landmark.
        can_tp_lm => "tplm",
        /// Accept a teleport offer.
        can_tp_lure => "tplure",
        /// Stand up from the current seat.
        can_unsit => "unsit",
        /// Fly.
        can_fly => "fly",
        /// Teleport by sitting on a distant object.
        can_sit_tp => "sittp",
        /// Send messages on local chat.
        can_send_chat => "sendchat",
        /// Receive local chat.
        can_recv_chat => "recvchat",
        /// Send instant messages.
        can_send_im => "sendim",
        /// Receive instant messages.
        can_recv_im => "recvim",
        /// Edit or open object build tools.
        can_edit => "edit",
        /// Rez objects from inventory.
        can_rez => "rez",
        /// Detach locked attachments.
        can_detach => "detach",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rlv_types::ObjectId;

    #[test]
    fn permitted_when_store_is_empty() {
        let store = Arc::new(RestrictionStore::new());
        let permissions = PermissionEvaluator::new(store);
        assert!(permissions.can_tp_loc());
        assert!(permissions.can_unsit());
        assert!(permissions.can_fly());
    }

    #[test]
    fn any_single_record_blocks() {
        let store = Arc::new(RestrictionStore::new());
        let permissions = PermissionEvaluator::new(store.clone());
        store.add("unsit", ObjectId::random(), None);
        assert!(!permissions.can_unsit());
        assert!(permissions.can_fly());
    }

    #[test]
    fn blocked_until_every_restricting_object_releases() {
        let store = Arc::new(RestrictionStore::new());
        let permissions = PermissionEvaluator::new(store.clone());
        let a = ObjectId::random();
        let b = ObjectId::random();
        store.add("fly", a, None);
        store.add("fly", b, None);
        store.remove("fly", a);
        assert!(!permissions.can_fly());
        store.remove("fly", b);
        assert!(permissions.can_fly());
    }

    #[test]
    fn generic_predicate_is_case_insensitive() {
        let store = Arc::new(RestrictionStore::new());
        let permissions = PermissionEvaluator::new(store.clone());
        store.add("TpLoc", ObjectId::random(), None);
        assert!(!permissions.can("TPLOC"));
        assert!(!permissions.can_tp_loc());
    }
}
