//! In-memory restriction record store.
//!
//! Each record is one active `(behavior, issuing object)` pair. Mutations
//! serialize behind a write lock so concurrently arriving messages cannot
//! interleave; reads clone a snapshot under the read lock. State is
//! process-lifetime only, never persisted.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use rlv_types::ObjectId;

/// One active restriction: a behavior locked by one issuing object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictionRecord {
    /// Canonical (lowercase) behavior name, e.g. `tploc`, `unsit`.
    pub behavior: String,
    /// The in-world object that issued the restriction.
    pub sender: ObjectId,
    /// Optional exception/parameter payload, e.g. a folder name exempted
    /// from a lock. Carried verbatim; evaluation does not interpret it.
    pub exception: Option<String>,
    /// Monotonic creation sequence, for deterministic iteration order.
    pub seq: u64,
    /// When the record was created.
    pub created: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct StoreInner {
    records: HashMap<(String, ObjectId), RestrictionRecord>,
    next_seq: u64,
}

/// Mapping from `(behavior, issuing object)` to active restriction records.
///
/// Adds are idempotent per pair, removes of absent records are no-ops, and
/// clears are always scoped to the issuing object.
#[derive(Debug, Default)]
pub struct RestrictionStore {
    inner: RwLock<StoreInner>,
}

impl RestrictionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a restriction for `(behavior, sender)`.
    ///
    /// Repeated adds for the same pair are a no-op beyond refreshing the
    /// stored exception payload; the original sequence and creation stamp
    /// are kept.
    pub fn add(&self, behavior: &str, sender: ObjectId, exception: Option<&str>) {
        let behavior = behavior.to_ascii_lowercase();
        let mut inner = self.inner.write().expect("restriction store lock poisoned");
        let key = (behavior.clone(), sender);
        if let Some(existing) = inner.records.get_mut(&key) {
            existing.exception = exception.map(str::to_owned);
            debug!(behavior = %behavior, sender = %sender, "restriction refreshed");
            return;
        }
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.records.insert(
            key,
            RestrictionRecord {
                behavior: behavior.clone(),
                sender,
                exception: exception.map(str::to_owned),
                seq,
                created: Utc::now(),
            },
        );
        debug!(behavior = %behavior, sender = %sender, "restriction added");
    }

    /// Remove the restriction for `(behavior, sender)`. Removing an absent
    /// record is a no-op.
    pub fn remove(&self, behavior: &str, sender: ObjectId) {
        let behavior = behavior.to_ascii_lowercase();
        let mut inner = self.inner.write().expect("restriction store lock poisoned");
        if inner.records.remove(&(behavior.clone(), sender)).is_some() {
            debug!(behavior = %behavior, sender = %sender, "restriction removed");
        }
    }

    /// Remove every record issued by `sender` whose behavior name contains
    /// `name_filter` (case-insensitive); an empty or absent filter removes
    /// all of that sender's records. Never touches other senders' records.
    ///
    /// Returns the number of records removed.
    pub fn clear(&self, sender: ObjectId, name_filter: Option<&str>) -> usize {
        let filter = name_filter.unwrap_or("").to_ascii_lowercase();
        let mut inner = self.inner.write().expect("restriction store lock poisoned");
        let before = inner.records.len();
        inner
            .records
            .retain(|(behavior, owner), _| *owner != sender || !behavior.contains(&filter));
        let removed = before - inner.records.len();
        debug!(sender = %sender, filter = %filter, removed, "restrictions cleared");
        removed
    }

    /// Whether any object currently restricts `behavior`.
    pub fn is_restricted(&self, behavior: &str) -> bool {
        let behavior = behavior.to_ascii_lowercase();
        let inner = self.inner.read().expect("restriction store lock poisoned");
        inner.records.keys().any(|(name, _)| *name == behavior)
    }

    /// Snapshot of every active record, ordered by creation sequence.
    pub fn find_restrictions(&self) -> Vec<RestrictionRecord> {
        let inner = self.inner.read().expect("restriction store lock poisoned");
        let mut records: Vec<_> = inner.records.values().cloned().collect();
        records.sort_by_key(|r| r.seq);
        records
    }

    /// Snapshot of the records issued by one object, ordered by sequence.
    pub fn find_restrictions_for(&self, sender: ObjectId) -> Vec<RestrictionRecord> {
        let inner = self.inner.read().expect("restriction store lock poisoned");
        let mut records: Vec<_> = inner
            .records
            .values()
            .filter(|r| r.sender == sender)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.seq);
        records
    }

    /// Number of active records.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .expect("restriction store lock poisoned")
            .records
            .len()
    }

    /// Whether no restrictions are active.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_idempotent_per_pair() {
        let store = RestrictionStore::new();
        let obj = ObjectId::random();
        store.add("tploc", obj, None);
        store.add("TPLOC", obj, None);
        assert_eq!(store.len(), 1);
        assert!(store.is_restricted("tploc"));
    }

    #[test]
    fn repeated_add_refreshes_exception_keeps_seq() {
        let store = RestrictionStore::new();
        let obj = ObjectId::random();
        store.add("detach", obj, Some("Clothing"));
        let first_seq = store.find_restrictions()[0].seq;
        store.add("detach", obj, Some("Accessories"));
        let records = store.find_restrictions();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].seq, first_seq);
        assert_eq!(records[0].exception.as_deref(), Some("Accessories"));
    }

    #[test]
    fn remove_absent_is_noop() {
        let store = RestrictionStore::new();
        let obj = ObjectId::random();
        store.remove("fly", obj);
        assert!(store.is_empty());
    }

    #[test]
    fn same_behavior_from_two_objects_keeps_two_records() {
        let store = RestrictionStore::new();
        let a = ObjectId::random();
        let b = ObjectId::random();
        store.add("unsit", a, None);
        store.add("unsit", b, None);
        assert_eq!(store.len(), 2);
        store.remove("unsit", a);
        // Still restricted by the other object.
        assert!(store.is_restricted("unsit"));
    }

    #[test]
    fn clear_is_sender_scoped() {
        let store = RestrictionStore::new();
        let a = ObjectId::random();
        let b = ObjectId::random();
        store.add("tploc", a, None);
        store.add("unsit", a, None);
        store.add("fly", b, None);
        assert_eq!(store.clear(b, None), 1);
        assert!(store.is_restricted("tploc"));
        assert!(store.is_restricted("unsit"));
        assert!(!store.is_restricted("fly"));
    }

    #[test]
    fn filtered_clear_matches_substring_case_insensitive() {
        let store = RestrictionStore::new();
        let obj = ObjectId::random();
        store.add("tploc", obj, None);
        store.add("tplm", obj, None);
        store.add("unsit", obj, None);
        store.add("fly", obj, None);
        assert_eq!(store.clear(obj, Some("TP")), 2);
        assert!(!store.is_restricted("tploc"));
        assert!(!store.is_restricted("tplm"));
        assert!(store.is_restricted("unsit"));
        assert!(store.is_restricted("fly"));
    }

    #[test]
    fn snapshots_are_ordered_by_creation() {
        let store = RestrictionStore::new();
        let obj = ObjectId::random();
        store.add("fly", obj, None);
        store.add("tploc", obj, None);
        store.add("unsit", obj, None);
        let names: Vec<_> = store
            .find_restrictions()
            .into_iter()
            .map(|r| r.behavior)
            .collect();
        assert_eq!(names, ["fly", "tploc", "unsit"]);
    }

    #[test]
    fn record_serializes_to_json() {
        let store = RestrictionStore::new();
        let obj = ObjectId::random();
        store.add("sittp", obj, None);
        let record = &store.find_restrictions()[0];
        let json = serde_json::to_string(record).unwrap();
        let back: RestrictionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, record);
    }
}
