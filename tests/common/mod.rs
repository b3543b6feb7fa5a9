//! Shared helpers for integration tests.
//!
//! Each integration test file compiles common/ as its own module, so not
//! every helper is used in every file.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use rlv::{
    cancel_signal, ActionCallbacks, AttachmentPoint, AttachmentRequest, CancelSignal,
    InventoryMap, InventoryMapBuilder, ItemId, ObjectId, QueryCallbacks, Session,
};

/// Host-side query stub serving a fixed (or absent) inventory snapshot.
pub struct FixedInventory {
    pub map: Option<InventoryMap>,
}

#[async_trait]
impl QueryCallbacks for FixedInventory {
    async fn try_get_inventory_map(&self, _cancel: CancelSignal) -> Option<InventoryMap> {
        self.map.clone()
    }
}

/// Host-side action stub recording every call.
#[derive(Default)]
pub struct RecordingActions {
    pub attached: Mutex<Vec<AttachmentRequest>>,
    pub detached: Mutex<Vec<ItemId>>,
    pub unsit_calls: Mutex<u32>,
    pub replies: Mutex<Vec<(i32, String)>>,
}

impl RecordingActions {
    /// Planner output compares as a set.
    pub fn attached_set(&self) -> HashSet<AttachmentRequest> {
        self.attached.lock().unwrap().iter().copied().collect()
    }
}

#[async_trait]
impl ActionCallbacks for RecordingActions {
    async fn attach(&self, requests: Vec<AttachmentRequest>, cancel: CancelSignal) -> bool {
        if *cancel.borrow() {
            return false;
        }
        self.attached.lock().unwrap().extend(requests);
        true
    }

    async fn detach(&self, items: Vec<ItemId>, cancel: CancelSignal) -> bool {
        if *cancel.borrow() {
            return false;
        }
        self.detached.lock().unwrap().extend(items);
        true
    }

    async fn unsit(&self, cancel: CancelSignal) -> bool {
        if *cancel.borrow() {
            return false;
        }
        *self.unsit_calls.lock().unwrap() += 1;
        true
    }

    async fn send_reply(&self, channel: i32, text: String, cancel: CancelSignal) -> bool {
        if *cancel.borrow() {
            return false;
        }
        self.replies.lock().unwrap().push((channel, text));
        true
    }
}

/// A session over the given snapshot, with a recording action stub.
pub fn test_session(map: Option<InventoryMap>) -> (Session, Arc<RecordingActions>) {
    let actions = Arc::new(RecordingActions::default());
    // Dropping the sender leaves the signal permanently uncancelled.
    let (_tx, cancel) = cancel_signal();
    let session = Session::new(Arc::new(FixedInventory { map }), actions.clone(), cancel);
    (session, actions)
}

/// The sample tree from the attach scenario:
///
/// ```text
/// #RLV
/// ├── Clothing
/// │   ├── Business Pants          (point Pelvis)
/// │   ├── Happy Shirt             (attached Chest)
/// │   ├── Retro Pants
/// │   └── Hats
/// │       ├── Sub Hats            (empty folder)
/// │       ├── Fancy Hat           (point Chin, attached Chin)
/// │       └── Party Hat           (point Spine, attached Spine)
/// └── Accessories
///     ├── Watch
///     └── Glasses
/// ```
pub struct SampleTree {
    pub map: InventoryMap,
    pub business_pants: ItemId,
    pub happy_shirt: ItemId,
    pub retro_pants: ItemId,
    pub fancy_hat: ItemId,
    pub party_hat: ItemId,
    pub watch: ItemId,
    pub glasses: ItemId,
    pub happy_shirt_prim: ObjectId,
    pub fancy_hat_prim: ObjectId,
    pub party_hat_prim: ObjectId,
}

pub fn sample_tree() -> SampleTree {
    let mut builder = InventoryMapBuilder::new("#RLV");
    let clothing = builder.add_folder(builder.root(), "Clothing");
    let business_pants = builder.add_item(clothing, "Business Pants");
    builder.set_attach_point(business_pants, AttachmentPoint::Pelvis);
    let happy_shirt = builder.add_item(clothing, "Happy Shirt");
    let happy_shirt_prim = ObjectId::random();
    builder.set_attached(happy_shirt, AttachmentPoint::Chest, happy_shirt_prim);
    let retro_pants = builder.add_item(clothing, "Retro Pants");

    let hats = builder.add_folder(clothing, "Hats");
    let _sub_hats = builder.add_folder(hats, "Sub Hats");
    let fancy_hat = builder.add_item(hats, "Fancy Hat");
    builder.set_attach_point(fancy_hat, AttachmentPoint::Chin);
    let fancy_hat_prim = ObjectId::random();
    builder.set_attached(fancy_hat, AttachmentPoint::Chin, fancy_hat_prim);
    let party_hat = builder.add_item(hats, "Party Hat");
    builder.set_attach_point(party_hat, AttachmentPoint::Spine);
    let party_hat_prim = ObjectId::random();
    builder.set_attached(party_hat, AttachmentPoint::Spine, party_hat_prim);

    let accessories = builder.add_folder(builder.root(), "Accessories");
    let watch = builder.add_item(accessories, "Watch");
    let glasses = builder.add_item(accessories, "Glasses");

    SampleTree {
        map: builder.build().expect("sample tree should build"),
        business_pants,
        happy_shirt,
        retro_pants,
        fancy_hat,
        party_hat,
        watch,
        glasses,
        happy_shirt_prim,
        fancy_hat_prim,
        party_hat_prim,
    }
}
