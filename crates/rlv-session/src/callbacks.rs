//! Collaborator traits implemented by the host application.
//!
//! The core never touches the network or the live inventory itself: it
//! asks the host for an inventory snapshot through [`QueryCallbacks`] and
//! performs effectful commands through [`ActionCallbacks`]. Every boundary
//! call carries a cancellation signal; a cancelled or failed call marks
//! that one sub-command as failed while siblings in the same message
//! continue.

use async_trait::async_trait;
use tokio::sync::watch;

use rlv_inventory::{AttachmentRequest, InventoryMap};
use rlv_types::{FolderId, ItemId};

/// Cancellation signal threaded through every boundary call. The value
/// flips to `true` when the host cancels in-flight work.
pub type CancelSignal = watch::Receiver<bool>;

/// Create a cancellation pair. Send `true` on the sender half to cancel.
pub fn cancel_signal() -> (watch::Sender<bool>, CancelSignal) {
    watch::channel(false)
}

/// Whether the signal has already been cancelled.
pub fn is_cancelled(cancel: &CancelSignal) -> bool {
    *cancel.borrow()
}

/// Read-only queries the core makes against the host.
#[async_trait]
pub trait QueryCallbacks: Send + Sync {
    /// Snapshot of the user's shared inventory tree.
    ///
    /// Returns `None` when inventory is not yet loaded (or the call was
    /// cancelled); the dependent command then fails gracefully.
    async fn try_get_inventory_map(&self, cancel: CancelSignal) -> Option<InventoryMap>;

    /// Root folder of the shared inventory tree, when loaded.
    ///
    /// Hosts that track the root separately can override this; the default
    /// derives it from the snapshot.
    async fn try_get_shared_folder(&self, cancel: CancelSignal) -> Option<FolderId> {
        self.try_get_inventory_map(cancel).await.map(|map| map.root())
    }
}

/// Effectful operations the core requests from the host.
///
/// Each returns whether the operation completed; the core awaits
/// completion before considering the sub-command done.
#[async_trait]
pub trait ActionCallbacks: Send + Sync {
    /// Attach/wear the planned items.
    async fn attach(&self, requests: Vec<AttachmentRequest>, cancel: CancelSignal) -> bool;

    /// Detach/remove the given items.
    async fn detach(&self, items: Vec<ItemId>, cancel: CancelSignal) -> bool;

    /// Stand the avatar up from its current seat.
    async fn unsit(&self, cancel: CancelSignal) -> bool;

    /// Say `text` on the given chat channel.
    async fn send_reply(&self, channel: i32, text: String, cancel: CancelSignal) -> bool;
}
