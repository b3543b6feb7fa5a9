//! The session dispatcher: one avatar session's restriction state and
//! command processing.
//!
//! One `process_message` call is the unit of work and runs to completion
//! before the next is accepted, so restriction mutations made by earlier
//! commands in a message are visible to later ones. Only the collaborator
//! calls suspend.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use rlv_inventory::{plan_attachments, plan_detachments, AttachmentRequest, InventoryMap};
use rlv_restrictions::{PermissionEvaluator, RestrictionStore};
use rlv_types::{AttachmentPoint, FolderId, ObjectId, WearableSlot};

use crate::behavior::Behavior;
use crate::callbacks::{is_cancelled, ActionCallbacks, CancelSignal, QueryCallbacks};
use crate::parser::{parse_message, ParsedCommand};

/// One avatar session: the restriction store, its permission surface, and
/// the host collaborators.
///
/// The store is an explicit instance owned here and shared by reference
/// with the evaluator; there is no ambient global state.
pub struct Session {
    restrictions: Arc<RestrictionStore>,
    permissions: PermissionEvaluator,
    query: Arc<dyn QueryCallbacks>,
    actions: Arc<dyn ActionCallbacks>,
    cancel: CancelSignal,
}

impl Session {
    /// Create a session with the given host collaborators and cancellation
    /// signal.
    pub fn new(
        query: Arc<dyn QueryCallbacks>,
        actions: Arc<dyn ActionCallbacks>,
        cancel: CancelSignal,
    ) -> Self {
        let restrictions = Arc::new(RestrictionStore::new());
        let permissions = PermissionEvaluator::new(restrictions.clone());
        Self {
            restrictions,
            permissions,
            query,
            actions,
            cancel,
        }
    }

    /// The session's restriction store.
    pub fn restrictions(&self) -> &RestrictionStore {
        &self.restrictions
    }

    /// The read-only permission surface for the rest of the client.
    pub fn permissions(&self) -> &PermissionEvaluator {
        &self.permissions
    }

    /// Process one inbound protocol message from `sender_id`.
    ///
    /// Returns `true` iff at least one command was recognized and every
    /// recognized command executed. Unrecognized behaviors are skipped;
    /// a failing sub-command never aborts its siblings.
    pub async fn process_message(
        &self,
        raw: &str,
        sender_id: ObjectId,
        sender_name: &str,
    ) -> bool {
        let commands = parse_message(raw);
        if commands.is_empty() {
            debug!(sender = sender_name, "message contained no commands");
            return false;
        }

        let mut recognized = 0usize;
        let mut failed = 0usize;
        for command in &commands {
            let Some(behavior) = Behavior::parse(&command.behavior) else {
                debug!(
                    behavior = %command.behavior,
                    sender = sender_name,
                    "skipping unrecognized behavior"
                );
                continue;
            };
            recognized += 1;
            if self.dispatch(behavior, command, sender_id).await {
                info!(behavior = behavior.name(), sender = sender_name, "command executed");
            } else {
                warn!(behavior = behavior.name(), sender = sender_name, "command failed");
                failed += 1;
            }
        }
        recognized > 0 && failed == 0
    }

    async fn dispatch(
        &self,
        behavior: Behavior,
        command: &ParsedCommand,
        sender: ObjectId,
    ) -> bool {
        let param = command.param.to_ascii_lowercase();

        if behavior.is_boolean_lock() {
            match param.as_str() {
                "n" | "add" => {
                    self.restrictions
                        .add(behavior.name(), sender, command.option.as_deref());
                    return true;
                }
                "y" | "rem" => {
                    self.restrictions.remove(behavior.name(), sender);
                    return true;
                }
                _ => {}
            }
        }

        match behavior {
            Behavior::Clear => {
                let filter = command
                    .option
                    .as_deref()
                    .or_else(|| (!command.param.is_empty()).then_some(command.param.as_str()));
                self.restrictions.clear(sender, filter);
                true
            }
            Behavior::Version => self.reply_version(&param).await,
            Behavior::GetStatus => self.reply_status(command, &param, sender).await,
            Behavior::Unsit if param == "force" => self.force_unsit().await,
            Behavior::DetachMe if param == "force" => self.force_detach_me(behavior, sender).await,
            Behavior::DetachAll if param == "force" => {
                self.force_detach_all(behavior, command).await
            }
            _ if param == "force" && behavior.attach_spec().is_some() => {
                self.force_attach(behavior, command, sender).await
            }
            _ => {
                debug!(
                    behavior = behavior.name(),
                    param = %command.param,
                    "unsupported parameter for behavior"
                );
                false
            }
        }
    }

    /// A forced action blocked by an active restriction of the same
    /// behavior is refused.
    fn refuse_if_restricted(&self, behavior: Behavior) -> bool {
        if self.permissions.can(behavior.name()) {
            return false;
        }
        warn!(
            behavior = behavior.name(),
            "forced action refused: behavior is restricted"
        );
        true
    }

    async fn fetch_map(&self) -> Option<InventoryMap> {
        if is_cancelled(&self.cancel) {
            return None;
        }
        let map = self.query.try_get_inventory_map(self.cancel.clone()).await;
        if map.is_none() {
            warn!("inventory snapshot unavailable");
        }
        map
    }

    async fn force_unsit(&self) -> bool {
        if self.refuse_if_restricted(Behavior::Unsit) || is_cancelled(&self.cancel) {
            return false;
        }
        self.actions.unsit(self.cancel.clone()).await
    }

    async fn force_attach(
        &self,
        behavior: Behavior,
        command: &ParsedCommand,
        sender: ObjectId,
    ) -> bool {
        // Classification is checked by the caller.
        let Some(spec) = behavior.attach_spec() else {
            return false;
        };
        if self.refuse_if_restricted(behavior) {
            return false;
        }
        let Some(map) = self.fetch_map().await else {
            return false;
        };

        let folders: Vec<FolderId> = if spec.this {
            match resolve_worn_criterion(&map, command.option.as_deref(), sender) {
                Some(folders) if !folders.is_empty() => folders,
                _ => {
                    debug!(option = ?command.option, "worn-item criterion matched nothing");
                    return false;
                }
            }
        } else {
            match command.option.as_deref() {
                None => vec![map.root()],
                Some(path) => match map.try_get_folder_from_path(path, false) {
                    Some(folder) => vec![folder],
                    None => {
                        debug!(path, "attach target folder not found");
                        return false;
                    }
                },
            }
        };

        let mut requests: HashSet<AttachmentRequest> = HashSet::new();
        for folder in folders {
            requests.extend(plan_attachments(&map, folder, spec.recursive, spec.replace));
        }
        if requests.is_empty() {
            return true;
        }
        if is_cancelled(&self.cancel) {
            return false;
        }
        self.actions
            .attach(requests.into_iter().collect(), self.cancel.clone())
            .await
    }

    async fn force_detach_all(&self, behavior: Behavior, command: &ParsedCommand) -> bool {
        if self.refuse_if_restricted(behavior) {
            return false;
        }
        let Some(map) = self.fetch_map().await else {
            return false;
        };
        let folder = match command.option.as_deref() {
            None => map.root(),
            Some(path) => match map.try_get_folder_from_path(path, false) {
                Some(folder) => folder,
                None => {
                    debug!(path, "detach target folder not found");
                    return false;
                }
            },
        };
        let items = plan_detachments(&map, folder, true);
        if items.is_empty() {
            return true;
        }
        if is_cancelled(&self.cancel) {
            return false;
        }
        self.actions
            .detach(items.into_iter().collect(), self.cancel.clone())
            .await
    }

    async fn force_detach_me(&self, behavior: Behavior, sender: ObjectId) -> bool {
        if self.refuse_if_restricted(behavior) {
            return false;
        }
        let Some(map) = self.fetch_map().await else {
            return false;
        };
        let Some(item) = map.item_attached_as(sender) else {
            debug!(sender = %sender, "sender is not an attached item");
            return false;
        };
        if is_cancelled(&self.cancel) {
            return false;
        }
        self.actions.detach(vec![item.id], self.cancel.clone()).await
    }

    async fn reply_version(&self, param: &str) -> bool {
        let Some(channel) = parse_channel(param) else {
            return false;
        };
        if is_cancelled(&self.cancel) {
            return false;
        }
        let text = format!("RLV v{}", env!("CARGO_PKG_VERSION"));
        self.actions
            .send_reply(channel, text, self.cancel.clone())
            .await
    }

    async fn reply_status(
        &self,
        command: &ParsedCommand,
        param: &str,
        sender: ObjectId,
    ) -> bool {
        let Some(channel) = parse_channel(param) else {
            return false;
        };
        let filter = command
            .option
            .as_deref()
            .unwrap_or("")
            .to_ascii_lowercase();
        let mut text = String::new();
        for record in self.restrictions.find_restrictions_for(sender) {
            if !record.behavior.contains(&filter) {
                continue;
            }
            text.push('/');
            text.push_str(&record.behavior);
            if let Some(exception) = &record.exception {
                text.push(':');
                text.push_str(exception);
            }
        }
        if is_cancelled(&self.cancel) {
            return false;
        }
        self.actions
            .send_reply(channel, text, self.cancel.clone())
            .await
    }
}

/// Resolve the folders targeted by an `attachallthis`-style criterion:
/// an attachment-point name, a wearable-slot name, or (with no option)
/// the issuing object itself as a worn item.
fn resolve_worn_criterion(
    map: &InventoryMap,
    option: Option<&str>,
    sender: ObjectId,
) -> Option<Vec<FolderId>> {
    let folders = match option {
        None => map.find_folders_containing(false, Some(sender.as_uuid()), None, None),
        Some(name) => {
            if let Some(point) = AttachmentPoint::from_name(name) {
                map.find_folders_containing(false, None, Some(point), None)
            } else if let Some(slot) = WearableSlot::from_name(name) {
                map.find_folders_containing(false, None, None, Some(slot))
            } else {
                return None;
            }
        }
    };
    let mut folders: Vec<FolderId> = folders.into_iter().collect();
    folders.sort();
    Some(folders)
}

fn parse_channel(param: &str) -> Option<i32> {
    match param.parse::<i32>() {
        Ok(channel) if channel > 0 => Some(channel),
        _ => {
            debug!(param, "reply channel must be a positive integer");
            None
        }
    }
}
