//! Command grammar and session dispatcher for the RLV protocol.
//!
//! A [`Session`] owns the restriction store for one avatar session, parses
//! inbound chat-channel messages into commands, and routes each command to
//! the store, the permission evaluator, or the inventory planner plus the
//! host-supplied query/action callbacks.

pub mod behavior;
pub mod callbacks;
pub mod parser;
pub mod session;

pub use behavior::{AttachSpec, Behavior};
pub use callbacks::{cancel_signal, is_cancelled, ActionCallbacks, CancelSignal, QueryCallbacks};
pub use parser::{parse_message, ParsedCommand};
pub use session::Session;
