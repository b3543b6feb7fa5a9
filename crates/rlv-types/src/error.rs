//! Error types shared across the RLV crates.

/// Errors that can occur inside the RLV core.
///
/// None of these cross the `process_message` boundary; the dispatcher
/// converts every failure into the aggregate boolean result the protocol
/// requires.
#[derive(Debug, thiserror::Error)]
pub enum RlvError {
    #[error("inventory snapshot error: {0}")]
    Inventory(String),

    #[error("command parse error: {0}")]
    Parse(String),

    #[error("collaborator call failed: {0}")]
    Callback(String),

    #[error("operation cancelled")]
    Cancelled,
}
