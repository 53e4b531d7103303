//! Errors - error types and their classification
//!
//! Submission never reports device trouble: device faults surface only in
//! the outcome of the task that hit them (see [`crate::app::TaskTicket`]).

use thiserror::Error;

/// A failure reported by the display/buzzer driver or the animation factory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    #[error("device rejected request: {0}")]
    Rejected(String),

    #[error("animation not found: {0}")]
    AnimationNotFound(String),
}

/// Errors of the display sequencer itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequencerError {
    /// The sequencer was torn down; nothing new is accepted.
    #[error("display sequencer is shut down")]
    ShutDown,

    /// A task ran and its device call failed.
    #[error("device fault: {0}")]
    Device(#[from] DeviceError),

    /// The blocking device call panicked.
    #[error("device task aborted: {0}")]
    Aborted(String),
}

/// Errors of the station store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("table {0} has no row")]
    MissingRow(&'static str),
}
