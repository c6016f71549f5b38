//! Error types for the conversation model.

use thiserror::Error;

/// Precondition violations on conversation buffer and history access.
///
/// These are the only fallible operations in the model; everything else is
/// infallible state manipulation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// `poll_buffered_message` was called on an empty buffer. Callers are
    /// expected to check `has_buffered_messages` first.
    #[error("no buffered messages to poll")]
    EmptyBuffer,

    /// A history index past the end of the bounded history ring.
    #[error("history index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}
