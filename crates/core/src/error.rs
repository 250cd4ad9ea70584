use thiserror::Error;

/// Raised when the caller cancels a generation request.
///
/// Kept separate from every other failure so callers can map it to a
/// "cancelled" status instead of a generic error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("study kit generation aborted by caller")]
pub struct AbortError;
