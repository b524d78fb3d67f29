use crate::clock::Cancelled;
use crate::storage::StorageError;

// ============================================================================
// Session Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Deliberately says nothing about which field was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("An account with this email already exists")]
    DuplicateIdentity,

    #[error("Operation cancelled before completion")]
    Cancelled,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<Cancelled> for SessionError {
    fn from(_: Cancelled) -> Self {
        SessionError::Cancelled
    }
}
