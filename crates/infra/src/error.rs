use thiserror::Error;

/// Failure reported by a remote collaborator (catalog, history, store).
///
/// These are **infrastructure errors**: the backend could not be reached, or
/// it refused the request. Domain rule failures never travel through here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Transport or backend unavailable.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// The backend rejected the request (validation, conflict, ...).
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The referenced record does not exist on the backend.
    #[error("record not found: {0}")]
    NotFound(String),
}

impl ServiceError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}
