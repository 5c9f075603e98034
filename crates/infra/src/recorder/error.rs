use thiserror::Error;

use kardex_core::DomainError;
use kardex_inventory::LimitViolation;

use super::state::{ModalEvent, ModalState};
use super::view::RecorderView;
use crate::error::ServiceError;

/// Coarse failure category, for callers deciding between logging and surfacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input rejected locally; the user may adjust and retry.
    Validation,
    /// A history or catalog load failed; the session degrades to defaults.
    Fetch,
    /// The store refused a create/update; the form is kept for retry.
    Persistence,
    /// The operation is not allowed in the current session state.
    Usage,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecorderError {
    #[error("{0}")]
    LimitExceeded(LimitViolation),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("failed to load {what}: {source}")]
    Fetch {
        what: &'static str,
        source: ServiceError,
    },

    #[error("failed to persist movement: {0}")]
    Persistence(ServiceError),

    #[error("{event:?} is not allowed while {state:?}")]
    InvalidTransition { state: ModalState, event: ModalEvent },

    #[error("stock type is fixed for this session")]
    StockTypeFixed,
}

impl RecorderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecorderError::LimitExceeded(_) | RecorderError::Domain(_) => ErrorKind::Validation,
            RecorderError::Fetch { .. } => ErrorKind::Fetch,
            RecorderError::Persistence(_) => ErrorKind::Persistence,
            RecorderError::InvalidTransition { .. } | RecorderError::StockTypeFixed => {
                ErrorKind::Usage
            }
        }
    }
}

/// Outcome of a recorder operation: the next view plus what happened.
///
/// The view is always returned, failures included, so callers never have to
/// reconstruct session state after an error.
#[derive(Debug, Clone)]
pub struct Transition<T> {
    pub view: RecorderView,
    pub result: Result<T, RecorderError>,
}

impl<T> Transition<T> {
    pub fn ok(view: RecorderView, value: T) -> Self {
        Self {
            view,
            result: Ok(value),
        }
    }

    pub fn err(view: RecorderView, error: RecorderError) -> Self {
        Self {
            view,
            result: Err(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn into_parts(self) -> (RecorderView, Result<T, RecorderError>) {
        (self.view, self.result)
    }
}
