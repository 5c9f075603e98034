//! Editor session lifecycle.
//!
//! ```text
//! Idle --Open--> Editing --SubmitAttempt--> Validating --Accepted--> Submitting --Persisted--> Closed
//!                   ^                           |                        |
//!                   +---------Rejected----------+                        |
//!                   +--------------------PersistFailed-------------------+
//! Idle | Editing --Cancel--> Closed
//! Editing --ToggleDirection | SelectStockType--> Editing
//! ```

use serde::{Deserialize, Serialize};

use super::error::RecorderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalState {
    #[default]
    Idle,
    Editing,
    Validating,
    Submitting,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalEvent {
    Open,
    SubmitAttempt,
    Rejected,
    Accepted,
    Persisted,
    PersistFailed,
    Cancel,
    ToggleDirection,
    SelectStockType,
}

impl ModalState {
    /// Next state for `event`, or `InvalidTransition` when `event` is not
    /// allowed from `self`.
    pub fn on(self, event: ModalEvent) -> Result<ModalState, RecorderError> {
        use ModalEvent as E;
        use ModalState as S;

        let next = match (self, event) {
            (S::Idle, E::Open) => S::Editing,
            (S::Editing, E::SubmitAttempt) => S::Validating,
            (S::Validating, E::Rejected) => S::Editing,
            (S::Validating, E::Accepted) => S::Submitting,
            (S::Submitting, E::Persisted) => S::Closed,
            (S::Submitting, E::PersistFailed) => S::Editing,
            (S::Idle | S::Editing, E::Cancel) => S::Closed,
            (S::Editing, E::ToggleDirection | E::SelectStockType) => S::Editing,
            (state, event) => return Err(RecorderError::InvalidTransition { state, event }),
        };

        tracing::debug!(from = ?self, to = ?next, event = ?event, "modal transition");
        Ok(next)
    }

    pub fn is_closed(self) -> bool {
        self == ModalState::Closed
    }
}
