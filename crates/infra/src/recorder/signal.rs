use serde::{Deserialize, Serialize};

use kardex_inventory::StockMovement;

/// Signals emitted to whoever hosts the recorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "movement", rename_all = "snake_case")]
pub enum RecorderSignal {
    /// The store accepted a create/update; carries the record as stored.
    MovementPersisted(StockMovement),
    /// The session is over and the editor should be dismissed.
    CloseRequested,
}

impl RecorderSignal {
    pub fn signal_type(&self) -> &'static str {
        match self {
            RecorderSignal::MovementPersisted(_) => "kardex.movement.persisted",
            RecorderSignal::CloseRequested => "kardex.editor.close_requested",
        }
    }
}
