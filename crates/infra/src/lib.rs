//! Infrastructure layer: collaborator ports, in-memory adapters, configuration,
//! and the stock movement recorder that composes them.

pub mod catalog;
pub mod config;
pub mod error;
pub mod movements;
pub mod notifier;
pub mod recorder;

pub use catalog::{InMemoryStockTypeCatalog, StockTypeCatalog};
pub use config::{ConfigError, RecorderConfig};
pub use error::ServiceError;
pub use movements::{InMemoryMovementStore, MovementHistory, MovementStore};
pub use notifier::{Notice, NoticeLevel, Notifier, RecordingNotifier, TracingNotifier};
pub use recorder::{
    ErrorKind, ModalEvent, ModalState, RecorderError, RecorderSignal, RecorderView,
    StockMovementRecorder, Transition,
};
