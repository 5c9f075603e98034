//! Signal publishing/subscription mechanics.
//!
//! Application services announce outcomes (a movement was persisted, the
//! editor asked to close) through an [`EventBus`]; UI shells or tests subscribe
//! and react. The bus carries no domain knowledge.

pub mod bus;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
