//! Movement history and persistence boundary.
//!
//! History is read as a full list per request (current stock is derived from
//! it on the client); writes go through `create` / `update`.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryMovementStore;
pub use r#trait::{MovementHistory, MovementStore};
