//! Stock type catalog boundary (reference data).

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryStockTypeCatalog;
pub use r#trait::StockTypeCatalog;
