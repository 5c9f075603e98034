use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use kardex_inventory::StockType;

use super::r#trait::StockTypeCatalog;
use crate::error::ServiceError;

/// In-memory stock type catalog for tests/dev.
///
/// `set_unavailable(true)` makes every call fail, to exercise degraded paths.
#[derive(Debug, Default)]
pub struct InMemoryStockTypeCatalog {
    types: RwLock<Vec<StockType>>,
    unavailable: AtomicBool,
}

impl InMemoryStockTypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_types(types: impl IntoIterator<Item = StockType>) -> Self {
        Self {
            types: RwLock::new(types.into_iter().collect()),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn insert(&self, stock_type: StockType) {
        if let Ok(mut types) = self.types.write() {
            types.retain(|t| t.id != stock_type.id);
            types.push(stock_type);
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl StockTypeCatalog for InMemoryStockTypeCatalog {
    async fn list_all(&self) -> Result<Vec<StockType>, ServiceError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ServiceError::unavailable("stock type catalog offline"));
        }
        let types = self
            .types
            .read()
            .map_err(|_| ServiceError::unavailable("lock poisoned"))?;
        Ok(types.clone())
    }
}
