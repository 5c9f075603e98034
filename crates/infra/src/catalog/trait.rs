use std::sync::Arc;

use kardex_inventory::StockType;

use crate::error::ServiceError;

/// Read-only source of stock types.
///
/// Each call is an explicit request returning its own result; implementations
/// must not rely on a shared "current list" pushed to subscribers.
#[async_trait::async_trait]
pub trait StockTypeCatalog: Send + Sync {
    async fn list_all(&self) -> Result<Vec<StockType>, ServiceError>;
}

#[async_trait::async_trait]
impl<C> StockTypeCatalog for Arc<C>
where
    C: StockTypeCatalog + ?Sized,
{
    async fn list_all(&self) -> Result<Vec<StockType>, ServiceError> {
        (**self).list_all().await
    }
}
