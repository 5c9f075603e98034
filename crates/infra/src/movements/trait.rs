use std::sync::Arc;

use kardex_core::MovementId;
use kardex_inventory::StockMovement;

use crate::error::ServiceError;

/// Read side: every recorded movement, across all stock types.
#[async_trait::async_trait]
pub trait MovementHistory: Send + Sync {
    async fn get_all(&self) -> Result<Vec<StockMovement>, ServiceError>;
}

/// Write side: persist a new movement or replace an existing one.
///
/// Implementations assign the identifier on `create` and return the record as
/// stored. No version check is performed on either call.
#[async_trait::async_trait]
pub trait MovementStore: Send + Sync {
    async fn create(&self, movement: StockMovement) -> Result<StockMovement, ServiceError>;

    async fn update(
        &self,
        id: MovementId,
        movement: StockMovement,
    ) -> Result<StockMovement, ServiceError>;
}

#[async_trait::async_trait]
impl<H> MovementHistory for Arc<H>
where
    H: MovementHistory + ?Sized,
{
    async fn get_all(&self) -> Result<Vec<StockMovement>, ServiceError> {
        (**self).get_all().await
    }
}

#[async_trait::async_trait]
impl<S> MovementStore for Arc<S>
where
    S: MovementStore + ?Sized,
{
    async fn create(&self, movement: StockMovement) -> Result<StockMovement, ServiceError> {
        (**self).create(movement).await
    }

    async fn update(
        &self,
        id: MovementId,
        movement: StockMovement,
    ) -> Result<StockMovement, ServiceError> {
        (**self).update(id, movement).await
    }
}
