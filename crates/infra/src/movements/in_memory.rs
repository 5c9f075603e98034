use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use kardex_core::MovementId;
use kardex_inventory::StockMovement;

use super::r#trait::{MovementHistory, MovementStore};
use crate::error::ServiceError;

/// In-memory movement ledger implementing both history and store.
///
/// Intended for tests/dev. Records are kept in insertion order, which is also
/// the order `get_all` returns them in.
#[derive(Debug, Default)]
pub struct InMemoryMovementStore {
    records: RwLock<Vec<StockMovement>>,
    reads_unavailable: AtomicBool,
    writes_rejected: AtomicBool,
}

impl InMemoryMovementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed historical records as-is (identifiers are assigned when missing).
    pub fn with_history(history: impl IntoIterator<Item = StockMovement>) -> Self {
        let records = history
            .into_iter()
            .map(|m| match m.id {
                Some(_) => m,
                None => m.with_id(MovementId::new()),
            })
            .collect();
        Self {
            records: RwLock::new(records),
            ..Self::default()
        }
    }

    pub fn set_reads_unavailable(&self, unavailable: bool) {
        self.reads_unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn set_writes_rejected(&self, rejected: bool) {
        self.writes_rejected.store(rejected, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_writable(&self) -> Result<(), ServiceError> {
        if self.writes_rejected.load(Ordering::SeqCst) {
            return Err(ServiceError::rejected("movement store refused the write"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl MovementHistory for InMemoryMovementStore {
    async fn get_all(&self) -> Result<Vec<StockMovement>, ServiceError> {
        if self.reads_unavailable.load(Ordering::SeqCst) {
            return Err(ServiceError::unavailable("movement history offline"));
        }
        let records = self
            .records
            .read()
            .map_err(|_| ServiceError::unavailable("lock poisoned"))?;
        Ok(records.clone())
    }
}

#[async_trait::async_trait]
impl MovementStore for InMemoryMovementStore {
    async fn create(&self, movement: StockMovement) -> Result<StockMovement, ServiceError> {
        self.ensure_writable()?;
        let stored = movement.with_id(MovementId::new());
        let mut records = self
            .records
            .write()
            .map_err(|_| ServiceError::unavailable("lock poisoned"))?;
        records.push(stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: MovementId,
        movement: StockMovement,
    ) -> Result<StockMovement, ServiceError> {
        self.ensure_writable()?;
        let mut records = self
            .records
            .write()
            .map_err(|_| ServiceError::unavailable("lock poisoned"))?;
        let slot = records
            .iter_mut()
            .find(|m| m.id == Some(id))
            .ok_or_else(|| ServiceError::not_found(format!("movement {id}")))?;
        *slot = movement.with_id(id);
        Ok(slot.clone())
    }
}
