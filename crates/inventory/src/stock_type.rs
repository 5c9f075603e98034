//! Stock types: the reference data that carries each kind of stock's bounds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kardex_core::{DomainError, DomainResult, Entity, StockTypeId};

/// Reference data: a kind of stock tracked by the kardex (feed, eggs, vaccines, ...).
///
/// Fetched from an external catalog and never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockType {
    pub id: StockTypeId,
    pub name: String,
    /// Upper bound for the running balance.
    pub maximum_amount: Decimal,
    /// Lower bound for the running balance.
    pub minimum_quantity: Decimal,
}

impl StockType {
    pub fn new(
        id: StockTypeId,
        name: impl Into<String>,
        minimum_quantity: Decimal,
        maximum_amount: Decimal,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("stock type name cannot be empty"));
        }
        if minimum_quantity > maximum_amount {
            return Err(DomainError::validation(format!(
                "minimum quantity ({minimum_quantity}) exceeds maximum amount ({maximum_amount})"
            )));
        }
        Ok(Self {
            id,
            name,
            maximum_amount,
            minimum_quantity,
        })
    }
}

impl Entity for StockType {
    type Id = StockTypeId;

    fn id(&self) -> Option<&Self::Id> {
        Some(&self.id)
    }
}
