//! Current-stock derivation from movement history.
//!
//! Current stock is never stored; it is the balance of the latest movement for
//! a stock type.

use rust_decimal::Decimal;

use kardex_core::StockTypeId;

use crate::movement::StockMovement;

/// Latest movement (by `issue_date`) for one stock type.
///
/// When several movements share the latest date, the first one in `movements`
/// order wins.
pub fn latest_movement(
    movements: &[StockMovement],
    stock_type_id: StockTypeId,
) -> Option<&StockMovement> {
    movements
        .iter()
        .filter(|m| m.stock_type_id == stock_type_id)
        .fold(None, |latest: Option<&StockMovement>, m| match latest {
            Some(l) if l.issue_date >= m.issue_date => Some(l),
            _ => Some(m),
        })
}

/// Balance quantity of the latest movement, or zero when there is no history.
pub fn current_stock(movements: &[StockMovement], stock_type_id: StockTypeId) -> Decimal {
    latest_movement(movements, stock_type_id)
        .map(|m| m.balance.quantity)
        .unwrap_or(Decimal::ZERO)
}
