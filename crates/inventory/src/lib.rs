//! Kardex (perpetual inventory ledger) domain module.
//!
//! This crate contains the business rules for stock movements, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage):
//!
//! - reference data: [`StockType`] with its min/max thresholds
//! - records: [`StockMovement`] with entry / exit / balance [`Valuation`]s
//! - rules: limit checks, balance finalization, current-stock derivation

pub mod ledger;
pub mod limits;
pub mod movement;
pub mod stock_type;

pub use ledger::{current_stock, latest_movement};
pub use limits::{LimitViolation, check_limits, limit_violation, resulting_stock};
pub use movement::{Direction, StockMovement, Valuation, finalize};
pub use stock_type::StockType;
