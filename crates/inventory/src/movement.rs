//! Kardex lines: direction, valuations, draft movements and balance finalization.
//!
//! All arithmetic is checked; a quantity or cost too large to represent is a
//! validation error, never a panic.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kardex_core::{DomainError, DomainResult, Entity, MovementId, StockTypeId, ValueObject};

use crate::limits::resulting_stock;

/// Movement direction: inbound stock (entry) or outbound stock (exit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Entry,
    Exit,
}

impl Direction {
    pub fn toggled(self) -> Self {
        match self {
            Direction::Entry => Direction::Exit,
            Direction::Exit => Direction::Entry,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Entry => "entry",
            Direction::Exit => "exit",
        }
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "entry" => Ok(Direction::Entry),
            "exit" => Ok(Direction::Exit),
            other => Err(DomainError::validation(format!(
                "direction must be one of: entry, exit (got '{other}')"
            ))),
        }
    }
}

/// Quantity, unit cost and their product.
///
/// Each kardex line carries three of these: entry, exit and the resulting balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Valuation {
    #[serde(default)]
    pub quantity: Decimal,
    #[serde(default)]
    pub unit_cost: Decimal,
    #[serde(default)]
    pub total: Decimal,
}

impl ValueObject for Valuation {}

impl Valuation {
    pub const ZERO: Valuation = Valuation {
        quantity: Decimal::ZERO,
        unit_cost: Decimal::ZERO,
        total: Decimal::ZERO,
    };

    /// Build a valuation whose total is `quantity × unit_cost`.
    pub fn priced(quantity: Decimal, unit_cost: Decimal) -> DomainResult<Self> {
        let total = quantity
            .checked_mul(unit_cost)
            .ok_or_else(|| DomainError::validation("quantity × unit cost is out of range"))?;
        Ok(Self {
            quantity,
            unit_cost,
            total,
        })
    }

    /// Quantity and unit cost as entered; the total is filled in by [`finalize`].
    pub fn unpriced(quantity: Decimal, unit_cost: Decimal) -> Self {
        Self {
            quantity,
            unit_cost,
            total: Decimal::ZERO,
        }
    }

    pub fn with_recomputed_total(self) -> DomainResult<Self> {
        Self::priced(self.quantity, self.unit_cost)
    }

    pub fn is_zero(&self) -> bool {
        self.quantity.is_zero() && self.unit_cost.is_zero() && self.total.is_zero()
    }
}

/// One kardex line: an entry or an exit against a stock type, plus the running
/// balance after it was applied.
///
/// Built in memory from user input, finalized, then handed to a store. Once the
/// store assigns an `id` the record is historical and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MovementId>,
    pub stock_type_id: StockTypeId,
    pub issue_date: NaiveDate,
    #[serde(default)]
    pub entry: Valuation,
    #[serde(default)]
    pub exit: Valuation,
    #[serde(default)]
    pub balance: Valuation,
}

impl StockMovement {
    /// Draft an inbound movement (not yet finalized, totals still zero).
    pub fn new_entry(
        stock_type_id: StockTypeId,
        issue_date: NaiveDate,
        quantity: Decimal,
        unit_cost: Decimal,
    ) -> Self {
        Self {
            id: None,
            stock_type_id,
            issue_date,
            entry: Valuation::unpriced(quantity, unit_cost),
            exit: Valuation::ZERO,
            balance: Valuation::ZERO,
        }
    }

    /// Draft an outbound movement (not yet finalized).
    ///
    /// `balance_unit_cost` is the cost at which the remaining stock is carried.
    pub fn new_exit(
        stock_type_id: StockTypeId,
        issue_date: NaiveDate,
        quantity: Decimal,
        unit_cost: Decimal,
        balance_unit_cost: Decimal,
    ) -> Self {
        Self {
            id: None,
            stock_type_id,
            issue_date,
            entry: Valuation::ZERO,
            exit: Valuation::unpriced(quantity, unit_cost),
            balance: Valuation {
                unit_cost: balance_unit_cost,
                ..Valuation::ZERO
            },
        }
    }

    pub fn with_id(mut self, id: MovementId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_balance(mut self, quantity: Decimal, unit_cost: Decimal) -> DomainResult<Self> {
        self.balance = Valuation::priced(quantity, unit_cost)?;
        Ok(self)
    }

    /// Quantity of the field-group that `direction` makes active.
    pub fn quantity_for(&self, direction: Direction) -> Decimal {
        match direction {
            Direction::Entry => self.entry.quantity,
            Direction::Exit => self.exit.quantity,
        }
    }

    /// Live entry total shown while the entry form is being edited.
    pub fn entry_total(&self) -> DomainResult<Decimal> {
        Ok(self.entry.with_recomputed_total()?.total)
    }

    pub fn with_recomputed_totals(mut self) -> DomainResult<Self> {
        self.entry = self.entry.with_recomputed_total()?;
        self.exit = self.exit.with_recomputed_total()?;
        self.balance = self.balance.with_recomputed_total()?;
        Ok(self)
    }

    /// Reject negative inputs on the active field-group.
    pub fn validate(&self, direction: Direction) -> DomainResult<()> {
        let active = match direction {
            Direction::Entry => &self.entry,
            Direction::Exit => &self.exit,
        };
        if active.quantity < Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "{direction} quantity cannot be negative"
            )));
        }
        if active.unit_cost < Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "{direction} unit cost cannot be negative"
            )));
        }
        Ok(())
    }
}

impl Entity for StockMovement {
    type Id = MovementId;

    fn id(&self) -> Option<&Self::Id> {
        self.id.as_ref()
    }
}

/// Compute the balance fields of a validated draft and zero the inactive side.
///
/// - entry: balance = `current_stock + entry.quantity`; the balance unit cost
///   falls back to the entry unit cost when none was carried over
/// - exit: balance = `current_stock - exit.quantity`; the carried balance unit
///   cost is kept
///
/// Pure: the caller owns `current_stock` and must reload it after persistence.
/// Fails when a total or the resulting balance does not fit in a `Decimal`.
pub fn finalize(
    movement: StockMovement,
    direction: Direction,
    current_stock: Decimal,
) -> DomainResult<StockMovement> {
    let mut movement = movement;
    let balance = resulting_stock(current_stock, direction, movement.quantity_for(direction))?;
    match direction {
        Direction::Entry => {
            let entry = movement.entry.with_recomputed_total()?;
            let balance_cost = if movement.balance.unit_cost.is_zero() {
                entry.unit_cost
            } else {
                movement.balance.unit_cost
            };
            movement.entry = entry;
            movement.balance = Valuation::priced(balance, balance_cost)?;
            movement.exit = Valuation::ZERO;
        }
        Direction::Exit => {
            movement.exit = movement.exit.with_recomputed_total()?;
            movement.balance = Valuation::priced(balance, movement.balance.unit_cost)?;
            movement.entry = Valuation::ZERO;
        }
    }
    Ok(movement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    /// 1e20 units at 1e10 each: both fit, their product does not.
    fn oversized() -> (Decimal, Decimal) {
        (dec!(100_000_000_000_000_000_000), dec!(10_000_000_000))
    }

    #[test]
    fn entry_finalize_adds_to_current_stock_and_clears_exit() {
        let mut draft = StockMovement::new_entry(StockTypeId::new(), day(), dec!(40), dec!(2.5));
        draft.exit = Valuation::priced(dec!(3), dec!(1)).unwrap();

        let done = finalize(draft, Direction::Entry, dec!(100)).unwrap();

        assert_eq!(done.balance.quantity, dec!(140));
        assert_eq!(done.balance.unit_cost, dec!(2.5));
        assert_eq!(done.balance.total, dec!(350));
        assert_eq!(done.entry.total, dec!(100));
        assert!(done.exit.is_zero());
    }

    #[test]
    fn entry_finalize_keeps_carried_balance_cost() {
        let draft = StockMovement::new_entry(StockTypeId::new(), day(), dec!(10), dec!(4))
            .with_balance(dec!(0), dec!(3))
            .unwrap();

        let done = finalize(draft, Direction::Entry, dec!(5)).unwrap();

        assert_eq!(done.balance.unit_cost, dec!(3));
        assert_eq!(done.balance.total, dec!(45));
    }

    #[test]
    fn exit_finalize_subtracts_and_clears_entry() {
        let mut draft =
            StockMovement::new_exit(StockTypeId::new(), day(), dec!(40), dec!(1.2), dec!(1.1));
        draft.entry = Valuation::priced(dec!(9), dec!(9)).unwrap();

        let done = finalize(draft, Direction::Exit, dec!(50)).unwrap();

        assert_eq!(done.balance.quantity, dec!(10));
        assert_eq!(done.balance.total, dec!(11.0));
        assert_eq!(done.exit.total, dec!(48.0));
        assert!(done.entry.is_zero());
    }

    #[test]
    fn finalize_does_not_touch_identity_or_date() {
        let id = MovementId::new();
        let draft =
            StockMovement::new_entry(StockTypeId::new(), day(), dec!(1), dec!(1)).with_id(id);
        let done = finalize(draft.clone(), Direction::Entry, dec!(0)).unwrap();
        assert_eq!(done.id, Some(id));
        assert_eq!(done.issue_date, draft.issue_date);
        assert_eq!(done.stock_type_id, draft.stock_type_id);
    }

    #[test]
    fn drafts_accept_any_input_and_leave_totals_to_finalize() {
        let (q, c) = oversized();
        let draft = StockMovement::new_entry(StockTypeId::new(), day(), q, c);
        assert_eq!(draft.entry.quantity, q);
        assert_eq!(draft.entry.total, Decimal::ZERO);
        assert!(draft.entry_total().is_err());
    }

    #[test]
    fn entry_total_tracks_live_inputs() {
        let mut draft = StockMovement::new_entry(StockTypeId::new(), day(), dec!(0), dec!(0));
        draft.entry.quantity = dec!(12);
        draft.entry.unit_cost = dec!(0.25);
        assert_eq!(draft.entry_total().unwrap(), dec!(3));
    }

    #[test]
    fn recomputed_totals_cover_every_side() {
        let mut m = StockMovement::new_entry(StockTypeId::new(), day(), dec!(4), dec!(2));
        m.exit = Valuation::unpriced(dec!(1), dec!(3));
        m.balance = Valuation::unpriced(dec!(6), dec!(0.5));

        let m = m.with_recomputed_totals().unwrap();

        assert_eq!(m.entry.total, dec!(8));
        assert_eq!(m.exit.total, dec!(3));
        assert_eq!(m.balance.total, dec!(3));
    }

    #[test]
    fn priced_reports_overflow_as_validation_error() {
        let err = Valuation::priced(Decimal::MAX, dec!(2)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn finalize_rejects_balance_out_of_range() {
        let draft = StockMovement::new_entry(StockTypeId::new(), day(), Decimal::MAX, dec!(0));
        assert!(finalize(draft, Direction::Entry, dec!(100)).is_err());

        let draft =
            StockMovement::new_exit(StockTypeId::new(), day(), Decimal::MAX, dec!(0), dec!(0));
        assert!(finalize(draft, Direction::Exit, Decimal::MIN).is_err());
    }

    #[test]
    fn finalize_rejects_total_out_of_range() {
        let (q, c) = oversized();
        let draft = StockMovement::new_entry(StockTypeId::new(), day(), q, c);
        assert!(finalize(draft, Direction::Entry, dec!(0)).is_err());
    }

    #[test]
    fn validate_rejects_negative_active_quantity_only() {
        let mut draft = StockMovement::new_entry(StockTypeId::new(), day(), dec!(-1), dec!(1));
        assert!(draft.validate(Direction::Entry).is_err());
        assert!(draft.validate(Direction::Exit).is_ok());

        draft.entry.quantity = dec!(1);
        draft.entry.unit_cost = dec!(-0.5);
        assert!(draft.validate(Direction::Entry).is_err());
    }

    #[test]
    fn direction_parses_and_toggles() {
        assert_eq!("Exit".parse::<Direction>().unwrap(), Direction::Exit);
        assert!("sideways".parse::<Direction>().is_err());
        assert_eq!(Direction::Entry.toggled(), Direction::Exit);
        assert_eq!(Direction::Exit.toggled().toggled(), Direction::Exit);
    }

    #[test]
    fn missing_numeric_fields_deserialize_as_zero() {
        let json = serde_json::json!({
            "stock_type_id": StockTypeId::new(),
            "issue_date": "2024-03-01",
            "entry": { "quantity": "5" }
        });
        let m: StockMovement = serde_json::from_value(json).unwrap();
        assert_eq!(m.id, None);
        assert_eq!(m.entry.quantity, dec!(5));
        assert_eq!(m.entry.unit_cost, Decimal::ZERO);
        assert!(m.balance.is_zero());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn amount() -> impl Strategy<Value = Decimal> {
            (0_i64..10_000_000, 0_u32..4).prop_map(|(n, scale)| Decimal::new(n, scale))
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: finalizing an entry zeroes every exit field.
            #[test]
            fn entry_zeroes_exit(q in amount(), c in amount(), s in amount(), xq in amount(), xc in amount()) {
                let mut draft = StockMovement::new_entry(StockTypeId::new(), day(), q, c);
                draft.exit = Valuation::unpriced(xq, xc);
                let done = finalize(draft, Direction::Entry, s).unwrap();
                prop_assert!(done.exit.is_zero());
                prop_assert_eq!(done.balance.quantity, s + q);
            }

            /// Property: finalizing an exit zeroes every entry field.
            #[test]
            fn exit_zeroes_entry(q in amount(), c in amount(), s in amount(), bc in amount(), eq in amount()) {
                let mut draft = StockMovement::new_exit(StockTypeId::new(), day(), q, c, bc);
                draft.entry = Valuation::unpriced(eq, c);
                let done = finalize(draft, Direction::Exit, s).unwrap();
                prop_assert!(done.entry.is_zero());
                prop_assert_eq!(done.balance.quantity, s - q);
            }

            /// Property: every total is exactly quantity × unit cost after finalize.
            #[test]
            fn totals_are_exact_products(q in amount(), c in amount(), s in amount(), exit in any::<bool>()) {
                let direction = if exit { Direction::Exit } else { Direction::Entry };
                let draft = match direction {
                    Direction::Entry => StockMovement::new_entry(StockTypeId::new(), day(), q, c),
                    Direction::Exit => StockMovement::new_exit(StockTypeId::new(), day(), q, c, c),
                };
                let done = finalize(draft, direction, s).unwrap();
                for v in [done.entry, done.exit, done.balance] {
                    prop_assert_eq!(v.total, v.quantity * v.unit_cost);
                }
            }

            /// Property: out-of-range quantities never panic; they are reported.
            #[test]
            fn huge_quantities_fail_cleanly(s in amount(), exit in any::<bool>()) {
                let direction = if exit { Direction::Exit } else { Direction::Entry };
                let q = if exit { Decimal::MIN } else { Decimal::MAX };
                let draft = match direction {
                    Direction::Entry => StockMovement::new_entry(StockTypeId::new(), day(), q, dec!(1)),
                    Direction::Exit => StockMovement::new_exit(StockTypeId::new(), day(), q, dec!(1), dec!(1)),
                };
                let s = s + dec!(1);
                prop_assert!(finalize(draft, direction, s).is_err());
            }
        }
    }
}
