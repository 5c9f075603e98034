//! Min/max threshold checks for a proposed movement.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kardex_core::{DomainError, DomainResult};

use crate::movement::Direction;
use crate::stock_type::StockType;

/// A proposed movement would push the balance past one of the stock type's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitViolation {
    pub direction: Direction,
    /// The bound that was crossed (maximum for entries, minimum for exits).
    pub bound: Decimal,
    pub resulting_stock: Decimal,
}

impl LimitViolation {
    pub fn title(&self) -> &'static str {
        match self.direction {
            Direction::Entry => "Stock limit exceeded",
            Direction::Exit => "Stock below minimum",
        }
    }

    pub fn message(&self) -> String {
        let bound = self.bound.normalize();
        let resulting = self.resulting_stock.normalize();
        match self.direction {
            Direction::Entry => format!(
                "The entered quantity exceeds the maximum allowed ({bound}); resulting stock would be {resulting}."
            ),
            Direction::Exit => format!(
                "This exit takes stock below the minimum allowed ({bound}); resulting stock would be {resulting}."
            ),
        }
    }
}

impl core::fmt::Display for LimitViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.title(), self.message())
    }
}

/// Balance that would result from applying `quantity` in `direction`.
pub fn resulting_stock(
    current_stock: Decimal,
    direction: Direction,
    quantity: Decimal,
) -> DomainResult<Decimal> {
    let resulting = match direction {
        Direction::Entry => current_stock.checked_add(quantity),
        Direction::Exit => current_stock.checked_sub(quantity),
    };
    resulting.ok_or_else(|| {
        DomainError::validation(format!(
            "{direction} of {quantity} against stock {current_stock} is out of range"
        ))
    })
}

/// Describe the bound a movement would cross, if any.
///
/// With no stock type selected nothing is enforced. Errors only when the
/// resulting balance cannot be represented.
pub fn limit_violation(
    stock_type: Option<&StockType>,
    current_stock: Decimal,
    direction: Direction,
    quantity: Decimal,
) -> DomainResult<Option<LimitViolation>> {
    let Some(stock_type) = stock_type else {
        return Ok(None);
    };
    let resulting = resulting_stock(current_stock, direction, quantity)?;

    let (crossed, bound) = match direction {
        Direction::Entry => (resulting > stock_type.maximum_amount, stock_type.maximum_amount),
        Direction::Exit => (resulting < stock_type.minimum_quantity, stock_type.minimum_quantity),
    };

    Ok(crossed.then_some(LimitViolation {
        direction,
        bound,
        resulting_stock: resulting,
    }))
}

/// Pure predicate: entries must stay `<= maximum_amount`, exits `>= minimum_quantity`.
///
/// A balance too large to represent never passes.
pub fn check_limits(
    stock_type: Option<&StockType>,
    current_stock: Decimal,
    direction: Direction,
    quantity: Decimal,
) -> bool {
    matches!(
        limit_violation(stock_type, current_stock, direction, quantity),
        Ok(None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kardex_core::StockTypeId;
    use rust_decimal_macros::dec;

    fn eggs(min: Decimal, max: Decimal) -> StockType {
        StockType::new(StockTypeId::new(), "Eggs", min, max).unwrap()
    }

    #[test]
    fn entry_within_maximum_is_accepted() {
        let t = eggs(dec!(0), dec!(150));
        assert!(check_limits(Some(&t), dec!(100), Direction::Entry, dec!(40)));
        assert_eq!(resulting_stock(dec!(100), Direction::Entry, dec!(40)).unwrap(), dec!(140));
    }

    #[test]
    fn entry_landing_exactly_on_maximum_is_accepted() {
        let t = eggs(dec!(0), dec!(150));
        assert!(check_limits(Some(&t), dec!(100), Direction::Entry, dec!(50)));
    }

    #[test]
    fn entry_over_maximum_reports_resulting_stock() {
        let t = eggs(dec!(0), dec!(150));
        let v = limit_violation(Some(&t), dec!(100), Direction::Entry, dec!(60))
            .unwrap()
            .unwrap();
        assert_eq!(v.bound, dec!(150));
        assert_eq!(v.resulting_stock, dec!(160));
        assert!(v.message().contains("resulting stock would be 160"));
        assert!(v.message().contains("maximum"));
    }

    #[test]
    fn exit_above_minimum_is_accepted() {
        let t = eggs(dec!(10), dec!(500));
        assert!(check_limits(Some(&t), dec!(50), Direction::Exit, dec!(40)));
        assert_eq!(resulting_stock(dec!(50), Direction::Exit, dec!(40)).unwrap(), dec!(10));
    }

    #[test]
    fn exit_landing_below_minimum_is_rejected_even_when_positive() {
        let t = eggs(dec!(20), dec!(500));
        assert!(!check_limits(Some(&t), dec!(50), Direction::Exit, dec!(40)));
    }

    #[test]
    fn exit_below_minimum_reports_resulting_stock() {
        let t = eggs(dec!(20), dec!(500));
        let v = limit_violation(Some(&t), dec!(50), Direction::Exit, dec!(35))
            .unwrap()
            .unwrap();
        assert_eq!(v.resulting_stock, dec!(15));
        assert!(v.message().contains("resulting stock would be 15"));
        assert!(v.message().contains("minimum"));
        assert_eq!(v.title(), "Stock below minimum");
    }

    #[test]
    fn message_normalizes_trailing_zeros() {
        let t = eggs(dec!(0), dec!(10.00));
        let v = limit_violation(Some(&t), dec!(8.50), Direction::Entry, dec!(4.00))
            .unwrap()
            .unwrap();
        assert!(v.message().ends_with("resulting stock would be 12.5."));
    }

    #[test]
    fn no_stock_type_is_permissive() {
        assert!(check_limits(None, dec!(0), Direction::Exit, dec!(1_000_000)));
        assert!(check_limits(None, dec!(0), Direction::Entry, dec!(1_000_000)));
    }

    #[test]
    fn out_of_range_balance_is_an_error_not_a_panic() {
        let t = eggs(dec!(0), dec!(150));
        assert!(resulting_stock(dec!(100), Direction::Entry, Decimal::MAX).is_err());
        assert!(resulting_stock(Decimal::MIN, Direction::Exit, dec!(1)).is_err());
        assert!(limit_violation(Some(&t), dec!(100), Direction::Entry, Decimal::MAX).is_err());
        assert!(!check_limits(Some(&t), dec!(100), Direction::Entry, Decimal::MAX));
    }

    #[test]
    fn largest_representable_entry_is_still_checked() {
        let t = eggs(dec!(0), Decimal::MAX);
        assert!(check_limits(Some(&t), dec!(0), Direction::Entry, Decimal::MAX));
        assert!(!check_limits(Some(&t), dec!(1), Direction::Entry, Decimal::MAX));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn amount() -> impl Strategy<Value = Decimal> {
            (-1_000_000_i64..1_000_000, 0_u32..3).prop_map(|(n, scale)| Decimal::new(n, scale))
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: entry accepted iff S + Q <= M.
            #[test]
            fn entry_matches_maximum_rule(s in amount(), q in amount(), m in amount()) {
                let t = StockType {
                    id: StockTypeId::new(),
                    name: "Feed".to_string(),
                    maximum_amount: m,
                    minimum_quantity: Decimal::MIN,
                };
                prop_assert_eq!(check_limits(Some(&t), s, Direction::Entry, q), s + q <= m);
            }

            /// Property: exit accepted iff S - Q >= m.
            #[test]
            fn exit_matches_minimum_rule(s in amount(), q in amount(), m in amount()) {
                let t = StockType {
                    id: StockTypeId::new(),
                    name: "Feed".to_string(),
                    maximum_amount: Decimal::MAX,
                    minimum_quantity: m,
                };
                prop_assert_eq!(check_limits(Some(&t), s, Direction::Exit, q), s - q >= m);
            }

            /// Property: without a stock type every quantity passes.
            #[test]
            fn no_type_always_passes(s in amount(), q in amount(), exit in any::<bool>()) {
                let direction = if exit { Direction::Exit } else { Direction::Entry };
                prop_assert!(check_limits(None, s, direction, q));
            }
        }
    }
}
