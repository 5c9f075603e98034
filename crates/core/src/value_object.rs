//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. In the kardex domain a quantity/unit-cost/total triple is
//! a value object, while a stock movement (which gets an identifier once
//! persisted) is an entity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one with the new values.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Valuation {
///     quantity: Decimal,
///     unit_cost: Decimal,
///     total: Decimal,
/// }
///
/// impl ValueObject for Valuation {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
