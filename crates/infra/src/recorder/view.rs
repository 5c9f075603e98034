use rust_decimal::Decimal;

use kardex_core::{DomainResult, StockTypeId};
use kardex_inventory::{
    Direction, LimitViolation, StockMovement, StockType, check_limits, finalize, limit_violation,
};

use super::error::RecorderError;
use super::state::{ModalEvent, ModalState};
use crate::config::RecorderConfig;

/// Immutable state of one editor session.
///
/// Every recorder operation takes a view and hands back a new one; nothing is
/// mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct RecorderView {
    state: ModalState,
    direction: Direction,
    is_edit: bool,
    fixed_stock_type: bool,
    stock_type_id: Option<StockTypeId>,
    stock_types: Vec<StockType>,
    current_stock: Decimal,
    limits_exceeded: bool,
}

impl RecorderView {
    /// A fresh session that has not been opened yet.
    pub fn new(config: &RecorderConfig, is_edit: bool) -> Self {
        Self {
            state: ModalState::Idle,
            direction: config.default_direction,
            is_edit,
            fixed_stock_type: config.fixed_stock_type,
            stock_type_id: None,
            stock_types: Vec::new(),
            current_stock: Decimal::ZERO,
            limits_exceeded: false,
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_edit(&self) -> bool {
        self.is_edit
    }

    pub fn fixed_stock_type(&self) -> bool {
        self.fixed_stock_type
    }

    pub fn stock_type_id(&self) -> Option<StockTypeId> {
        self.stock_type_id
    }

    pub fn stock_types(&self) -> &[StockType] {
        &self.stock_types
    }

    pub fn current_stock(&self) -> Decimal {
        self.current_stock
    }

    /// Last validation outcome (`true` after a rejected check).
    pub fn limits_exceeded(&self) -> bool {
        self.limits_exceeded
    }

    /// The selected stock type, once the catalog has resolved it.
    pub fn selected_stock_type(&self) -> Option<&StockType> {
        let id = self.stock_type_id?;
        self.stock_types.iter().find(|t| t.id == id)
    }

    /// Label for the stock type selector.
    pub fn selected_stock_type_name(&self) -> &str {
        match (self.selected_stock_type(), self.stock_type_id) {
            (Some(t), _) => &t.name,
            (None, Some(_)) => "Loading...",
            (None, None) => "Select a type",
        }
    }

    /// Whether `quantity` in the current direction stays within the selected
    /// type's bounds. Permissive when no type is selected; a balance too large
    /// to represent never passes.
    pub fn check_limits(&self, quantity: Decimal) -> bool {
        check_limits(
            self.selected_stock_type(),
            self.current_stock,
            self.direction,
            quantity,
        )
    }

    pub fn limit_violation(&self, quantity: Decimal) -> DomainResult<Option<LimitViolation>> {
        limit_violation(
            self.selected_stock_type(),
            self.current_stock,
            self.direction,
            quantity,
        )
    }

    /// Fill in balance fields for `movement` against the loaded current stock.
    pub fn finalize(&self, movement: StockMovement) -> DomainResult<StockMovement> {
        finalize(movement, self.direction, self.current_stock)
    }

    /// Flip entry/exit. Only allowed while editing; clears the validity flag.
    pub fn toggle_direction(&self) -> Result<RecorderView, RecorderError> {
        let state = self.state.on(ModalEvent::ToggleDirection)?;
        Ok(Self {
            state,
            direction: self.direction.toggled(),
            limits_exceeded: false,
            ..self.clone()
        })
    }

    pub(crate) fn advance(&self, event: ModalEvent) -> Result<RecorderView, RecorderError> {
        let state = self.state.on(event)?;
        Ok(Self {
            state,
            ..self.clone()
        })
    }

    pub(crate) fn with_stock_type_id(&self, stock_type_id: StockTypeId) -> RecorderView {
        Self {
            stock_type_id: Some(stock_type_id),
            limits_exceeded: false,
            ..self.clone()
        }
    }

    pub(crate) fn with_stock_types(&self, stock_types: Vec<StockType>) -> RecorderView {
        Self {
            stock_types,
            ..self.clone()
        }
    }

    pub(crate) fn with_current_stock(&self, current_stock: Decimal) -> RecorderView {
        Self {
            current_stock,
            ..self.clone()
        }
    }

    pub(crate) fn with_limits_exceeded(&self, limits_exceeded: bool) -> RecorderView {
        Self {
            limits_exceeded,
            ..self.clone()
        }
    }
}
