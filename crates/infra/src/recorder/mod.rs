//! Stock movement recorder (application-level orchestration).
//!
//! The recorder drives one kardex editor session: it loads reference data and
//! history, validates a proposed entry/exit against the stock type's bounds,
//! computes the resulting balance, and hands the finished record to the store.
//!
//! ```text
//! open ──> catalog.list_all + history.get_all (current stock)
//! submit
//!   ├─ edit with id ──────────────────────────────> store.update (unchanged)
//!   └─ otherwise ──> validate ──> finalize ───────> store.create
//!                       └─ rejected: warn, back to editing
//! persisted ──> info notice, MovementPersisted, CloseRequested
//! ```
//!
//! Session state lives in [`RecorderView`]; every operation takes the current
//! view and returns the next one inside a [`Transition`].

pub mod error;
pub mod signal;
pub mod state;
pub mod view;


pub use error::{ErrorKind, RecorderError, Transition};
pub use signal::RecorderSignal;
pub use state::{ModalEvent, ModalState};
pub use view::RecorderView;

use rust_decimal::Decimal;

use kardex_core::{DomainError, StockTypeId};
use kardex_events::EventBus;
use kardex_inventory::{StockMovement, current_stock};

use crate::catalog::StockTypeCatalog;
use crate::movements::{MovementHistory, MovementStore};
use crate::notifier::Notifier;

/// Composes the collaborators one editor session needs.
///
/// - `C`: stock type catalog
/// - `H`: movement history (source of current stock)
/// - `S`: movement store (create/update)
/// - `N`: user-facing notices
/// - `B`: signal bus for [`RecorderSignal`]s
#[derive(Debug)]
pub struct StockMovementRecorder<C, H, S, N, B> {
    catalog: C,
    history: H,
    store: S,
    notifier: N,
    bus: B,
}

impl<C, H, S, N, B> StockMovementRecorder<C, H, S, N, B> {
    pub fn new(catalog: C, history: H, store: S, notifier: N, bus: B) -> Self {
        Self {
            catalog,
            history,
            store,
            notifier,
            bus,
        }
    }

    pub fn into_parts(self) -> (C, H, S, N, B) {
        (self.catalog, self.history, self.store, self.notifier, self.bus)
    }
}

impl<C, H, S, N, B> StockMovementRecorder<C, H, S, N, B>
where
    C: StockTypeCatalog,
    H: MovementHistory,
    S: MovementStore,
    N: Notifier,
    B: EventBus<RecorderSignal>,
{
    /// Start editing `movement`: select its stock type and load current stock.
    ///
    /// Load failures do not block the session. The returned view is `Editing`
    /// either way; with no catalog nothing is enforced, with no history the
    /// current stock is zero. The first failure is reported in `result`.
    pub async fn open(&self, view: &RecorderView, movement: &StockMovement) -> Transition<()> {
        let opened = match view.advance(ModalEvent::Open) {
            Ok(v) => v.with_stock_type_id(movement.stock_type_id),
            Err(e) => return Transition::err(view.clone(), e),
        };

        let mut first_failure = None;

        let opened = match self.catalog.list_all().await {
            Ok(types) => opened.with_stock_types(types),
            Err(source) => {
                tracing::warn!(error = %source, "failed to load stock types; limits not enforced");
                first_failure = Some(RecorderError::Fetch {
                    what: "stock types",
                    source,
                });
                opened
            }
        };

        let (opened, loaded) = self
            .load_current_stock(&opened, movement.stock_type_id)
            .await
            .into_parts();

        match (first_failure, loaded) {
            (Some(e), _) | (None, Err(e)) => Transition::err(opened, e),
            (None, Ok(_)) => Transition::ok(opened, ()),
        }
    }

    /// Derive current stock from the latest movement of `stock_type_id`.
    ///
    /// On failure current stock falls back to zero, so the type in view is
    /// never checked against another type's balance.
    pub async fn load_current_stock(
        &self,
        view: &RecorderView,
        stock_type_id: StockTypeId,
    ) -> Transition<Decimal> {
        match self.history.get_all().await {
            Ok(movements) => {
                let stock = current_stock(&movements, stock_type_id);
                tracing::debug!(%stock_type_id, %stock, "current stock loaded");
                Transition::ok(view.with_current_stock(stock), stock)
            }
            Err(source) => {
                tracing::warn!(%stock_type_id, error = %source, "failed to load current stock");
                Transition::err(
                    view.with_current_stock(Decimal::ZERO),
                    RecorderError::Fetch {
                        what: "movement history",
                        source,
                    },
                )
            }
        }
    }

    /// Switch to another stock type (sessions without a fixed type only).
    pub async fn select_stock_type(
        &self,
        view: &RecorderView,
        stock_type_id: StockTypeId,
    ) -> Transition<()> {
        if view.fixed_stock_type() {
            return Transition::err(view.clone(), RecorderError::StockTypeFixed);
        }
        let selected = match view.advance(ModalEvent::SelectStockType) {
            Ok(v) => v,
            Err(e) => return Transition::err(view.clone(), e),
        };
        if !selected.stock_types().iter().any(|t| t.id == stock_type_id) {
            return Transition::err(
                view.clone(),
                DomainError::not_found(format!("stock type {stock_type_id}")).into(),
            );
        }

        let selected = selected.with_stock_type_id(stock_type_id);
        let (selected, loaded) = self
            .load_current_stock(&selected, stock_type_id)
            .await
            .into_parts();
        Transition {
            view: selected,
            result: loaded.map(|_| ()),
        }
    }

    /// Re-check limits for the active quantity of `movement`, warning on failure.
    ///
    /// Records the outcome in the view's `limits_exceeded` flag. A quantity
    /// whose resulting balance cannot be represented is rejected as invalid.
    pub fn validate_and_warn(&self, view: &RecorderView, movement: &StockMovement) -> Transition<()> {
        let quantity = movement.quantity_for(view.direction());
        match view.limit_violation(quantity) {
            Ok(None) => Transition::ok(view.with_limits_exceeded(false), ()),
            Err(e) => {
                tracing::warn!(%quantity, error = %e, "movement quantity out of range");
                self.notifier.warn("Invalid movement", &e.to_string());
                Transition::err(view.with_limits_exceeded(true), e.into())
            }
            Ok(Some(violation)) => {
                tracing::warn!(
                    direction = %violation.direction,
                    bound = %violation.bound,
                    resulting_stock = %violation.resulting_stock,
                    "movement rejected by stock limits"
                );
                self.notifier.warn(violation.title(), &violation.message());
                Transition::err(
                    view.with_limits_exceeded(true),
                    RecorderError::LimitExceeded(violation),
                )
            }
        }
    }

    /// Validate, finalize and persist `movement`.
    ///
    /// Editing a movement that already has an identifier sends it to
    /// `store.update` exactly as given: no limit check, no recomputation.
    /// Anything else is checked against the limits, finalized against the
    /// view's current stock and sent to `store.create`.
    ///
    /// Current stock is the value loaded when the session opened (or the type
    /// was selected). It is not re-read before `create`, so a movement recorded
    /// elsewhere in between is not accounted for.
    ///
    /// On success the view is `Closed` and `MovementPersisted` then
    /// `CloseRequested` are published. On rejection or store failure the view
    /// is back to `Editing` and `movement` is left untouched for the caller.
    pub async fn submit(
        &self,
        view: &RecorderView,
        movement: &StockMovement,
    ) -> Transition<StockMovement> {
        let validating = match view.advance(ModalEvent::SubmitAttempt) {
            Ok(v) => v,
            Err(e) => return Transition::err(view.clone(), e),
        };

        let update_id = if view.is_edit() { movement.id } else { None };

        let (submitting, persisted) = match update_id {
            Some(id) => {
                let submitting = match validating.advance(ModalEvent::Accepted) {
                    Ok(v) => v,
                    Err(e) => return Transition::err(view.clone(), e),
                };
                (submitting, self.store.update(id, movement.clone()).await)
            }
            None => {
                if let Err(e) = movement.validate(view.direction()) {
                    self.notifier.warn("Invalid movement", &e.to_string());
                    return self.reject(&validating, e.into());
                }

                let (checked, verdict) = self.validate_and_warn(&validating, movement).into_parts();
                if let Err(e) = verdict {
                    return self.reject(&checked, e);
                }

                let finalized = match checked.finalize(movement.clone()) {
                    Ok(m) => m,
                    Err(e) => {
                        self.notifier.warn("Invalid movement", &e.to_string());
                        return self.reject(&checked, e.into());
                    }
                };
                let submitting = match checked.advance(ModalEvent::Accepted) {
                    Ok(v) => v,
                    Err(e) => return Transition::err(view.clone(), e),
                };
                // TODO: re-read history (or send the expected prior balance) before
                // create once the backend offers a conditional write.
                (submitting, self.store.create(finalized).await)
            }
        };

        let action = if update_id.is_some() { "updated" } else { "created" };

        match persisted {
            Ok(record) => {
                let closed = match submitting.advance(ModalEvent::Persisted) {
                    Ok(v) => v,
                    Err(e) => return Transition::err(submitting, e),
                };
                tracing::info!(
                    movement_id = ?record.id,
                    stock_type_id = %record.stock_type_id,
                    balance = %record.balance.quantity,
                    action,
                    "kardex movement persisted"
                );
                let title = if update_id.is_some() { "Updated" } else { "Created" };
                self.notifier
                    .info(title, &format!("Kardex movement {action} successfully."));
                self.emit(RecorderSignal::MovementPersisted(record.clone()));
                self.emit(RecorderSignal::CloseRequested);
                Transition::ok(closed, record)
            }
            Err(source) => {
                tracing::error!(error = %source, action, "failed to persist kardex movement");
                self.notifier.error(
                    "Error",
                    &format!("The kardex movement could not be {action}."),
                );
                let editing = submitting
                    .advance(ModalEvent::PersistFailed)
                    .unwrap_or_else(|_| submitting.clone());
                Transition::err(editing, RecorderError::Persistence(source))
            }
        }
    }

    /// Abandon the session without persisting anything.
    pub fn cancel(&self, view: &RecorderView) -> Transition<()> {
        match view.advance(ModalEvent::Cancel) {
            Ok(closed) => {
                self.emit(RecorderSignal::CloseRequested);
                Transition::ok(closed, ())
            }
            Err(e) => Transition::err(view.clone(), e),
        }
    }

    fn reject<T>(&self, validating: &RecorderView, error: RecorderError) -> Transition<T> {
        match validating.advance(ModalEvent::Rejected) {
            Ok(editing) => Transition::err(editing, error),
            Err(e) => Transition::err(validating.clone(), e),
        }
    }

    fn emit(&self, signal: RecorderSignal) {
        let signal_type = signal.signal_type();
        if let Err(err) = self.bus.publish(signal) {
            tracing::warn!(signal_type, error = %err, "failed to publish recorder signal");
        }
    }
}
