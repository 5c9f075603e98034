//! Event publishing/subscription abstraction (mechanics only).
//!
//! The bus is intentionally lightweight:
//!
//! - **Transport-agnostic**: in-memory channels today, anything else tomorrow
//! - **Broadcast**: every subscriber gets its own copy of each message
//! - **No persistence**: a subscriber only sees messages published after it subscribed

use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvError, RecvTimeoutError, TryRecvError};
use std::time::Duration;

/// A subscription to a signal stream.
///
/// ```ignore
/// let subscription = bus.subscribe();
/// while let Ok(signal) = subscription.try_recv() {
///     handle(signal);
/// }
/// ```
///
/// Subscriptions are meant for a single consumer. Messages arrive in publish
/// order for a single publisher.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Drain every message that is already queued, without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Domain-agnostic pub/sub abstraction.
///
/// `publish()` can fail (e.g. poisoned lock, broken transport); failures are
/// surfaced to the caller, which decides whether they matter. Implementations
/// must be `Send + Sync` so a bus can be shared behind an `Arc`.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + core::fmt::Display + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
