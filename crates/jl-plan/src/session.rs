//! Latest-request-wins gate for interactive callers.
//!
//! A UI may fire a new plan request before the previous one finishes.  Each
//! request takes a ticket; when its result comes back the caller offers it to
//! the gate, which drops it unless no newer ticket has been issued since.

use std::sync::atomic::{AtomicU64, Ordering};

use jl_core::TicketId;

#[derive(Debug, Default)]
pub struct SessionGate {
    latest: AtomicU64,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket newer than every ticket issued before it.
    pub fn issue(&self) -> TicketId {
        TicketId(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// The most recently issued ticket, or `TicketId(0)` if none.
    pub fn current(&self) -> TicketId {
        TicketId(self.latest.load(Ordering::Acquire))
    }

    pub fn is_current(&self, ticket: TicketId) -> bool {
        self.current() == ticket
    }

    /// Invalidate every outstanding ticket.
    pub fn cancel(&self) {
        self.latest.fetch_add(1, Ordering::AcqRel);
    }

    /// Return `value` if `ticket` is still the latest, otherwise drop it.
    pub fn accept<T>(&self, ticket: TicketId, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            tracing::debug!(%ticket, current = %self.current(), "stale plan discarded");
            None
        }
    }
}
