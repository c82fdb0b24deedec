//! Timer Manager for pwcheck.
//!
//! Tracks the single pending timer of one kind (debounce, copy-label
//! revert) by ticket. Arming a new timer supersedes the old one, so an
//! expiry carrying an old ticket is ignored even if the runtime could
//! not abort it in time.

/// Trait defining single-slot timer bookkeeping.
pub trait TimerManagerTrait {
    fn arm(&mut self) -> u64;
    fn cancel(&mut self) -> bool;
    fn expire(&mut self, ticket: u64) -> bool;
    fn is_pending(&self) -> bool;
}

/// One timer slot; tickets increase monotonically for the life of the slot.
#[derive(Debug, Default)]
pub struct TimerManager {
    next_ticket: u64,
    pending: Option<u64>,
}

impl TimerManager {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimerManagerTrait for TimerManager {
    /// Arms the slot and returns the ticket the expiry must carry.
    fn arm(&mut self) -> u64 {
        self.next_ticket += 1;
        self.pending = Some(self.next_ticket);
        self.next_ticket
    }

    /// Cancels the pending timer. Returns whether one was pending.
    fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Consumes the pending timer if `ticket` is the live one.
    fn expire(&mut self, ticket: u64) -> bool {
        if self.pending == Some(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
