// ============================================================================
// REQUEST SEQUENCER - Latest-wins guard for overlapping list fetches
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

/// Monotonic ticket counter. A response may only be applied while its
/// ticket is still the last one issued.
#[derive(Clone, Debug, Default)]
pub struct RequestSequencer {
    latest: Rc<Cell<u64>>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new request, superseding all earlier ones
    pub fn issue(&self) -> u64 {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        next
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.get() == ticket
    }

    /// Invalidate every outstanding ticket (logout)
    pub fn invalidate(&self) {
        self.issue();
    }
}
