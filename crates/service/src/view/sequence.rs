use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic number handed out when a fetch starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn get(&self) -> u64 { self.0 }
}

/// Orders overlapping fetches so that a slow, older response can never
/// overwrite the result of a newer one.
///
/// Lock-free, so it can be shared between tasks behind an `Arc`.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: AtomicU64,
    applied: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self { Self::default() }

    pub fn issue(&self) -> FetchTicket {
        FetchTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Claim the right to apply the response for `ticket`. Returns false when
    /// a newer (or the same) ticket was already applied.
    pub fn try_apply(&self, ticket: FetchTicket) -> bool {
        self.applied.fetch_max(ticket.0, Ordering::SeqCst) < ticket.0
    }

    /// True when no fetch was started after `ticket`.
    pub fn is_latest(&self, ticket: FetchTicket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }

    pub fn last_applied(&self) -> Option<FetchTicket> {
        match self.applied.load(Ordering::SeqCst) {
            0 => None,
            n => Some(FetchTicket(n)),
        }
    }
}
