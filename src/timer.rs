use std::time::Duration;

/// A deferred "clear the busy flag" callback, tagged with the move that armed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingClear {
    pub move_id: u64,
    pub due: Duration,
}

/// Deferred callbacks for the cool-down. Nothing runs by itself: the owner
/// calls `take_due` from its event loop (once per frame, or after each input).
#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: Vec<PendingClear>, // sorted by `due`, ties keep insertion order
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, move_id: u64, due: Duration) {
        let at = self.pending.partition_point(|p| p.due <= due);
        self.pending.insert(at, PendingClear { move_id, due });
    }

    /// Removes and returns every callback due at or before `now`, oldest first.
    pub fn take_due(&mut self, now: Duration) -> Vec<PendingClear> {
        let split = self.pending.partition_point(|p| p.due <= now);
        self.pending.drain(..split).collect()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.pending.first().map(|p| p.due)
    }

    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        cancelled
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
