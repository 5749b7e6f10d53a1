/// A single-shot debounce deadline driven by the host clock.
///
/// Every [`SettleTimer::arm`] replaces the previous deadline, so at most one expiry is ever
/// pending. The owner cancels it on teardown; [`crate::WindowedList`] does so in `Drop`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettleTimer {
    delay_ms: u64,
    deadline_ms: Option<u64>,
}

impl SettleTimer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            deadline_ms: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Changes the delay used by the next `arm`. A pending deadline keeps its original expiry.
    pub fn set_delay_ms(&mut self, delay_ms: u64) {
        self.delay_ms = delay_ms;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline_ms.is_some()
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }

    /// (Re)starts the timer at `now_ms`.
    pub fn arm(&mut self, now_ms: u64) {
        self.deadline_ms = Some(now_ms.saturating_add(self.delay_ms));
    }

    /// Drops the pending deadline. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline_ms.take().is_some()
    }

    /// Returns `true` exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }
}
