//! Virtual clock.

/// A simulated millisecond clock.
///
/// Time only moves when the scheduler advances it, and it never moves
/// backwards.
///
/// # Examples
///
/// ```
/// use async_runtime::VirtualClock;
///
/// let mut clock = VirtualClock::new(0);
/// clock.advance_by(500);
/// clock.advance_to(200);
/// assert_eq!(clock.now_ms(), 500);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VirtualClock {
    now_ms: u64,
}

impl VirtualClock {
    /// Creates a clock reading `start_ms`.
    pub fn new(start_ms: u64) -> Self {
        Self { now_ms: start_ms }
    }

    /// Current virtual time.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Moves the clock forward by `ms`, saturating at `u64::MAX`.
    pub fn advance_by(&mut self, ms: u64) {
        self.now_ms = self.now_ms.saturating_add(ms);
    }

    /// Moves the clock to `target_ms` if that is later than now.
    pub fn advance_to(&mut self, target_ms: u64) {
        self.now_ms = self.now_ms.max(target_ms);
    }
}
