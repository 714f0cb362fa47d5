//! One-slot deferred tick scheduling.
//!
//! The timer never runs its own loop. It arms a single deadline one period
//! ahead and the owning event loop asks whether that deadline has passed.

use std::time::{Duration, Instant};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);
/// Missed periods replayed one by one; a longer stall (suspend) is dropped.
pub const MAX_CATCH_UP_TICKS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Ticker {
    deadline: Option<Instant>,
    period: Duration,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self { deadline: None, period }
    }

    /// Schedule the next tick one period after `from`, replacing any pending one.
    pub fn arm(&mut self, from: Instant) {
        self.deadline = Some(from + self.period);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Disarms if the deadline has passed and returns the instant the next
    /// tick should be measured from: the deadline itself, or `now` once the
    /// backlog exceeds [`MAX_CATCH_UP_TICKS`].
    pub fn take_due(&mut self, now: Instant) -> Option<Instant> {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                if now.duration_since(deadline) > self.period * MAX_CATCH_UP_TICKS {
                    Some(now)
                } else {
                    Some(deadline)
                }
            }
            _ => None,
        }
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_is_due_until_armed() {
        let mut ticker = Ticker::default();
        let now = Instant::now();
        assert!(!ticker.is_armed());
        assert_eq!(ticker.take_due(now + Duration::from_secs(60)), None);
    }

    #[test]
    fn fires_once_after_one_period() {
        let mut ticker = Ticker::default();
        let start = Instant::now();
        ticker.arm(start);

        assert_eq!(ticker.take_due(start + Duration::from_millis(999)), None);
        assert_eq!(ticker.take_due(start + TICK_PERIOD), Some(start + TICK_PERIOD));
        assert!(!ticker.is_armed());
        assert_eq!(ticker.take_due(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn rearming_replaces_the_pending_deadline() {
        let mut ticker = Ticker::default();
        let start = Instant::now();
        ticker.arm(start);
        ticker.arm(start + Duration::from_millis(500));
        assert_eq!(ticker.deadline(), Some(start + Duration::from_millis(1500)));
    }

    #[test]
    fn long_stall_resumes_from_now() {
        let mut ticker = Ticker::default();
        let start = Instant::now();
        ticker.arm(start);

        let short = start + TICK_PERIOD * 3;
        assert_eq!(ticker.take_due(short), Some(start + TICK_PERIOD));

        ticker.arm(start);
        let woke = start + Duration::from_secs(3 * 60 * 60);
        assert_eq!(ticker.take_due(woke), Some(woke));
    }

    #[test]
    fn cancel_drops_an_in_flight_tick() {
        let mut ticker = Ticker::default();
        let start = Instant::now();
        ticker.arm(start);
        ticker.cancel();
        assert_eq!(ticker.take_due(start + Duration::from_secs(2)), None);
    }
}
