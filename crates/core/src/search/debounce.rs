//! Trailing-edge debounce.
//!
//! A value becomes ready once the quiet period has elapsed since the last
//! push. A later push replaces the pending value and restarts the window.
//! Time is passed in by the caller so the state machine stays clock-free.

use std::time::{Duration, Instant};

/// Quiet period used by the menu search box.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Debouncer
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet period.
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// The configured quiet period.
    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Replace the pending value and restart the window at `now`.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// When the pending value becomes ready, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending
            .as_ref()
            .map(|(_, pushed_at)| *pushed_at + self.quiet)
    }

    /// Whether a value is waiting for its quiet period.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value if its quiet period has elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let ready = self.deadline().is_some_and(|deadline| now >= deadline);

        if ready {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    /// Drop the pending value.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn value_is_held_during_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();

        debouncer.push("b", start);

        assert_eq!(debouncer.poll(start + 499 * MS), None);
        assert!(debouncer.is_pending());
    }

    #[test]
    fn value_is_released_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();

        debouncer.push("bò", start);

        assert_eq!(debouncer.poll(start + 500 * MS), Some("bò"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + 1_000 * MS), None);
    }

    #[test]
    fn later_push_restarts_window_and_replaces_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();

        debouncer.push("b", start);
        debouncer.push("bò", start + 300 * MS);

        assert_eq!(debouncer.poll(start + 600 * MS), None);
        assert_eq!(debouncer.deadline(), Some(start + 800 * MS));
        assert_eq!(debouncer.poll(start + 800 * MS), Some("bò"));
    }

    #[test]
    fn cancel_drops_pending_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));

        debouncer.push(1, start);

        assert_eq!(debouncer.cancel(), Some(1));
        assert_eq!(debouncer.poll(start + Duration::from_secs(1)), None);
        assert_eq!(debouncer.quiet_period(), Duration::from_millis(100));
    }
}
