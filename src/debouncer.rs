//! Time based debouncing of the classified button.
//!
//! A ladder passes through intermediate voltages while contacts settle or while the
//! user slides from one button to another, so a single reading can land on the wrong
//! button. A candidate is only trusted once every reading for longer than the debounce
//! duration has mapped to it.

use embassy_time::{Duration, Instant};

/// Tracks how long the raw classification has stayed the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    duration: Duration,
    /// The button the most recent reading mapped to
    candidate: Option<usize>,
    /// When `candidate` first appeared
    since: Instant,
}

/// Returned by [Debouncer::debounce].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceResult {
    /// The raw classification for this reading
    pub candidate: Option<usize>,
    /// Has the candidate held for longer than the debounce duration?
    pub is_stable: bool,
    /// Did the candidate change on this reading, restarting the timer?
    pub is_changed: bool,
}

impl Debouncer {
    /// A debouncer whose candidate is "no button", seen since time zero.
    pub const fn new(duration: Duration) -> Self {
        Self {
            duration,
            candidate: None,
            since: Instant::from_ticks(0),
        }
    }

    /// Feeds in the classification of the reading taken at `now`.
    pub fn debounce(&mut self, candidate: Option<usize>, now: Instant) -> DebounceResult {
        let is_changed = candidate != self.candidate;
        if is_changed {
            trace!("debounce candidate {} -> {}", self.candidate, candidate);
            self.candidate = candidate;
            self.since = now;
        }

        DebounceResult {
            candidate,
            is_stable: now.saturating_duration_since(self.since) > self.duration,
            is_changed,
        }
    }

    pub fn candidate(&self) -> Option<usize> {
        self.candidate
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEBOUNCE: Duration = Duration::from_millis(20);

    #[test]
    fn stable_only_after_strictly_longer_than_duration() {
        let mut debouncer = Debouncer::new(DEBOUNCE);

        let first = debouncer.debounce(Some(1), Instant::from_millis(0));
        assert!(first.is_changed);
        assert!(!first.is_stable);

        assert!(!debouncer.debounce(Some(1), Instant::from_millis(10)).is_stable);
        assert!(!debouncer.debounce(Some(1), Instant::from_millis(20)).is_stable);

        let settled = debouncer.debounce(Some(1), Instant::from_millis(21));
        assert!(settled.is_stable);
        assert!(!settled.is_changed);
        assert_eq!(settled.candidate, Some(1));
    }

    #[test]
    fn change_restarts_timer() {
        let mut debouncer = Debouncer::new(DEBOUNCE);
        debouncer.debounce(Some(1), Instant::from_millis(0));
        debouncer.debounce(Some(1), Instant::from_millis(15));

        let glitch = debouncer.debounce(Some(2), Instant::from_millis(18));
        assert!(glitch.is_changed);
        assert!(!glitch.is_stable);

        debouncer.debounce(Some(1), Instant::from_millis(20));
        assert!(!debouncer.debounce(Some(1), Instant::from_millis(40)).is_stable);
        assert!(debouncer.debounce(Some(1), Instant::from_millis(41)).is_stable);
    }

    #[test]
    fn idle_candidate_is_stable_from_start() {
        let mut debouncer = Debouncer::new(DEBOUNCE);
        let result = debouncer.debounce(None, Instant::from_millis(30));
        assert!(!result.is_changed);
        assert!(result.is_stable);
        assert_eq!(debouncer.candidate(), None);
    }

    #[test]
    fn zero_duration_accepts_on_next_distinct_time() {
        let mut debouncer = Debouncer::new(Duration::from_ticks(0));
        assert!(!debouncer.debounce(Some(0), Instant::from_millis(5)).is_stable);
        assert!(debouncer.debounce(Some(0), Instant::from_millis(6)).is_stable);
    }
}
