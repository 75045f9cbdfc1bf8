//! Mock clock for testing.

use crate::application::ports::Clock;
use chrono::{DateTime, Local};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Mock clock for testing.
///
/// Allows tests to control time progression explicitly, enabling
/// deterministic testing of time formatting and debounce timing. The
/// monotonic and wall views advance together.
///
/// # Examples
///
/// ```ignore
/// use admin_utils::infrastructure::mocks::MockClock;
/// use admin_utils::application::ports::Clock;
/// use chrono::Local;
/// use std::time::{Duration, Instant};
///
/// let start = Instant::now();
/// let clock = MockClock::new(start, Local::now());
///
/// // Time starts at the specified instant
/// assert_eq!(clock.now(), start);
///
/// // Advance time explicitly; both views move in lockstep
/// clock.advance(Duration::from_secs(10));
/// assert_eq!(clock.now(), start + Duration::from_secs(10));
/// ```
///
/// # Thread Safety
///
/// `MockClock` is thread-safe and can be cloned to share across threads.
/// All clones share the same underlying time value, so advancing time in
/// one clone affects all clones.
#[derive(Debug, Clone)]
pub struct MockClock {
    current: Arc<Mutex<MockTime>>,
}

#[derive(Debug, Clone, Copy)]
struct MockTime {
    instant: Instant,
    wall: DateTime<Local>,
}

impl MockClock {
    /// Create a mock clock starting at the given instant and wall time.
    pub fn new(instant: Instant, wall: DateTime<Local>) -> Self {
        Self {
            current: Arc::new(Mutex::new(MockTime { instant, wall })),
        }
    }

    /// Advance both clock views by a duration.
    pub fn advance(&self, duration: Duration) {
        let mut time = self
            .current
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock");
        time.instant += duration;
        time.wall += chrono::Duration::from_std(duration)
            .expect("advance duration fits in a chrono duration");
    }

    /// Set the wall view to a specific time, leaving the instant alone.
    pub fn set_wall(&self, wall: DateTime<Local>) {
        let mut time = self
            .current
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock");
        time.wall = wall;
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        self.current
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock")
            .instant
    }

    fn wall(&self) -> DateTime<Local> {
        self.current
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock")
            .wall
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_clock() {
        let start = Instant::now();
        let wall = Local::now();
        let clock = MockClock::new(start, wall);

        assert_eq!(clock.now(), start);
        assert_eq!(clock.wall(), wall);

        clock.advance(Duration::from_secs(10));
        assert_eq!(clock.now(), start + Duration::from_secs(10));
        assert_eq!(clock.wall(), wall + chrono::Duration::seconds(10));
    }

    #[test]
    fn test_mock_clock_clones_share_time() {
        let start = Instant::now();
        let clock = MockClock::new(start, Local::now());
        let other = clock.clone();

        other.advance(Duration::from_secs(5));
        assert_eq!(clock.now(), start + Duration::from_secs(5));
    }
}
