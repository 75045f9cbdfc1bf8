//! Debounce timer state machine.
//!
//! [`DebounceState`] is the pure core of the debouncer: it owns the wait
//! duration, the leading-edge flag, the pending-timer flag, and the instant
//! of the most recent call. Drivers (a worker thread or an async task) feed
//! it call and timer events and act on the returned decisions, so the timing
//! logic is testable with explicit instants and no real timers.

use std::time::{Duration, Instant};

/// Decision returned for each call request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallOutcome {
    /// Invoke the wrapped function synchronously (leading edge).
    pub invoke_now: bool,
    /// Arm a timer for this duration; `None` when one is already pending.
    pub schedule: Option<Duration>,
}

/// Decision returned when the armed timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// A newer call arrived after the timer was armed; re-arm for the
    /// remaining quiet period.
    Reschedule(Duration),
    /// The quiet period elapsed; invoke with the last captured arguments.
    Invoke,
    /// The quiet period elapsed but the leading edge already fired; just
    /// clear the pending state.
    Settle,
}

/// State machine for one debounced wrapper instance.
///
/// Calls are totally ordered by the instants the driver passes in. The
/// machine never reads a clock itself.
///
/// # Example
/// ```
/// use admin_utils::{DebounceState, TimerAction};
/// use std::time::{Duration, Instant};
///
/// let wait = Duration::from_millis(100);
/// let mut state = DebounceState::new(wait, false);
/// let t0 = Instant::now();
///
/// let first = state.on_call(t0);
/// assert_eq!(first.schedule, Some(wait));
///
/// // A second call before the timer fires re-arms nothing...
/// let again = state.on_call(t0 + Duration::from_millis(50));
/// assert_eq!(again.schedule, None);
///
/// // ...but shifts the quiet period: the timer reschedules for the rest.
/// let action = state.on_timer_fired(t0 + wait);
/// assert_eq!(action, TimerAction::Reschedule(Duration::from_millis(50)));
/// ```
#[derive(Debug, Clone)]
pub struct DebounceState {
    wait: Duration,
    leading: bool,
    pending: bool,
    last_call: Option<Instant>,
}

impl DebounceState {
    /// Create a state machine with the given quiet period.
    ///
    /// With `leading` set, the wrapped function fires synchronously on the
    /// first call of each quiet period instead of after it.
    pub fn new(wait: Duration, leading: bool) -> Self {
        Self {
            wait,
            leading,
            pending: false,
            last_call: None,
        }
    }

    /// The configured quiet period.
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Whether a timer is currently pending.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Record a call request at `now`.
    pub fn on_call(&mut self, now: Instant) -> CallOutcome {
        let arm = !self.pending;
        self.last_call = Some(now);
        self.pending = true;
        CallOutcome {
            invoke_now: self.leading && arm,
            schedule: arm.then_some(self.wait),
        }
    }

    /// Handle the armed timer firing at `now`.
    ///
    /// Recomputes the elapsed time since the last recorded call: if a newer
    /// call arrived after the timer was armed, the timer must be re-armed
    /// for the remainder; otherwise the pending state clears and the
    /// trailing invocation (if any) is due.
    pub fn on_timer_fired(&mut self, now: Instant) -> TimerAction {
        let last = match self.last_call {
            Some(t) => t,
            None => {
                self.pending = false;
                return TimerAction::Settle;
            }
        };
        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.wait {
            TimerAction::Reschedule(self.wait - elapsed)
        } else {
            self.pending = false;
            if self.leading {
                TimerAction::Settle
            } else {
                TimerAction::Invoke
            }
        }
    }

    /// Drop the pending timer without invoking.
    pub fn cancel(&mut self) {
        self.pending = false;
    }
}
