//! Debounced function wrappers.
//!
//! [`Debouncer`] wraps a callback in a rate limiter backed by a dedicated
//! timer worker thread. Each wrapper owns its own state machine and
//! argument slot exclusively; independently-constructed wrappers share
//! nothing and make no ordering guarantees across each other.
//!
//! Within one wrapper, calls are totally ordered by arrival and the
//! trailing invocation always uses the arguments of the most recent call
//! before the quiet period elapsed.

use crate::application::ports::Clock;
use crate::domain::debounce::{DebounceState, TimerAction};
use crate::infrastructure::clock::SystemClock;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

const LOCK_EXPECT: &str = "debouncer mutex poisoned - a caller panicked while holding the lock";

/// Error returned when debouncer configuration validation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// The quiet period must be greater than zero
    ZeroWait,
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::ZeroWait => write!(f, "debounce wait must be greater than 0"),
        }
    }
}

impl std::error::Error for BuildError {}

struct Slot<A> {
    state: DebounceState,
    args: Option<A>,
    deadline: Option<Instant>,
    closed: bool,
}

struct Shared<A, R> {
    slot: Mutex<Slot<A>>,
    signal: Condvar,
    clock: Arc<dyn Clock>,
    callback: Box<dyn Fn(A) -> R + Send + Sync>,
}

impl<A, R> Shared<A, R> {
    fn lock(&self) -> MutexGuard<'_, Slot<A>> {
        self.slot.lock().expect(LOCK_EXPECT)
    }
}

/// A debounced function wrapper.
///
/// Calls through [`call`](Debouncer::call) are coalesced: the wrapped
/// callback runs once per quiet period of the configured wait, with the
/// arguments of the most recent call. In leading mode the callback runs
/// synchronously on the first call of a quiet period instead.
///
/// Dropping the wrapper cancels any pending invocation and joins the timer
/// worker.
///
/// # Example
/// ```no_run
/// use admin_utils::Debouncer;
/// use std::time::Duration;
///
/// let debounced = Debouncer::new(Duration::from_millis(200), |query: String| {
///     println!("searching for {query}");
/// })
/// .expect("non-zero wait");
///
/// // Rapid keystrokes produce a single search.
/// for q in ["r", "ru", "rus", "rust"] {
///     debounced.call(q.to_string());
/// }
/// ```
pub struct Debouncer<A, R = ()>
where
    A: Send + 'static,
    R: 'static,
{
    shared: Arc<Shared<A, R>>,
    worker: Option<JoinHandle<()>>,
}

impl<A, R> Debouncer<A, R>
where
    A: Send + 'static,
    R: 'static,
{
    /// Create a trailing-edge debouncer.
    ///
    /// # Errors
    /// [`BuildError::ZeroWait`] if `wait` is zero.
    pub fn new(
        wait: Duration,
        callback: impl Fn(A) -> R + Send + Sync + 'static,
    ) -> Result<Self, BuildError> {
        Self::builder(wait).build(callback)
    }

    /// Create a leading-edge debouncer (invoke on the first call of each
    /// quiet period).
    ///
    /// # Errors
    /// [`BuildError::ZeroWait`] if `wait` is zero.
    pub fn leading(
        wait: Duration,
        callback: impl Fn(A) -> R + Send + Sync + 'static,
    ) -> Result<Self, BuildError> {
        Self::builder(wait).with_leading(true).build(callback)
    }

    /// Start building a debouncer with the given quiet period.
    pub fn builder(wait: Duration) -> DebouncerBuilder {
        DebouncerBuilder::new(wait)
    }

    /// Request an invocation with `args`.
    ///
    /// Records the call time and arguments; arms the timer when none is
    /// pending. Returns `Some` with the callback's result only when the
    /// leading edge fired synchronously during this call; trailing
    /// invocations happen on the worker and their result is not observable
    /// here.
    pub fn call(&self, args: A) -> Option<R> {
        let mut slot = self.shared.lock();
        let now = self.shared.clock.now();
        let outcome = slot.state.on_call(now);
        if let Some(wait) = outcome.schedule {
            slot.deadline = Some(now + wait);
            tracing::trace!(wait_ms = wait.as_millis() as u64, "debounce timer armed");
            self.shared.signal.notify_one();
        }
        if outcome.invoke_now {
            slot.args = None;
            drop(slot);
            tracing::trace!("debounce leading edge firing");
            return Some((self.shared.callback)(args));
        }
        slot.args = Some(args);
        None
    }

    /// Invoke any pending call immediately and clear the timer.
    ///
    /// Returns the callback's result when something was pending.
    pub fn flush(&self) -> Option<R> {
        let mut slot = self.shared.lock();
        if !slot.state.is_pending() {
            return None;
        }
        slot.state.cancel();
        slot.deadline = None;
        let args = slot.args.take();
        drop(slot);
        tracing::debug!("debounce flushed");
        args.map(|args| (self.shared.callback)(args))
    }

    /// Drop any pending invocation without running it.
    pub fn cancel(&self) {
        let mut slot = self.shared.lock();
        slot.state.cancel();
        slot.deadline = None;
        slot.args = None;
        tracing::debug!("debounce cancelled");
    }

    /// Whether an invocation is currently pending.
    pub fn is_pending(&self) -> bool {
        self.shared.lock().state.is_pending()
    }
}

impl<A, R> Drop for Debouncer<A, R>
where
    A: Send + 'static,
    R: 'static,
{
    fn drop(&mut self) {
        {
            let mut slot = self.shared.lock();
            slot.closed = true;
            slot.args = None;
        }
        self.shared.signal.notify_one();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// Builder for [`Debouncer`].
#[derive(Debug, Clone)]
pub struct DebouncerBuilder {
    wait: Duration,
    leading: bool,
    clock: Arc<dyn Clock>,
}

impl DebouncerBuilder {
    fn new(wait: Duration) -> Self {
        Self {
            wait,
            leading: false,
            clock: Arc::new(SystemClock::new()),
        }
    }

    /// Invoke on the leading edge of each quiet period.
    pub fn with_leading(mut self, leading: bool) -> Self {
        self.leading = leading;
        self
    }

    /// Read call timestamps through `clock` instead of the system clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Build the debouncer and start its timer worker.
    ///
    /// # Errors
    /// [`BuildError::ZeroWait`] if the configured wait is zero.
    pub fn build<A, R>(
        self,
        callback: impl Fn(A) -> R + Send + Sync + 'static,
    ) -> Result<Debouncer<A, R>, BuildError>
    where
        A: Send + 'static,
        R: 'static,
    {
        if self.wait.is_zero() {
            return Err(BuildError::ZeroWait);
        }
        let shared = Arc::new(Shared {
            slot: Mutex::new(Slot {
                state: DebounceState::new(self.wait, self.leading),
                args: None,
                deadline: None,
                closed: false,
            }),
            signal: Condvar::new(),
            clock: self.clock,
            callback: Box::new(callback),
        });
        let worker = {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || run_timer(&shared))
        };
        Ok(Debouncer {
            shared,
            worker: Some(worker),
        })
    }
}

fn run_timer<A, R>(shared: &Shared<A, R>) {
    let mut slot = shared.lock();
    loop {
        if slot.closed {
            return;
        }
        let deadline = match slot.deadline {
            Some(deadline) => deadline,
            None => {
                slot = shared.signal.wait(slot).expect(LOCK_EXPECT);
                continue;
            }
        };
        let now = shared.clock.now();
        if now < deadline {
            let (guard, _) = shared
                .signal
                .wait_timeout(slot, deadline - now)
                .expect(LOCK_EXPECT);
            slot = guard;
            continue;
        }
        match slot.state.on_timer_fired(now) {
            TimerAction::Reschedule(remaining) => {
                slot.deadline = Some(now + remaining);
                tracing::trace!(
                    remaining_ms = remaining.as_millis() as u64,
                    "debounce timer rescheduled"
                );
            }
            TimerAction::Invoke => {
                slot.deadline = None;
                if let Some(args) = slot.args.take() {
                    drop(slot);
                    tracing::trace!("debounce quiet period elapsed, invoking");
                    let _ = (shared.callback)(args);
                    slot = shared.lock();
                }
            }
            TimerAction::Settle => {
                slot.deadline = None;
                slot.args = None;
            }
        }
    }
}

#[cfg(feature = "async")]
pub use self::async_impl::AsyncDebouncer;

#[cfg(feature = "async")]
mod async_impl {
    use super::BuildError;
    use crate::domain::debounce::{DebounceState, TimerAction};
    use std::sync::{Arc, Mutex, MutexGuard};
    use std::time::{Duration, Instant};

    struct AsyncSlot<A> {
        state: DebounceState,
        args: Option<A>,
        driver_active: bool,
    }

    struct AsyncInner<A> {
        slot: Mutex<AsyncSlot<A>>,
        callback: Box<dyn Fn(A) + Send + Sync>,
    }

    impl<A> AsyncInner<A> {
        fn lock(&self) -> MutexGuard<'_, AsyncSlot<A>> {
            self.slot.lock().expect(super::LOCK_EXPECT)
        }
    }

    /// Task-backed debounced wrapper for async contexts.
    ///
    /// Same coalescing contract as [`Debouncer`](super::Debouncer), driven
    /// by a tokio timer task spawned on demand instead of a worker thread.
    /// [`call`](AsyncDebouncer::call) must run inside a tokio runtime.
    pub struct AsyncDebouncer<A>
    where
        A: Send + 'static,
    {
        inner: Arc<AsyncInner<A>>,
        wait: Duration,
    }

    impl<A> AsyncDebouncer<A>
    where
        A: Send + 'static,
    {
        /// Create a trailing-edge async debouncer.
        ///
        /// # Errors
        /// [`BuildError::ZeroWait`] if `wait` is zero.
        pub fn new(
            wait: Duration,
            callback: impl Fn(A) + Send + Sync + 'static,
        ) -> Result<Self, BuildError> {
            if wait.is_zero() {
                return Err(BuildError::ZeroWait);
            }
            Ok(Self {
                inner: Arc::new(AsyncInner {
                    slot: Mutex::new(AsyncSlot {
                        state: DebounceState::new(wait, false),
                        args: None,
                        driver_active: false,
                    }),
                    callback: Box::new(callback),
                }),
                wait,
            })
        }

        /// Request an invocation with `args`.
        pub fn call(&self, args: A) {
            let mut slot = self.inner.lock();
            let outcome = slot.state.on_call(Instant::now());
            slot.args = Some(args);
            if outcome.schedule.is_some() && !slot.driver_active {
                slot.driver_active = true;
                drop(slot);
                let inner = Arc::clone(&self.inner);
                let delay = self.wait;
                tokio::spawn(async move { drive(inner, delay).await });
            }
        }

        /// Drop any pending invocation without running it.
        pub fn cancel(&self) {
            let mut slot = self.inner.lock();
            slot.state.cancel();
            slot.args = None;
        }

        /// Whether an invocation is currently pending.
        pub fn is_pending(&self) -> bool {
            self.inner.lock().state.is_pending()
        }
    }

    async fn drive<A>(inner: Arc<AsyncInner<A>>, mut delay: Duration)
    where
        A: Send + 'static,
    {
        loop {
            tokio::time::sleep(delay).await;
            let action = inner.lock().state.on_timer_fired(Instant::now());
            match action {
                TimerAction::Reschedule(remaining) => {
                    delay = remaining;
                }
                TimerAction::Invoke => {
                    let args = {
                        let mut slot = inner.lock();
                        slot.driver_active = false;
                        slot.args.take()
                    };
                    if let Some(args) = args {
                        tracing::trace!("debounce quiet period elapsed, invoking");
                        (inner.callback)(args);
                    }
                    return;
                }
                TimerAction::Settle => {
                    let mut slot = inner.lock();
                    slot.driver_active = false;
                    slot.args = None;
                    return;
                }
            }
        }
    }
}
