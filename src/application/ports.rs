//! Ports (interfaces) for the application layer.
//!
//! Infrastructure adapters implement these ports. Keeping the clock behind
//! a trait lets every time-dependent operation run against a controllable
//! test double instead of mocking the environment.

use chrono::{DateTime, Local};
use std::fmt::Debug;
use std::time::Instant;

/// Port for obtaining the current time.
///
/// Two views are exposed: a monotonic instant for elapsed-time math (the
/// debouncer) and local calendar time for formatting. Implementations must
/// keep the two advancing together.
pub trait Clock: Send + Sync + Debug {
    /// Get the current monotonic instant.
    fn now(&self) -> Instant;

    /// Get the current local calendar time.
    fn wall(&self) -> DateTime<Local>;
}
