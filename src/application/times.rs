//! Clock-bound time formatting surface.
//!
//! The pure formatting functions in [`crate::domain::time`] take `now`
//! explicitly; this wrapper binds them to a [`Clock`] so UI call sites can
//! format against the real wall clock without threading it through.

use crate::application::ports::Clock;
use crate::domain::time::{self, TimeValue};
use std::sync::Arc;

/// Formats temporal values against an injected clock.
#[derive(Debug, Clone)]
pub struct TimeFormatter {
    clock: Arc<dyn Clock>,
}

impl TimeFormatter {
    /// Create a formatter reading time through `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Format as `YYYY-MM-DD HH:MM:SS`; see [`time::format_date`].
    pub fn format_date(&self, value: Option<&TimeValue>) -> String {
        time::format_date(value)
    }

    /// Render relative to the clock's current wall time; see
    /// [`time::format_relative`].
    pub fn format_relative(&self, value: &TimeValue, pattern: Option<&str>) -> String {
        time::format_relative(value, pattern, self.clock.wall())
    }

    /// Epoch milliseconds ninety days ago.
    pub fn ninety_day_window_start(&self) -> i64 {
        time::ninety_day_window_start(&self.clock.wall())
    }

    /// Epoch milliseconds of the most recent local midnight.
    pub fn start_of_today(&self) -> i64 {
        time::start_of_today(&self.clock.wall())
    }
}
