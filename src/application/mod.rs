//! Application layer - orchestration of the pure utility logic.
//!
//! This layer binds the domain contracts to runtime concerns:
//! - The clock port that time-dependent operations read through
//! - The clock-bound time formatting surface
//! - The clock-bound unique identifier generator
//! - The debounced wrapper that drives the timer state machine
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters implement, keeping it independent from wall-clock and timer
//! details.

pub mod debounce;
pub mod ids;
pub mod ports;
pub mod times;
