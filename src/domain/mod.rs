//! Domain layer - pure utility logic with no external dependencies.
//!
//! This layer contains the core contracts of the utility module:
//! - Encoding and string transforms
//! - Time normalization, bucketing, and formatting
//! - Query string parsing and serialization
//! - Recursive value merge, clone, and dedup
//! - The debounce timer state machine
//!
//! All functions here are pure: the current time and the current URL are
//! explicit arguments, never ambient reads.

pub mod debounce;
pub mod query;
pub mod text;
pub mod time;
pub mod value;
