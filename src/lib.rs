//! # admin-utils
//!
//! Text, time, URL, and object-manipulation utilities for admin front-ends.
//!
//! This crate is the shared utility layer of an administrative UI: the
//! routines every view reaches for when it renders a timestamp, builds a
//! query string, measures an input, merges configuration, or rate-limits a
//! handler. There is no network behavior and no persistence here, just
//! small, precisely-specified contracts.
//!
//! ## Quick Start
//!
//! ```rust
//! use admin_utils::{byte_length, format_date, parse_query, serialize_query, QueryMap, TimeValue};
//!
//! // Absolute timestamps render as YYYY-MM-DD HH:MM:SS.
//! let stamp = TimeValue::from("2024-03-07 09:05:00");
//! assert_eq!(format_date(Some(&stamp)), "2024-03-07 09:05:00");
//!
//! // Query strings round-trip through QueryMap.
//! let mut map = QueryMap::new();
//! map.insert("page", "2".to_owned());
//! map.insert("draft", None);
//! let qs = serialize_query(&map);
//! assert_eq!(qs, "page=2");
//! assert_eq!(parse_query(&format!("?{qs}")).get("page"), Some("2"));
//!
//! // UTF-8 byte lengths without encoding.
//! assert_eq!(byte_length("中文"), 6);
//! ```
//!
//! ## Debouncing
//!
//! [`Debouncer`] wraps a function in a timer-backed rate limiter: rapid
//! calls coalesce into one invocation after a quiet period, carrying the
//! arguments of the most recent call.
//!
//! ```rust,no_run
//! use admin_utils::Debouncer;
//! use std::time::Duration;
//!
//! let search = Debouncer::new(Duration::from_millis(200), |query: String| {
//!     println!("searching for {query}");
//! })
//! .expect("non-zero wait");
//!
//! for q in ["r", "ru", "rust"] {
//!     search.call(q.to_string());
//! }
//! // One search for "rust" runs ~200ms after the last keystroke.
//! ```
//!
//! An `AsyncDebouncer` driven by tokio timers is available behind the
//! `async` feature.
//!
//! ## Structured values
//!
//! The recursive object utilities operate on [`serde_json::Value`], so the
//! merge/clone walks pattern-match on a closed set of shapes (primitive,
//! sequence, mapping):
//!
//! ```rust
//! use admin_utils::{deep_clone, object_merge, unique};
//! use serde_json::json;
//!
//! let merged = object_merge(json!({"a": {"b": 1, "c": 2}}), &json!({"a": {"b": 5}}));
//! assert_eq!(merged, json!({"a": {"b": 5, "c": 2}}));
//!
//! let clone = deep_clone(&merged).expect("structural input");
//! assert_eq!(clone, merged);
//!
//! assert!(deep_clone(&json!(0)).is_err());
//! ```
//!
//! ## Clock injection
//!
//! Nothing in the domain layer reads the environment. Operations that need
//! the current time take it explicitly or go through the
//! [`Clock`](application::ports::Clock) port, with
//! [`SystemClock`](infrastructure::clock::SystemClock) in production and a
//! `MockClock` (feature `test-helpers`) in tests:
//!
//! ```rust
//! use admin_utils::{SystemClock, TimeFormatter, TimeValue};
//! use std::sync::Arc;
//!
//! let formatter = TimeFormatter::new(Arc::new(SystemClock::new()));
//! let just_now = TimeValue::Millis(chrono::Local::now().timestamp_millis());
//! assert_eq!(formatter.format_relative(&just_now, None), "刚刚");
//! ```
//!
//! ## Error handling
//!
//! Most operations silently default on bad input (an empty string, map, or
//! vec) because a degenerate rendered value beats a crashed view. The
//! exceptions fail loudly and are typed: [`CloneError`] for non-structural
//! clone arguments, [`QueryError`] for the strict query parser, and
//! [`BuildError`] for invalid debouncer configuration.

// Domain layer - pure utility logic
pub mod domain;

// Application layer - orchestration
pub mod application;

// Infrastructure layer - external adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    debounce::{CallOutcome, DebounceState, TimerAction},
    query::{
        decode_component, encode_component, parse_query, parse_query_strict, serialize_query,
        QueryError, QueryMap,
    },
    text::{byte_length, camel_case, is_number_str, title_case, unique_string_from, MembershipSet},
    time::{
        bucket, format_date, format_pattern, format_relative, ninety_day_window_start,
        start_of_today, Padding, RelativeBucket, TimeValue,
    },
    value::{compact, deep_clone, is_truthy, object_merge, unique, CloneError},
};

pub use application::{
    debounce::{BuildError, Debouncer, DebouncerBuilder},
    ids::IdGenerator,
    ports::Clock,
    times::TimeFormatter,
};

#[cfg(feature = "async")]
pub use application::debounce::AsyncDebouncer;

pub use infrastructure::{
    clock::SystemClock,
    dom::{add_class, has_class, remove_class, toggle_class, ClassedElement},
};

#[cfg(feature = "html")]
pub use infrastructure::dom::html_to_text;
