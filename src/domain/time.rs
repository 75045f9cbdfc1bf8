//! Time normalization, bucketing, and formatting.
//!
//! Everything here is pure: functions that depend on the current time take
//! `now` explicitly. For a clock-bound surface see
//! [`TimeFormatter`](crate::application::times::TimeFormatter).
//!
//! The relative-time renderer keeps the two hard-coded locale strings of the
//! admin UI it serves (`刚刚` / `N分钟前` / `N小时前` / `1天前` and the
//! short calendar fallback). Localization beyond that is out of scope.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

static PATTERN_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([ymdhisa])\}").expect("token pattern is valid"));

const WEEKDAYS: [&str; 7] = ["日", "一", "二", "三", "四", "五", "六"];

const NINETY_DAYS_MS: i64 = 90 * 24 * 3600 * 1000;

/// A point in time as accepted at the module boundary.
///
/// Numeric values are epoch milliseconds, except where a contract
/// disambiguates 10-digit values as epoch seconds (see
/// [`format_relative`]). Text values may be a parseable date string or an
/// all-digit epoch string.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeValue {
    /// Epoch timestamp (milliseconds, or seconds when 10 digits long).
    Millis(i64),
    /// A date string or an all-digit epoch string.
    Text(String),
    /// An already-constructed local date-time.
    DateTime(DateTime<Local>),
}

impl From<i64> for TimeValue {
    fn from(value: i64) -> Self {
        TimeValue::Millis(value)
    }
}

impl From<&str> for TimeValue {
    fn from(value: &str) -> Self {
        TimeValue::Text(value.to_owned())
    }
}

impl From<String> for TimeValue {
    fn from(value: String) -> Self {
        TimeValue::Text(value)
    }
}

impl From<DateTime<Local>> for TimeValue {
    fn from(value: DateTime<Local>) -> Self {
        TimeValue::DateTime(value)
    }
}

/// Whether to zero-pad month and day in [`format_pattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Padding {
    /// Two-digit month, day, hour, minute, and second.
    #[default]
    Full,
    /// Month and day rendered without padding; the rest stays two-digit.
    BareMonthDay,
}

/// Coarseness bucket for relative-time rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeBucket {
    /// Less than 30 seconds ago.
    JustNow,
    /// Less than an hour ago; holds `ceil(diff / 60)`.
    Minutes(u64),
    /// Less than a day ago; holds `ceil(diff / 3600)`.
    Hours(u64),
    /// Between one and two days ago. Always rendered as exactly one day.
    OneDay,
    /// Two days or more: fall back to a calendar rendering.
    Calendar,
}

/// Classify an elapsed duration in seconds into a [`RelativeBucket`].
///
/// The first matching rule wins; negative diffs (future timestamps) land in
/// `JustNow`.
pub fn bucket(diff_secs: f64) -> RelativeBucket {
    if diff_secs < 30.0 {
        RelativeBucket::JustNow
    } else if diff_secs < 3600.0 {
        RelativeBucket::Minutes((diff_secs / 60.0).ceil() as u64)
    } else if diff_secs < 86_400.0 {
        RelativeBucket::Hours((diff_secs / 3600.0).ceil() as u64)
    } else if diff_secs < 172_800.0 {
        RelativeBucket::OneDay
    } else {
        RelativeBucket::Calendar
    }
}

/// Normalize a [`TimeValue`] to a local date-time.
///
/// Returns `None` for empty or unparseable input. Accepted text forms are
/// RFC 3339, `%Y-%m-%d %H:%M:%S`, `%Y/%m/%d %H:%M:%S`, `%Y-%m-%d`,
/// `%Y/%m/%d`, and all-digit epoch strings (10 digits are seconds,
/// anything else milliseconds).
pub fn normalize(value: &TimeValue) -> Option<DateTime<Local>> {
    match value {
        TimeValue::DateTime(dt) => Some(*dt),
        TimeValue::Millis(_) => epoch_millis(value).and_then(from_millis),
        TimeValue::Text(s) => {
            let text = s.trim();
            if text.is_empty() {
                return None;
            }
            if is_all_digits(text) {
                return epoch_millis(value).and_then(from_millis);
            }
            parse_text(text)
        }
    }
}

/// Format a temporal value as `YYYY-MM-DD HH:MM:SS`.
///
/// Month, day, hour, minute, and second are zero-padded to two digits; the
/// year is the full numeric year. Uses the local calendar fields of the
/// normalized date with no timezone conversion. `None`, empty text, and
/// unparseable input all render as the empty string.
///
/// # Example
/// ```
/// use admin_utils::{format_date, TimeValue};
///
/// assert_eq!(format_date(None), "");
/// assert_eq!(format_date(Some(&TimeValue::from(""))), "");
///
/// let stamp = TimeValue::from("2024-03-07 09:05:00");
/// assert_eq!(format_date(Some(&stamp)), "2024-03-07 09:05:00");
/// ```
pub fn format_date(value: Option<&TimeValue>) -> String {
    let value = match value {
        Some(v) => v,
        None => return String::new(),
    };
    match normalize(value) {
        Some(dt) => format!(
            "{}-{:02}-{:02} {:02}:{:02}:{:02}",
            dt.year(),
            dt.month(),
            dt.day(),
            dt.hour(),
            dt.minute(),
            dt.second()
        ),
        None => String::new(),
    }
}

/// Render a past timestamp relative to `now`.
///
/// A stringified value of exactly 10 digits is treated as epoch seconds,
/// everything else as epoch milliseconds. Values that are not
/// numeric-coercible render as the empty string.
///
/// The first matching bucket wins: `刚刚` under 30 seconds, minutes under an
/// hour, hours under a day, exactly `1天前` under two days. Older values use
/// `pattern` with [`format_pattern`] when supplied, otherwise the unpadded
/// short calendar form `M月D日H时M分`.
pub fn format_relative(value: &TimeValue, pattern: Option<&str>, now: DateTime<Local>) -> String {
    let ms = match relative_millis(value) {
        Some(ms) => ms,
        None => return String::new(),
    };
    let dt = match from_millis(ms) {
        Some(dt) => dt,
        None => return String::new(),
    };
    let diff = (now.timestamp_millis() - ms) as f64 / 1000.0;
    match bucket(diff) {
        RelativeBucket::JustNow => "刚刚".to_owned(),
        RelativeBucket::Minutes(n) => format!("{n}分钟前"),
        RelativeBucket::Hours(n) => format!("{n}小时前"),
        RelativeBucket::OneDay => "1天前".to_owned(),
        RelativeBucket::Calendar => match pattern {
            Some(p) => format_pattern(&dt, p, Padding::Full),
            None => format!(
                "{}月{}日{}时{}分",
                dt.month(),
                dt.day(),
                dt.hour(),
                dt.minute()
            ),
        },
    }
}

/// Substitute date tokens in `pattern`.
///
/// Recognized tokens: `{y}` full year, `{m}` month, `{d}` day, `{h}` hour,
/// `{i}` minute, `{s}` second, `{a}` Chinese weekday character (Sunday is
/// `日`). All but year and weekday are zero-padded to two digits unless
/// `Padding::BareMonthDay` is given, which leaves month and day unpadded.
///
/// # Example
/// ```
/// use admin_utils::{format_pattern, Padding};
/// use chrono::{Local, TimeZone};
///
/// let dt = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 0).unwrap();
/// assert_eq!(format_pattern(&dt, "{y}-{m}-{d}", Padding::Full), "2024-03-07");
/// assert_eq!(format_pattern(&dt, "{m}/{d} {h}:{i}", Padding::BareMonthDay), "3/7 09:05");
/// ```
pub fn format_pattern(dt: &DateTime<Local>, pattern: &str, padding: Padding) -> String {
    PATTERN_TOKEN
        .replace_all(pattern, |caps: &regex::Captures<'_>| {
            let key = &caps[1];
            match key {
                "y" => dt.year().to_string(),
                "a" => WEEKDAYS[dt.weekday().num_days_from_sunday() as usize].to_owned(),
                _ => {
                    let value = match key {
                        "m" => dt.month(),
                        "d" => dt.day(),
                        "h" => dt.hour(),
                        "i" => dt.minute(),
                        _ => dt.second(),
                    };
                    if padding == Padding::BareMonthDay && (key == "m" || key == "d") {
                        value.to_string()
                    } else {
                        format!("{value:02}")
                    }
                }
            }
        })
        .into_owned()
}

/// Epoch milliseconds ninety days before `now`.
///
/// The default lower bound used by date-range pickers.
pub fn ninety_day_window_start(now: &DateTime<Local>) -> i64 {
    now.timestamp_millis() - NINETY_DAYS_MS
}

/// Epoch milliseconds of the most recent local midnight.
///
/// Falls back to `now` itself when midnight does not exist in the local
/// timezone (DST gap).
pub fn start_of_today(now: &DateTime<Local>) -> i64 {
    let midnight = now.date_naive().and_time(NaiveTime::MIN);
    match midnight.and_local_timezone(Local) {
        chrono::LocalResult::Single(dt) | chrono::LocalResult::Ambiguous(dt, _) => {
            dt.timestamp_millis()
        }
        chrono::LocalResult::None => now.timestamp_millis(),
    }
}

/// Resolve the epoch milliseconds of a relative-time input.
///
/// Applies the 10-digit seconds disambiguation; non-numeric text is not
/// coercible and yields `None`.
fn relative_millis(value: &TimeValue) -> Option<i64> {
    match value {
        TimeValue::Millis(n) => {
            if digit_count(*n) == 10 {
                Some(n.saturating_mul(1000))
            } else {
                Some(*n)
            }
        }
        TimeValue::Text(s) => {
            let text = s.trim();
            if !is_all_digits(text) {
                return text.parse::<i64>().ok();
            }
            let n = text.parse::<i64>().ok()?;
            if text.len() == 10 {
                Some(n.saturating_mul(1000))
            } else {
                Some(n)
            }
        }
        TimeValue::DateTime(dt) => Some(dt.timestamp_millis()),
    }
}

fn epoch_millis(value: &TimeValue) -> Option<i64> {
    relative_millis(value)
}

/// Parse a textual date in the handful of shapes the admin UI emits.
fn parse_text(text: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Local));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return naive.and_local_timezone(Local).single();
        }
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return date.and_time(NaiveTime::MIN).and_local_timezone(Local).single();
        }
    }
    None
}

fn from_millis(ms: i64) -> Option<DateTime<Local>> {
    Local.timestamp_millis_opt(ms).single()
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn digit_count(n: i64) -> u32 {
    let mut n = n.unsigned_abs();
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}
