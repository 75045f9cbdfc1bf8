//! Encoding and string transforms.
//!
//! These helpers operate on borrowed string slices and allocate only for
//! their results. The byte-length computation deliberately works in UTF-16
//! code-unit arithmetic so that callers feeding it data from a UI layer get
//! the exact byte count the string would occupy as UTF-8.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?\d+(\.\d+)?$").expect("number pattern is valid")
});

static WORD_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(^| )[a-z]").expect("word-start pattern is valid")
});

static SNAKE_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"_[a-z]").expect("snake-segment pattern is valid")
});

/// Number of bytes `s` occupies when encoded as UTF-8.
///
/// Computed from UTF-16 code units without encoding: every unit counts one
/// byte, units in `(0x7F, 0x7FF]` add one more, units in `(0x7FF, 0xFFFF]`
/// add two more, and a surrogate pair contributes exactly four bytes total.
///
/// # Example
/// ```
/// assert_eq!(admin_utils::byte_length("a"), 1);
/// assert_eq!(admin_utils::byte_length("é"), 2);
/// assert_eq!(admin_utils::byte_length("中"), 3);
/// assert_eq!(admin_utils::byte_length("😀"), 4);
/// ```
pub fn byte_length(s: &str) -> usize {
    let mut len = 0usize;
    let mut units = s.encode_utf16();
    while let Some(code) = units.next() {
        len += 1;
        if (0xD800..=0xDBFF).contains(&code) {
            // High surrogate: the paired low unit carries the extra bytes,
            // so the pair nets out at 2 units + 2 extras = 4 bytes.
            if units.next().is_some() {
                len += 3;
            }
        } else if code > 0x7F && code <= 0x7FF {
            len += 1;
        } else if code > 0x7FF {
            len += 2;
        }
    }
    len
}

/// Whether `s` is a plain decimal number string.
///
/// An optional leading sign, one or more digits, and an optional fractional
/// part. No exponent notation and no surrounding whitespace.
pub fn is_number_str(s: &str) -> bool {
    NUMBER.is_match(s)
}

/// Uppercase the first letter of every space-delimited word.
///
/// Only ASCII lowercase letters at the start of the string or directly after
/// a space character are affected.
pub fn title_case(s: &str) -> String {
    WORD_START
        .replace_all(s, |caps: &regex::Captures<'_>| caps[0].to_uppercase())
        .into_owned()
}

/// Convert `snake_case` to `camelCase`.
///
/// Removes each underscore followed by an ASCII lowercase letter and
/// uppercases that letter. Underscores followed by anything else are kept.
pub fn camel_case(s: &str) -> String {
    SNAKE_SEGMENT
        .replace_all(s, |caps: &regex::Captures<'_>| {
            caps[0][1..].to_uppercase()
        })
        .into_owned()
}

const BASE32_ALPHABET: &[u8; 32] = b"0123456789abcdefghijklmnopqrstuv";

/// Build a compact unique identifier from an epoch timestamp and a salt.
///
/// The salt's decimal digits are concatenated in front of the timestamp's,
/// the result is read as one integer, and that integer is rendered in
/// lowercase base 32 (digits then `a`..`v`). Deterministic: the same inputs
/// always yield the same identifier, and for a fixed salt distinct
/// timestamps yield distinct identifiers. A negative timestamp yields `"0"`.
///
/// For a salted-by-default source see
/// [`IdGenerator`](crate::application::ids::IdGenerator).
pub fn unique_string_from(epoch_millis: i64, salt: u32) -> String {
    let digits = format!("{salt}{epoch_millis}");
    let n: u128 = digits.parse().unwrap_or_default();
    to_base32(n)
}

fn to_base32(mut n: u128) -> String {
    if n == 0 {
        return "0".to_owned();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(BASE32_ALPHABET[(n % 32) as usize]);
        n /= 32;
    }
    out.into_iter().rev().map(char::from).collect()
}

/// Set-like membership over a comma-separated list of keys.
///
/// The stored keys are kept verbatim; when `expects_lowercase` is requested
/// only the *probe* is folded to lowercase before the lookup. Lists built
/// from uppercase keys therefore never match in folding mode, which matches
/// how call sites use this to validate already-lowercased identifiers.
///
/// # Example
/// ```
/// use admin_utils::MembershipSet;
///
/// let tags = MembershipSet::from_list("div,span,p", true);
/// assert!(tags.contains("DIV"));
/// assert!(!tags.contains("table"));
/// ```
#[derive(Debug, Clone)]
pub struct MembershipSet {
    keys: HashSet<String>,
    fold_probe: bool,
}

impl MembershipSet {
    /// Build a membership set from a comma-separated list.
    pub fn from_list(list: &str, expects_lowercase: bool) -> Self {
        Self {
            keys: list.split(',').map(str::to_owned).collect(),
            fold_probe: expects_lowercase,
        }
    }

    /// Whether `value` is a member of the list.
    pub fn contains(&self, value: &str) -> bool {
        if self.fold_probe {
            self.keys.contains(&value.to_lowercase())
        } else {
            self.keys.contains(value)
        }
    }
}
