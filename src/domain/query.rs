//! URL query string parsing and serialization.
//!
//! Two parsers with deliberately different contracts coexist:
//!
//! - [`parse_query`] is lenient. It scans whatever follows the last `?`
//!   (or the whole input when there is none), matches `key=value` tokens,
//!   decodes each token independently, and never fails: malformed percent
//!   escapes keep their raw text.
//! - [`parse_query_strict`] requires a literal `?`, decodes the whole query
//!   component once before splitting, and propagates decoding failures to
//!   the caller.
//!
//! Call sites depend on each parser's specific leniency, so the contracts
//! are kept distinct rather than unified.

use once_cell::sync::Lazy;
use percent_encoding::{percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Characters escaped with `encodeURIComponent` semantics: everything but
/// ASCII alphanumerics and `- _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

static PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^?&=]+)=([^?&=]*)").expect("pair pattern is valid"));

/// Error raised by the strict query parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The URL has no `?` and therefore no query component to decode.
    MissingQuery,
    /// A `%` escape is not followed by two hex digits.
    MalformedEscape {
        /// Byte offset of the offending `%` within the query component.
        position: usize,
    },
    /// The decoded bytes are not valid UTF-8.
    InvalidUtf8,
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::MissingQuery => write!(f, "URL has no query component"),
            QueryError::MalformedEscape { position } => {
                write!(f, "malformed percent escape at byte {position}")
            }
            QueryError::InvalidUtf8 => write!(f, "decoded query is not valid UTF-8"),
        }
    }
}

impl std::error::Error for QueryError {}

/// Mapping from query keys to values.
///
/// Values are `Option<String>`: a `None` value is kept in the map but
/// dropped on serialization, mirroring how the UI layer passes objects with
/// `undefined` members.
///
/// # Example
/// ```
/// use admin_utils::{serialize_query, QueryMap};
///
/// let mut map = QueryMap::new();
/// map.insert("a", None);
/// map.insert("b", "1".to_owned());
/// assert_eq!(serialize_query(&map), "b=1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryMap {
    entries: BTreeMap<String, Option<String>>,
}

impl QueryMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key. Later inserts for the same key overwrite earlier ones.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Option<String>>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Get a present value for `key`. Absent keys and `None` values both
    /// yield `None`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(|v| v.as_deref())
    }

    /// Whether `key` exists, regardless of its value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of keys, counting `None` values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no keys at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in the map's own (sorted) enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

/// Percent-encode a string component with `encodeURIComponent` semantics.
pub fn encode_component(s: &str) -> String {
    percent_encode(s.as_bytes(), COMPONENT).to_string()
}

/// Strictly percent-decode a string component.
///
/// Every `%` must be followed by two hex digits and the decoded byte
/// sequence must be valid UTF-8; anything else is an error, matching
/// `decodeURIComponent` failure behavior.
pub fn decode_component(s: &str) -> Result<String, QueryError> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = bytes.get(i + 1).and_then(|b| (*b as char).to_digit(16));
            let lo = bytes.get(i + 2).and_then(|b| (*b as char).to_digit(16));
            match (hi, lo) {
                (Some(hi), Some(lo)) => {
                    out.push((hi * 16 + lo) as u8);
                    i += 3;
                }
                _ => return Err(QueryError::MalformedEscape { position: i }),
            }
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).map_err(|_| QueryError::InvalidUtf8)
}

/// Serialize a [`QueryMap`] into a query string.
///
/// Entries with a `None` value are skipped; keys and values are
/// percent-encoded; pairs are joined with `&` in the map's own enumeration
/// order. An empty (or all-`None`) map serializes to `""`.
pub fn serialize_query(map: &QueryMap) -> String {
    let mut parts = Vec::with_capacity(map.len());
    for (key, value) in map.iter() {
        let value = match value {
            Some(v) => v,
            None => continue,
        };
        parts.push(format!(
            "{}={}",
            encode_component(key),
            encode_component(value)
        ));
    }
    parts.join("&")
}

/// Leniently parse the query component of `url`.
///
/// Takes the substring after the last `?` (the whole input when there is
/// none), matches `key=value` tokens over `[^?&=]` characters, and decodes
/// key and value per token. Tokens whose escapes are malformed keep their
/// raw text; later duplicate keys overwrite earlier ones. Never fails: a
/// missing or empty query section yields an empty map.
///
/// # Example
/// ```
/// use admin_utils::parse_query;
///
/// let map = parse_query("https://host/path?a=1&b=two%20words");
/// assert_eq!(map.get("a"), Some("1"));
/// assert_eq!(map.get("b"), Some("two words"));
/// ```
pub fn parse_query(url: &str) -> QueryMap {
    let search = match url.rfind('?') {
        Some(i) => &url[i + 1..],
        None => url,
    };
    let mut map = QueryMap::new();
    for caps in PAIR.captures_iter(search) {
        let key = decode_lenient(&caps[1]);
        let value = decode_lenient(&caps[2]);
        map.insert(key, value);
    }
    map
}

/// Strictly parse the query component of `url`.
///
/// Requires a literal `?`. The full query component is decoded once (not
/// per-token), `+` becomes a space, tokens split on `&`, and each token
/// splits on its first `=`; tokens without `=` are skipped. Decoding
/// failures propagate to the caller.
///
/// # Errors
/// [`QueryError::MissingQuery`] when the URL has no `?`;
/// [`QueryError::MalformedEscape`] / [`QueryError::InvalidUtf8`] when the
/// query component does not decode.
pub fn parse_query_strict(url: &str) -> Result<QueryMap, QueryError> {
    let (_, raw) = url.split_once('?').ok_or(QueryError::MissingQuery)?;
    let search = decode_component(raw)?.replace('+', " ");
    let mut map = QueryMap::new();
    if search.is_empty() {
        return Ok(map);
    }
    for token in search.split('&') {
        if let Some((name, value)) = token.split_once('=') {
            map.insert(name, value.to_owned());
        }
    }
    Ok(map)
}

fn decode_lenient(s: &str) -> String {
    decode_component(s).unwrap_or_else(|_| s.to_owned())
}
