//! Best-effort coercion and the zero-value rule
//!
//! Every typed read funnels through [`best_effort`]: a value that does not
//! convert becomes the type's zero value, never an error.
//! [`ZeroValue`] supplies that zero value and the emptiness test the
//! `*_default` accessors use to decide when to hand back the caller's
//! fallback. A value explicitly set to zero is indistinguishable from an
//! absent one.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::trace;

use crate::duration::parse_duration;
use crate::tree::{Map, Value};

/// Conversion from a stored configuration value.
pub trait FromConfigValue: Sized {
    /// `None` when the value cannot represent `Self`.
    fn from_config_value(value: &Value) -> Option<Self>;
}

/// Zero value of a type and the emptiness rule used to swap in fallbacks.
pub trait ZeroValue: Sized {
    fn zero() -> Self;

    fn is_zero(&self) -> bool;
}

/// Resolve a conversion result, substituting the zero value on failure.
pub fn best_effort<T: ZeroValue>(key: &str, converted: Option<T>) -> T {
    converted.unwrap_or_else(|| {
        trace!(key, "value did not coerce, using zero value");
        T::zero()
    })
}

/// Coerce an optional stored value. Absent values are zero without logging.
pub fn coerce<T: FromConfigValue + ZeroValue>(key: &str, value: Option<&Value>) -> T {
    match value {
        Some(value) => best_effort(key, T::from_config_value(value)),
        None => T::zero(),
    }
}

/// Return `value` unless it is zero, in which case return `fallback`.
pub fn or_fallback<T: ZeroValue>(value: T, fallback: T) -> T {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

/// Boolean tokens: `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

const RADIX_PREFIXES: &[(&str, u32)] = &[
    ("0x", 16),
    ("0X", 16),
    ("0o", 8),
    ("0O", 8),
    ("0b", 2),
    ("0B", 2),
];

/// Integer text with an optional `0x`, `0o` or `0b` prefix after the sign.
fn parse_radix(text: &str) -> Option<i128> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (digits, radix) = RADIX_PREFIXES
        .iter()
        .find_map(|(prefix, radix)| unsigned.strip_prefix(prefix).map(|rest| (rest, *radix)))?;
    if digits.starts_with(['+', '-']) {
        return None;
    }
    let n = i128::from_str_radix(digits, radix).ok()?;
    Some(if negative { -n } else { n })
}

fn parse_integer(text: &str) -> Option<i128> {
    let text = text.trim();
    if let Some(n) = parse_radix(text) {
        return Some(n);
    }
    if let Ok(n) = text.parse::<i128>() {
        return Some(n);
    }
    // "5.0" and "5." read as integers, "5.5" does not.
    let (whole, fraction) = text.split_once('.')?;
    if fraction.bytes().all(|b| b == b'0') {
        whole.parse::<i128>().ok()
    } else {
        None
    }
}

fn integer_of(value: &Value) -> Option<i128> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from))
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i128)),
        Value::String(s) => parse_integer(s),
        Value::Bool(b) => Some(i128::from(*b)),
        _ => None,
    }
}

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromConfigValue for $ty {
                fn from_config_value(value: &Value) -> Option<Self> {
                    integer_of(value).and_then(|n| <$ty>::try_from(n).ok())
                }
            }

            impl ZeroValue for $ty {
                fn zero() -> Self {
                    0
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

impl_integer!(i32, i64, isize, u32, u64, usize);

impl FromConfigValue for f64 {
    fn from_config_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }
}

impl ZeroValue for f64 {
    fn zero() -> Self {
        0.0
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }
}

impl FromConfigValue for bool {
    fn from_config_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_f64().map(|f| f != 0.0),
            Value::String(s) => parse_bool(s.trim()),
            _ => None,
        }
    }
}

impl ZeroValue for bool {
    fn zero() -> Self {
        false
    }

    fn is_zero(&self) -> bool {
        !*self
    }
}

impl FromConfigValue for String {
    fn from_config_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            // Floats print in shortest form without an exponent, so 7.0 is "7".
            Value::Number(n) => Some(match n.as_f64() {
                Some(f) if n.is_f64() => f.to_string(),
                _ => n.to_string(),
            }),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null => Some(String::new()),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl ZeroValue for String {
    fn zero() -> Self {
        String::new()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

const NAIVE_DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const ZONED_DATETIME_LAYOUTS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f %z", "%Y-%m-%dT%H:%M:%S%.f%z"];

/// Parse RFC 3339, RFC 2822 and a few common layouts. Zone-less times are UTC.
pub fn parse_time(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for layout in ZONED_DATETIME_LAYOUTS {
        if let Ok(dt) = DateTime::parse_from_str(text, layout) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for layout in NAIVE_DATETIME_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, layout) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl FromConfigValue for DateTime<Utc> {
    fn from_config_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => parse_time(s),
            Value::Number(n) => n
                .as_i64()
                .and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
            _ => None,
        }
    }
}

/// Seconds between 0001-01-01T00:00:00Z and the UNIX epoch.
const ZERO_TIME_BEFORE_EPOCH_SECS: i64 = 62_135_596_800;

/// The zero time, 0001-01-01T00:00:00Z. The UNIX epoch is an ordinary time.
pub fn zero_time() -> DateTime<Utc> {
    DateTime::<Utc>::default() - chrono::Duration::seconds(ZERO_TIME_BEFORE_EPOCH_SECS)
}

impl ZeroValue for DateTime<Utc> {
    fn zero() -> Self {
        zero_time()
    }

    fn is_zero(&self) -> bool {
        *self == zero_time()
    }
}

impl FromConfigValue for Duration {
    fn from_config_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => {
                let s = s.trim();
                // Unit-less text counts nanoseconds.
                if s.contains(|c: char| "nsuµμmh".contains(c)) {
                    parse_duration(s)
                } else {
                    parse_duration(&format!("{s}ns"))
                }
            }
            Value::Number(n) => n
                .as_u64()
                .map(Duration::from_nanos)
                .or_else(|| {
                    n.as_f64()
                        .filter(|f| f.is_finite() && *f >= 0.0)
                        .map(|f| Duration::from_nanos(f.trunc() as u64))
                }),
            _ => None,
        }
    }
}

impl ZeroValue for Duration {
    fn zero() -> Self {
        Duration::ZERO
    }

    fn is_zero(&self) -> bool {
        Duration::is_zero(self)
    }
}

/// Integer sequences convert only when every element does.
impl FromConfigValue for Vec<i64> {
    fn from_config_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => items.iter().map(i64::from_config_value).collect(),
            _ => None,
        }
    }
}

fn string_or_empty(value: &Value) -> String {
    String::from_config_value(value).unwrap_or_default()
}

/// Elements that are not scalars render as empty strings. A string value is
/// split on whitespace.
impl FromConfigValue for Vec<String> {
    fn from_config_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(items.iter().map(string_or_empty).collect()),
            Value::String(s) => Some(s.split_whitespace().map(str::to_string).collect()),
            _ => None,
        }
    }
}

impl<T> ZeroValue for Vec<T> {
    fn zero() -> Self {
        Vec::new()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

/// Mappings convert as-is; a string is read as a JSON object.
impl FromConfigValue for Map {
    fn from_config_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(map.clone()),
            Value::String(s) => serde_json::from_str(s).ok(),
            _ => None,
        }
    }
}

impl ZeroValue for Map {
    fn zero() -> Self {
        Map::new()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl FromConfigValue for HashMap<String, String> {
    fn from_config_value(value: &Value) -> Option<Self> {
        let map = Map::from_config_value(value)?;
        Some(
            map.iter()
                .map(|(key, value)| (key.clone(), string_or_empty(value)))
                .collect(),
        )
    }
}

impl FromConfigValue for HashMap<String, Vec<String>> {
    fn from_config_value(value: &Value) -> Option<Self> {
        let map = Map::from_config_value(value)?;
        Some(
            map.iter()
                .map(|(key, value)| {
                    let items = match value {
                        Value::Array(items) => items.iter().map(string_or_empty).collect(),
                        other => vec![string_or_empty(other)],
                    };
                    (key.clone(), items)
                })
                .collect(),
        )
    }
}

impl<V> ZeroValue for HashMap<String, V> {
    fn zero() -> Self {
        HashMap::new()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}
