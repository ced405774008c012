//! Record keys and deduplication identities
//!
//! Two notions of "same key" live here:
//!
//! - [`RecordKey`]: the canonical string a key becomes when it is stored in a
//!   JSON record. Numbers are rendered the way JavaScript renders property
//!   keys, so `2`, `2.0` and `"2"` all land on the key `"2"`. The dynamic
//!   operations keep this collision on purpose. Arrays and objects used as
//!   keys render as compact JSON (`[1,2]`, `{"a":1}`), not as joined or
//!   placeholder text.
//! - [`DedupKey`]: the hashable identity used by default-equality dedup.
//!   Floats follow SameValueZero: every NaN equals every other NaN and
//!   `-0.0` equals `0.0`.

use std::fmt;
use std::hash::Hash;

use serde_json::{Map, Value};

/// Canonical key of a JSON record entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey(String);

impl RecordKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordKey {
    fn from(s: &str) -> Self {
        RecordKey(s.to_string())
    }
}

impl From<String> for RecordKey {
    fn from(s: String) -> Self {
        RecordKey(s)
    }
}

impl From<bool> for RecordKey {
    fn from(b: bool) -> Self {
        RecordKey(b.to_string())
    }
}

impl From<char> for RecordKey {
    fn from(c: char) -> Self {
        RecordKey(c.to_string())
    }
}

impl From<f64> for RecordKey {
    fn from(n: f64) -> Self {
        RecordKey(number_key(n))
    }
}

impl From<f32> for RecordKey {
    fn from(n: f32) -> Self {
        RecordKey(number_key(f64::from(n)))
    }
}

macro_rules! record_key_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for RecordKey {
                fn from(n: $t) -> Self {
                    RecordKey(n.to_string())
                }
            }
        )*
    };
}

record_key_from_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<&Value> for RecordKey {
    /// Scalars use their property-key rendering; arrays and objects use
    /// compact JSON.
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => RecordKey("null".to_string()),
            Value::Bool(b) => RecordKey::from(*b),
            Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
                (Some(i), _, _) => RecordKey::from(i),
                (None, Some(u), _) => RecordKey::from(u),
                (None, None, Some(f)) => RecordKey::from(f),
                _ => RecordKey(n.to_string()),
            },
            Value::String(s) => RecordKey(s.clone()),
            other => RecordKey(other.to_string()),
        }
    }
}

/// Render a float the way it appears as a property key
pub(crate) fn number_key(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        // -0 renders as 0
        "0".to_string()
    } else {
        // f64 Display already drops the fractional part of integral values
        n.to_string()
    }
}

/// Hashable identity for default-equality deduplication
pub trait DedupKey {
    type Key: Hash + Eq;

    fn dedup_key(&self) -> Self::Key;
}

macro_rules! dedup_key_identity {
    ($($t:ty),*) => {
        $(
            impl DedupKey for $t {
                type Key = $t;

                fn dedup_key(&self) -> $t {
                    *self
                }
            }
        )*
    };
}

dedup_key_identity!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char);

impl DedupKey for f64 {
    type Key = u64;

    fn dedup_key(&self) -> u64 {
        if self.is_nan() {
            f64::NAN.to_bits()
        } else if *self == 0.0 {
            0
        } else {
            self.to_bits()
        }
    }
}

impl DedupKey for f32 {
    type Key = u32;

    fn dedup_key(&self) -> u32 {
        if self.is_nan() {
            f32::NAN.to_bits()
        } else if *self == 0.0 {
            0
        } else {
            self.to_bits()
        }
    }
}

impl DedupKey for str {
    type Key = String;

    fn dedup_key(&self) -> String {
        self.to_string()
    }
}

impl DedupKey for String {
    type Key = String;

    fn dedup_key(&self) -> String {
        self.clone()
    }
}

impl<T: DedupKey + ?Sized> DedupKey for &T {
    type Key = T::Key;

    fn dedup_key(&self) -> T::Key {
        (**self).dedup_key()
    }
}

impl<T: DedupKey> DedupKey for Option<T> {
    type Key = Option<T::Key>;

    fn dedup_key(&self) -> Self::Key {
        self.as_ref().map(DedupKey::dedup_key)
    }
}

impl<A: DedupKey, B: DedupKey> DedupKey for (A, B) {
    type Key = (A::Key, B::Key);

    fn dedup_key(&self) -> Self::Key {
        (self.0.dedup_key(), self.1.dedup_key())
    }
}

impl DedupKey for Value {
    type Key = String;

    /// Deep-value identity: object keys sorted, `1` and `1.0` equal
    fn dedup_key(&self) -> String {
        let mut out = String::new();
        write_canonical(self, &mut out);
        out
    }
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => out.push_str(&value.to_string()),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => out.push_str(&number_key(f)),
            _ => out.push_str(&n.to_string()),
        },
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => write_canonical_object(map, out),
    }
}

fn write_canonical_object(map: &Map<String, Value>, out: &mut String) {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    out.push('{');
    for (i, (k, v)) in entries.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&Value::String(k.clone()).to_string());
        out.push(':');
        write_canonical(v, out);
    }
    out.push('}');
}
