//! Ordered field storage shared by contexts, events and dictionaries
//!
//! Fields keep insertion order and are never deduplicated: a key written
//! twice is emitted twice and the consumer of the output decides which one
//! wins.

use crate::core::timestamp::TimestampFormat;
use chrono::{DateTime, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::value::RawValue;
use std::time::Duration;

/// Value type of a sink field
#[derive(Debug, Clone)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    /// Message of an error value
    Error(String),
    Time(DateTime<Utc>),
    /// Written as fractional milliseconds
    Duration(Duration),
    Dict(Fields),
    /// Pre-serialized JSON, embedded without re-escaping
    Raw(Box<RawValue>),
    /// Reflected structure of an arbitrary value
    Json(serde_json::Value),
}

impl FieldValue {
    /// Convert to `serde_json::Value`, formatting times with `time_format`
    #[must_use]
    pub fn to_json_value(&self, time_format: &TimestampFormat) -> serde_json::Value {
        serde_json::to_value(Encoded::new(self, time_format)).unwrap_or(serde_json::Value::Null)
    }

    /// Short text rendering used by line-oriented appenders
    #[must_use]
    pub fn to_text(&self, time_format: &TimestampFormat) -> String {
        match self {
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Int(i) => i.to_string(),
            FieldValue::Uint(u) => u.to_string(),
            FieldValue::Float(f) if !f.is_finite() => non_finite(*f).to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Str(s) | FieldValue::Error(s) => s.clone(),
            FieldValue::Time(t) => time_format.format(t),
            FieldValue::Duration(d) => millis(d).to_string(),
            FieldValue::Raw(raw) => raw.get().to_string(),
            FieldValue::Dict(_) | FieldValue::Json(_) => self.to_json_value(time_format).to_string(),
        }
    }
}

/// Text written for NaN and infinities, which JSON numbers cannot carry
fn non_finite(f: f64) -> &'static str {
    if f.is_nan() {
        "NaN"
    } else if f > 0.0 {
        "+Inf"
    } else {
        "-Inf"
    }
}

fn millis(d: &Duration) -> f64 {
    d.as_secs() as f64 * 1000.0 + f64::from(d.subsec_nanos()) / 1_000_000.0
}

/// Ordered list of `(key, value)` pairs
#[derive(Debug, Clone, Default)]
pub struct Fields {
    entries: Vec<(String, FieldValue)>,
}

impl Fields {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, key: impl Into<String>, value: FieldValue) {
        self.entries.push((key.into(), value));
    }

    /// Append all fields of `other`, keeping their order
    pub fn extend(&mut self, other: Fields) {
        self.entries.extend(other.entries);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Last value written under `key`
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Serialization view of fields or values bound to a timestamp format
pub struct Encoded<'a, T: ?Sized> {
    inner: &'a T,
    time_format: &'a TimestampFormat,
}

impl<'a, T: ?Sized> Encoded<'a, T> {
    pub fn new(inner: &'a T, time_format: &'a TimestampFormat) -> Self {
        Self { inner, time_format }
    }

    pub fn inner(&self) -> &'a T {
        self.inner
    }

    pub fn time_format(&self) -> &'a TimestampFormat {
        self.time_format
    }
}

impl Serialize for Encoded<'_, Fields> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.inner.len()))?;
        for (key, value) in self.inner.iter() {
            map.serialize_entry(key, &Encoded::new(value, self.time_format))?;
        }
        map.end()
    }
}

impl Serialize for Encoded<'_, FieldValue> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.inner {
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Int(i) => serializer.serialize_i64(*i),
            FieldValue::Uint(u) => serializer.serialize_u64(*u),
            FieldValue::Float(f) if !f.is_finite() => serializer.serialize_str(non_finite(*f)),
            FieldValue::Float(f) => serializer.serialize_f64(*f),
            FieldValue::Str(s) | FieldValue::Error(s) => serializer.serialize_str(s),
            FieldValue::Time(t) => match self.time_format {
                TimestampFormat::Unix => serializer.serialize_i64(t.timestamp()),
                TimestampFormat::UnixMillis => serializer.serialize_i64(t.timestamp_millis()),
                TimestampFormat::UnixMicros => serializer.serialize_i64(t.timestamp_micros()),
                format => serializer.serialize_str(&format.format(t)),
            },
            FieldValue::Duration(d) => serializer.serialize_f64(millis(d)),
            FieldValue::Dict(fields) => Encoded::new(fields, self.time_format).serialize(serializer),
            FieldValue::Raw(raw) => raw.serialize(serializer),
            FieldValue::Json(value) => value.serialize(serializer),
        }
    }
}
