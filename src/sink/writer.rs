//! Typed field-append operations shared by contexts and events

use super::event::Event;
use super::fields::FieldValue;
use crate::core::any_value::{IpPrefix, MacAddr};
use chrono::{DateTime, Utc};
use serde_json::value::RawValue;
use std::error::Error as StdError;
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

/// Target of typed field writes.
///
/// Implemented by [`Context`](super::Context), whose fields are bound to
/// every event of the logger it builds, and by [`Event`], which is written
/// once and committed. Methods consume and return the target so writes can be
/// chained or folded.
pub trait FieldWriter: Sized {
    /// Append one field
    fn field(self, key: &str, value: FieldValue) -> Self;

    /// Append the fields of `dict` at the current level, without nesting
    fn merge(self, dict: Event) -> Self;

    fn bool(self, key: &str, value: bool) -> Self {
        self.field(key, FieldValue::Bool(value))
    }

    fn dur(self, key: &str, value: Duration) -> Self {
        self.field(key, FieldValue::Duration(value))
    }

    fn float64(self, key: &str, value: f64) -> Self {
        self.field(key, FieldValue::Float(value))
    }

    fn int64(self, key: &str, value: i64) -> Self {
        self.field(key, FieldValue::Int(value))
    }

    fn str(self, key: &str, value: &str) -> Self {
        self.field(key, FieldValue::Str(value.to_string()))
    }

    fn time(self, key: &str, value: DateTime<Utc>) -> Self {
        self.field(key, FieldValue::Time(value))
    }

    fn uint64(self, key: &str, value: u64) -> Self {
        self.field(key, FieldValue::Uint(value))
    }

    /// Nest the fields of `dict` under `key`
    fn dict(self, key: &str, dict: Event) -> Self {
        self.field(key, FieldValue::Dict(dict.into_fields()))
    }

    /// Arbitrary structured value
    fn interface(self, key: &str, value: serde_json::Value) -> Self {
        self.field(key, FieldValue::Json(value))
    }

    /// Error message; nothing is written when `err` is `None`
    fn err(self, key: &str, err: Option<&dyn StdError>) -> Self {
        match err {
            Some(err) => self.field(key, FieldValue::Error(err.to_string())),
            None => self,
        }
    }

    fn stringer(self, key: &str, value: &dyn fmt::Display) -> Self {
        self.field(key, FieldValue::Str(value.to_string()))
    }

    fn ip_addr(self, key: &str, value: IpAddr) -> Self {
        self.field(key, FieldValue::Str(value.to_string()))
    }

    fn ip_prefix(self, key: &str, value: IpPrefix) -> Self {
        self.field(key, FieldValue::Str(value.to_string()))
    }

    fn mac_addr(self, key: &str, value: &MacAddr) -> Self {
        self.field(key, FieldValue::Str(value.to_string()))
    }

    /// Pre-serialized JSON, embedded verbatim
    fn raw_json(self, key: &str, value: Box<RawValue>) -> Self {
        self.field(key, FieldValue::Raw(value))
    }
}
