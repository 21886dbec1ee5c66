//! Typed attribute values
//!
//! This module provides:
//! - `Value`: tagged union of the kinds a record attribute may carry
//! - `Attr`: a key/value pair
//! - `LogValuer`: deferred values that resolve only when a record is mapped

use super::any_value::{AnyValue, ErrorValue};
use super::error::panic_message;
use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on chained `LogValuer` resolutions
const MAX_RESOLVE_STEPS: usize = 100;

/// A value produced on demand.
///
/// `log_value` is called at most once per mapping of the attribute, and only
/// for records that passed the level check.
pub trait LogValuer: Send + Sync {
    fn log_value(&self) -> Value;
}

impl<F> LogValuer for F
where
    F: Fn() -> Value + Send + Sync,
{
    fn log_value(&self) -> Value {
        self()
    }
}

/// Discriminant of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Any,
    Bool,
    Duration,
    Float64,
    Int64,
    String,
    Time,
    Uint64,
    Group,
    LogValuer,
}

/// Value of an attribute
#[derive(Clone)]
pub enum Value {
    Bool(bool),
    Duration(Duration),
    Float64(f64),
    Int64(i64),
    String(String),
    Time(DateTime<Utc>),
    Uint64(u64),
    Group(Vec<Attr>),
    Any(Arc<dyn AnyValue>),
    LogValuer(Arc<dyn LogValuer>),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::Duration(_) => Kind::Duration,
            Value::Float64(_) => Kind::Float64,
            Value::Int64(_) => Kind::Int64,
            Value::String(_) => Kind::String,
            Value::Time(_) => Kind::Time,
            Value::Uint64(_) => Kind::Uint64,
            Value::Group(_) => Kind::Group,
            Value::Any(_) => Kind::Any,
            Value::LogValuer(_) => Kind::LogValuer,
        }
    }

    /// Wrap an opaque value
    pub fn any<T: AnyValue + 'static>(value: T) -> Self {
        Value::Any(Arc::new(value))
    }

    /// Wrap an error
    pub fn error<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Value::any(ErrorValue::new(err))
    }

    /// Wrap a deferred value
    pub fn lazy<V: LogValuer + 'static>(valuer: V) -> Self {
        Value::LogValuer(Arc::new(valuer))
    }

    /// Run the `LogValuer` chain until a concrete value comes out.
    ///
    /// Non-deferred values are returned borrowed. Each valuer in the chain is
    /// invoked once. A valuer that panics, or a chain longer than the
    /// resolution limit, yields an error value instead.
    pub fn resolve(&self) -> Cow<'_, Value> {
        let Value::LogValuer(first) = self else {
            return Cow::Borrowed(self);
        };

        let mut current = Arc::clone(first);
        for _ in 0..MAX_RESOLVE_STEPS {
            let produced = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                current.log_value()
            }));
            match produced {
                Ok(Value::LogValuer(next)) => current = next,
                Ok(value) => return Cow::Owned(value),
                Err(panic_info) => {
                    let panic_msg = panic_message(panic_info.as_ref());
                    return Cow::Owned(Value::error(ResolveError::Panicked(panic_msg)));
                }
            }
        }
        Cow::Owned(Value::error(ResolveError::TooDeep))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Duration(d) => write!(f, "{:?}", d),
            Value::Float64(fl) => write!(f, "{}", fl),
            Value::Int64(i) => write!(f, "{}", i),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Time(t) => write!(f, "{}", t.to_rfc3339()),
            Value::Uint64(u) => write!(f, "{}", u),
            Value::Group(attrs) => f.debug_list().entries(attrs).finish(),
            Value::Any(any) => write!(f, "{:?}", any),
            Value::LogValuer(_) => f.write_str("<lazy>"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum ResolveError {
    #[error("LogValue panicked: {0}")]
    Panicked(String),
    #[error("LogValue called too many times")]
    TooDeep,
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Value::Duration(d)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float64(f)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float64(f64::from(f))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int64(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int64(i64::from(i))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::Uint64(u)
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Self {
        Value::Uint64(u64::from(u))
    }
}

impl From<usize> for Value {
    fn from(u: usize) -> Self {
        Value::Uint64(u as u64)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Time(t)
    }
}

impl From<Vec<Attr>> for Value {
    fn from(attrs: Vec<Attr>) -> Self {
        Value::Group(attrs)
    }
}

/// Key/value pair attached to a record or bound to a handler
#[derive(Debug, Clone)]
pub struct Attr {
    pub key: String,
    pub value: Value,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, Value::String(value.into()))
    }

    pub fn int64(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, Value::Int64(value))
    }

    pub fn uint64(key: impl Into<String>, value: u64) -> Self {
        Self::new(key, Value::Uint64(value))
    }

    pub fn float64(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, Value::Float64(value))
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, Value::Bool(value))
    }

    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Self::new(key, Value::Duration(value))
    }

    pub fn time(key: impl Into<String>, value: DateTime<Utc>) -> Self {
        Self::new(key, Value::Time(value))
    }

    pub fn group(key: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self::new(key, Value::Group(attrs))
    }

    pub fn any<T: AnyValue + 'static>(key: impl Into<String>, value: T) -> Self {
        Self::new(key, Value::any(value))
    }

    pub fn error<E: StdError + Send + Sync + 'static>(key: impl Into<String>, err: E) -> Self {
        Self::new(key, Value::error(err))
    }

    pub fn lazy<V: LogValuer + 'static>(key: impl Into<String>, valuer: V) -> Self {
        Self::new(key, Value::lazy(valuer))
    }
}
