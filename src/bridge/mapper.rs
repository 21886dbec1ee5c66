//! Attribute to field translation
//!
//! Both functions are generic over [`FieldWriter`] so the same fold fills a
//! sink context (attributes bound with `with_attrs`) and a single event
//! (attributes of one record).

use crate::core::any_value::AnyValue;
use crate::core::value::{Attr, Value};
use crate::sink::{dict, FieldWriter};
use serde_json::value::RawValue;

/// Prefix of the string written when an opaque value fails to serialize
pub const ERROR_MARKER: &str = "!ERROR:";

/// Write every attribute into `target`, in order
pub fn map_attrs<'a, W, I>(target: W, attrs: I) -> W
where
    W: FieldWriter,
    I: IntoIterator<Item = &'a Attr>,
{
    attrs.into_iter().fold(target, map_attr)
}

/// Write one attribute into `target`.
///
/// Deferred values are resolved here, once. Groups become a nested
/// dictionary under the attribute key, even when they have no members.
pub fn map_attr<W: FieldWriter>(target: W, attr: &Attr) -> W {
    let key = attr.key.as_str();
    let value = attr.value.resolve();
    match &*value {
        Value::Group(attrs) => target.dict(key, map_attrs(dict(), attrs)),
        Value::Bool(b) => target.bool(key, *b),
        Value::Duration(d) => target.dur(key, *d),
        Value::Float64(f) => target.float64(key, *f),
        Value::Int64(i) => target.int64(key, *i),
        Value::String(s) => target.str(key, s),
        Value::Time(t) => target.time(key, *t),
        Value::Uint64(u) => target.uint64(key, *u),
        Value::Any(any) => map_any(target, key, any.as_ref()),
        // resolve() never hands back a deferred value
        Value::LogValuer(_) => target.interface(key, serde_json::Value::Null),
    }
}

/// Write an opaque value using the first capability it offers.
///
/// Checked in order: IP address, IP prefix, MAC address, error, `Display`,
/// JSON marshaling, text marshaling. Values offering none of them are written
/// through their reflected structure. Marshaling failures are written as
/// `"!ERROR:<message>"` strings.
pub fn map_any<W: FieldWriter>(target: W, key: &str, value: &dyn AnyValue) -> W {
    if let Some(addr) = value.ip_addr() {
        return target.ip_addr(key, addr);
    }
    if let Some(prefix) = value.ip_prefix() {
        return target.ip_prefix(key, prefix);
    }
    if let Some(mac) = value.mac_addr() {
        return target.mac_addr(key, &mac);
    }
    if let Some(err) = value.as_error() {
        return target.err(key, Some(err));
    }
    if let Some(display) = value.as_display() {
        return target.stringer(key, display);
    }
    if let Some(marshaled) = value.marshal_json() {
        let raw = marshaled.and_then(|json| {
            RawValue::from_string(json)
                .and_then(|raw| RawValue::from_string(compact_json(raw.get())))
                .map_err(Into::into)
        });
        return match raw {
            Ok(raw) => target.raw_json(key, raw),
            Err(e) => target.str(key, &format!("{}{}", ERROR_MARKER, e)),
        };
    }
    if let Some(marshaled) = value.marshal_text() {
        return match marshaled {
            Ok(text) => target.str(key, &text),
            Err(e) => target.str(key, &format!("{}{}", ERROR_MARKER, e)),
        };
    }
    target.interface(key, value.to_json_value())
}

/// Drop insignificant whitespace from valid JSON so an embedded value never
/// spans several output lines. Member order is kept as written.
fn compact_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;
    for c in json.chars() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
            out.push(c);
        } else if !matches!(c, ' ' | '\n' | '\r' | '\t') {
            out.push(c);
        }
    }
    out
}
