//! Committed sink entry handed to appenders

use super::fields::{Encoded, FieldValue, Fields};
use super::{LEVEL_FIELD, MESSAGE_FIELD};
use crate::core::log_level::LogLevel;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::sync::Arc;

/// One committed event.
///
/// Fields are split into the logger's bound context, which is shared with
/// every other entry of that logger, and the fields written on the event
/// itself. Encoders emit the level first, then context, event fields and the
/// message last.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Option<LogLevel>,
    pub context: Arc<Fields>,
    pub fields: Fields,
    pub message: String,
}

impl LogEntry {
    /// Context fields followed by event fields
    pub fn all_fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.context.iter().chain(self.fields.iter())
    }
}

impl Serialize for Encoded<'_, LogEntry> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entry = self.inner();
        let mut map = serializer.serialize_map(None)?;
        if let Some(level) = entry.level {
            map.serialize_entry(LEVEL_FIELD, level.to_str())?;
        }
        for (key, value) in entry.all_fields() {
            map.serialize_entry(key, &Encoded::new(value, self.time_format()))?;
        }
        map.serialize_entry(MESSAGE_FIELD, &entry.message)?;
        map.end()
    }
}
