//! Single-use events and detached dictionaries

use super::entry::LogEntry;
use super::fields::{FieldValue, Fields};
use super::logger::Output;
use super::writer::FieldWriter;
use crate::core::error::Result;
use crate::core::log_level::LogLevel;
use std::sync::Arc;

/// One event under construction.
///
/// An event started from a [`SinkLogger`](super::SinkLogger) is committed
/// once with [`Event::msg`]. An event from [`dict`] has no output and only
/// serves as the contents of a nested field. A disabled event ignores every
/// write and commits nothing.
#[derive(Debug)]
pub struct Event {
    level: Option<LogLevel>,
    context: Arc<Fields>,
    fields: Fields,
    output: Option<Arc<Output>>,
    enabled: bool,
}

/// Start an empty dictionary to be nested with [`FieldWriter::dict`]
pub fn dict() -> Event {
    Event::detached(Arc::new(Fields::new()))
}

impl Event {
    pub(crate) fn new(
        level: Option<LogLevel>,
        context: Arc<Fields>,
        output: Arc<Output>,
        enabled: bool,
    ) -> Self {
        Self {
            level,
            context,
            fields: Fields::new(),
            output: Some(output),
            enabled,
        }
    }

    pub(crate) fn detached(context: Arc<Fields>) -> Self {
        Self {
            level: None,
            context,
            fields: Fields::new(),
            output: None,
            enabled: true,
        }
    }

    /// Whether writes to this event have any effect
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn level(&self) -> Option<LogLevel> {
        self.level
    }

    /// Commit the event with its final message.
    ///
    /// Disabled events and dictionaries commit nothing.
    pub fn msg(self, message: impl Into<String>) -> Result<()> {
        let Some(output) = self.output else {
            return Ok(());
        };
        if !self.enabled {
            return Ok(());
        }

        let entry = LogEntry {
            level: self.level,
            context: self.context,
            fields: self.fields,
            message: message.into(),
        };
        output.write(&entry)
    }

    /// Bound context fields followed by the event's own fields
    pub(crate) fn into_fields(self) -> Fields {
        if self.context.is_empty() {
            return self.fields;
        }
        let mut all = Fields::clone(&self.context);
        all.extend(self.fields);
        all
    }
}

impl FieldWriter for Event {
    fn field(mut self, key: &str, value: FieldValue) -> Self {
        if self.enabled {
            self.fields.push(key, value);
        }
        self
    }

    fn merge(mut self, dict: Event) -> Self {
        if self.enabled {
            self.fields.extend(dict.into_fields());
        }
        self
    }
}
