//! Console appender implementation

use crate::core::{LogLevel, Result, TimestampFormat};
use crate::sink::{Appender, FieldValue, LogEntry, CALLER_FIELD, TIMESTAMP_FIELD};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::{self, Stdout, Write};

/// Human-readable line appender.
///
/// Lines look like `2025-01-08 10:30:45 INF main.rs:12 > started port=8080`:
/// time, level abbreviation, caller, message, then the remaining fields as
/// `key=value` pairs in the order they were written.
pub struct ConsoleAppender<W: Write + Send + Sync = Stdout> {
    writer: W,
    use_colors: bool,
    timestamp_format: TimestampFormat,
}

impl ConsoleAppender<Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for ConsoleAppender<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send + Sync> ConsoleAppender<W> {
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            use_colors: cfg!(feature = "console"),
            timestamp_format: TimestampFormat::DateTime,
        }
    }

    /// Enable or disable ANSI colors
    ///
    /// Has no effect without the `console` feature.
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Set the timestamp format for this appender
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_log_bridge::appenders::ConsoleAppender;
    /// use rust_log_bridge::TimestampFormat;
    ///
    /// let appender = ConsoleAppender::new()
    ///     .with_timestamp_format(TimestampFormat::Rfc3339);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Set a custom timestamp format using a strftime-compatible format string
    #[must_use]
    pub fn with_custom_timestamp(mut self, format_str: &str) -> Self {
        self.timestamp_format = TimestampFormat::Custom(format_str.to_string());
        self
    }

    fn format_level(&self, level: Option<LogLevel>) -> String {
        let Some(level) = level else {
            return "???".to_string();
        };
        #[cfg(feature = "console")]
        if self.use_colors {
            return level.abbreviation().color(level.color_code()).to_string();
        }
        level.abbreviation().to_string()
    }

    fn format_key(&self, key: &str) -> String {
        #[cfg(feature = "console")]
        if self.use_colors {
            return format!("{}=", key).dimmed().to_string();
        }
        format!("{}=", key)
    }

    fn format_line(&self, entry: &LogEntry) -> String {
        let mut parts = Vec::new();

        // Header values are the last ones written on the event itself, so
        // bound attributes sharing a name stay in the tail
        let time = last_index(entry, TIMESTAMP_FIELD);
        let caller = last_index(entry, CALLER_FIELD);
        let event_fields: Vec<(&str, &FieldValue)> = entry.fields.iter().collect();

        if let Some(i) = time {
            parts.push(event_fields[i].1.to_text(&self.timestamp_format));
        }
        parts.push(self.format_level(entry.level));
        if let Some(i) = caller {
            parts.push(format!("{} >", event_fields[i].1.to_text(&self.timestamp_format)));
        }
        if !entry.message.is_empty() {
            parts.push(sanitize_message(&entry.message));
        }

        let own = event_fields
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != time && Some(*i) != caller)
            .map(|(_, field)| *field);
        for (key, value) in entry.context.iter().chain(own) {
            let text = match value {
                FieldValue::Str(s) | FieldValue::Error(s) => quote_if_needed(s),
                other => other.to_text(&self.timestamp_format),
            };
            parts.push(format!("{}{}", self.format_key(key), text));
        }

        parts.join(" ")
    }
}

/// Position of the last event field named `key`
fn last_index(entry: &LogEntry, key: &str) -> Option<usize> {
    entry
        .fields
        .iter()
        .enumerate()
        .filter(|(_, (k, _))| *k == key)
        .map(|(i, _)| i)
        .last()
}

/// Escape line breaks and tabs so one entry always occupies one line
fn sanitize_message(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn quote_if_needed(value: &str) -> String {
    if value.is_empty() || value.contains(|c: char| c.is_whitespace() || c == '"' || c == '=') {
        format!("{:?}", value)
    } else {
        value.to_string()
    }
}

impl<W: Write + Send + Sync> Appender for ConsoleAppender<W> {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let mut line = self.format_line(entry);
        line.push('\n');
        self.writer.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
