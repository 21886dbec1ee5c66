//! JSON appender for structured logging

use crate::core::{Result, TimestampFormat};
use crate::sink::{Appender, Encoded, LogEntry};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// JSON lines appender
///
/// Writes each entry as a single-line JSON object (JSONL format) with the
/// level first and the message last. Compatible with log aggregation tools
/// like ELK, Loki, etc.
pub struct JsonAppender<W: Write + Send + Sync> {
    writer: W,
    pretty: bool,
    timestamp_format: TimestampFormat,
}

impl<W: Write + Send + Sync> JsonAppender<W> {
    /// Create a JSON appender writing to `writer`
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Pretty-print each entry over several lines
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Format used for every time-valued field, including the record time
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    fn encode(&self, entry: &LogEntry) -> Result<Vec<u8>> {
        let encoded = Encoded::new(entry, &self.timestamp_format);
        let mut line = if self.pretty {
            serde_json::to_vec_pretty(&encoded)?
        } else {
            serde_json::to_vec(&encoded)?
        };
        line.push(b'\n');
        Ok(line)
    }
}

impl JsonAppender<BufWriter<File>> {
    /// Create a JSON appender appending to the file at `path`
    pub fn to_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send + Sync> Appender for JsonAppender<W> {
    fn name(&self) -> &str {
        "json"
    }

    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let line = self.encode(entry)?;
        // One write per entry keeps lines whole on shared outputs
        self.writer.write_all(&line)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
