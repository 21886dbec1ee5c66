//! Sink logger, its context builder and the shared output

use super::appender::Appender;
use super::entry::LogEntry;
use super::event::Event;
use super::fields::{FieldValue, Fields};
use super::metrics::SinkMetrics;
use super::writer::FieldWriter;
use crate::core::error::{panic_message, LoggerError, Result};
use crate::core::log_level::LogLevel;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Appenders and metrics shared by a logger and everything derived from it
pub(crate) struct Output {
    appenders: RwLock<Vec<Box<dyn Appender>>>,
    metrics: SinkMetrics,
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self
            .appenders
            .read()
            .iter()
            .map(|a| a.name().to_string())
            .collect();
        f.debug_struct("Output")
            .field("appenders", &names)
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl Output {
    fn new(appenders: Vec<Box<dyn Appender>>) -> Self {
        Self {
            appenders: RwLock::new(appenders),
            metrics: SinkMetrics::new(),
        }
    }

    /// Write one entry to every appender.
    ///
    /// The write lock is held for the whole entry so concurrent commits never
    /// interleave. Each appender is isolated: an error or panic in one is
    /// reported and the remaining appenders still receive the entry. The
    /// first failure is returned.
    pub(crate) fn write(&self, entry: &LogEntry) -> Result<()> {
        let mut appenders = self.appenders.write();
        let mut first_error = None;

        for (idx, appender) in appenders.iter_mut().enumerate() {
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(entry)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Appender #{} ({}) failed: {}", idx, appender.name(), e);
                    first_error.get_or_insert_with(|| LoggerError::appender(appender.name(), e.to_string()));
                }
                Err(panic_info) => {
                    let panic_msg = panic_message(panic_info.as_ref());
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} ({}) panicked: {}. \
                         Other appenders continue to function.",
                        idx,
                        appender.name(),
                        panic_msg
                    );
                    first_error.get_or_insert_with(|| LoggerError::appender_panic(appender.name(), panic_msg));
                }
            }
        }

        match first_error {
            Some(err) => {
                self.metrics.record_failed();
                Err(err)
            }
            None => {
                self.metrics.record_written();
                Ok(())
            }
        }
    }

    fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.write();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }
}

/// Field-oriented event logger.
///
/// Cloning is cheap and clones share the same appenders and metrics.
/// `level` and `with` derive new loggers without affecting the original.
#[derive(Debug, Clone)]
pub struct SinkLogger {
    output: Arc<Output>,
    level: LogLevel,
    context: Arc<Fields>,
}

impl SinkLogger {
    /// Logger with no appenders that accepts every level
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    #[must_use]
    pub fn builder() -> SinkLoggerBuilder {
        SinkLoggerBuilder::new()
    }

    /// Copy of this logger with a different minimum level
    #[must_use]
    pub fn level(&self, level: LogLevel) -> SinkLogger {
        SinkLogger {
            output: Arc::clone(&self.output),
            level,
            context: Arc::clone(&self.context),
        }
    }

    pub fn get_level(&self) -> LogLevel {
        self.level
    }

    /// Start an event at `level`; it is disabled below the minimum level
    pub fn with_level(&self, level: LogLevel) -> Event {
        let enabled = level >= self.level;
        if !enabled {
            self.output.metrics.record_filtered();
        }
        Event::new(Some(level), Arc::clone(&self.context), Arc::clone(&self.output), enabled)
    }

    /// Start an event without a level; never filtered
    pub fn log(&self) -> Event {
        Event::new(None, Arc::clone(&self.context), Arc::clone(&self.output), true)
    }

    pub fn trace(&self) -> Event {
        self.with_level(LogLevel::Trace)
    }

    pub fn debug(&self) -> Event {
        self.with_level(LogLevel::Debug)
    }

    pub fn info(&self) -> Event {
        self.with_level(LogLevel::Info)
    }

    pub fn warn(&self) -> Event {
        self.with_level(LogLevel::Warn)
    }

    pub fn error(&self) -> Event {
        self.with_level(LogLevel::Error)
    }

    /// Detached dictionary pre-filled with this logger's bound fields
    pub fn dict(&self) -> Event {
        Event::detached(Arc::clone(&self.context))
    }

    /// Context builder starting from this logger's bound fields
    pub fn with(&self) -> Context {
        Context {
            logger: self.clone(),
            fields: Fields::clone(&self.context),
        }
    }

    pub fn context_fields(&self) -> &Fields {
        &self.context
    }

    pub fn metrics(&self) -> &SinkMetrics {
        &self.output.metrics
    }

    pub fn flush(&self) -> Result<()> {
        self.output.flush()
    }
}

impl Default for SinkLogger {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder of fields bound to every event of the resulting logger
#[derive(Debug)]
pub struct Context {
    logger: SinkLogger,
    fields: Fields,
}

impl Context {
    /// Drop every field collected so far, including inherited ones
    #[must_use]
    pub fn reset(mut self) -> Self {
        self.fields.clear();
        self
    }

    /// Logger carrying the collected fields
    pub fn logger(self) -> SinkLogger {
        SinkLogger {
            context: Arc::new(self.fields),
            ..self.logger
        }
    }
}

impl FieldWriter for Context {
    fn field(mut self, key: &str, value: FieldValue) -> Self {
        self.fields.push(key, value);
        self
    }

    fn merge(mut self, dict: Event) -> Self {
        self.fields.extend(dict.into_fields());
        self
    }
}

/// Builder for constructing a SinkLogger with a fluent API
///
/// # Example
/// ```
/// use rust_log_bridge::prelude::*;
///
/// let logger = SinkLogger::builder()
///     .min_level(LogLevel::Debug)
///     .appender(JsonAppender::new(SharedBuffer::new()))
///     .build();
/// assert_eq!(logger.get_level(), LogLevel::Debug);
/// ```
pub struct SinkLoggerBuilder {
    min_level: LogLevel,
    appenders: Vec<Box<dyn Appender>>,
}

impl SinkLoggerBuilder {
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Trace,
            appenders: Vec::new(),
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Add an appender
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    pub fn build(self) -> SinkLogger {
        SinkLogger {
            output: Arc::new(Output::new(self.appenders)),
            level: self.min_level,
            context: Arc::new(Fields::new()),
        }
    }
}

impl Default for SinkLoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
