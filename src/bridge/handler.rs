//! Root handler of the bridge

use super::group::{attach, ChainLink, GroupHandler};
use super::mapper::map_attrs;
use super::options::HandlerOptions;
use crate::appenders::{ConsoleAppender, JsonAppender};
use crate::core::error::Result;
use crate::core::handler::Handler;
use crate::core::level::Level;
use crate::core::log_level::LogLevel;
use crate::core::record::{Record, Source};
use crate::core::timestamp::TimestampFormat;
use crate::core::value::Attr;
use crate::sink::{Event, FieldWriter, SinkLogger, CALLER_FIELD, TIMESTAMP_FIELD};
use std::io::Write;
use std::sync::Arc;

/// Handler writing front-end records to a [`SinkLogger`].
///
/// The sink logger should not add its own timestamp or caller fields; the
/// handler writes both from the record.
///
/// # Example
///
/// ```
/// use rust_log_bridge::prelude::*;
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::new(SinkHandler::json(buffer.clone(), HandlerOptions::default()));
///
/// logger
///     .with(vec![Attr::string("service", "api")])
///     .with_group("req")
///     .info("served", vec![Attr::int64("status", 200)]);
///
/// let line = &buffer.json_lines()[0];
/// assert_eq!(line["service"], "api");
/// assert_eq!(line["req"]["status"], 200);
/// assert_eq!(line["message"], "served");
/// ```
#[derive(Debug, Clone)]
pub struct SinkHandler {
    opts: Arc<HandlerOptions>,
    logger: SinkLogger,
}

impl SinkHandler {
    /// Wrap `logger`.
    ///
    /// Without `opts.level` the logger's own level decides which records are
    /// written.
    pub fn new(logger: SinkLogger, opts: HandlerOptions) -> Self {
        Self {
            opts: Arc::new(opts),
            logger,
        }
    }

    /// JSON lines to `out`, with the sink at info level
    pub fn json<W: Write + Send + Sync + 'static>(out: W, opts: HandlerOptions) -> Self {
        let logger = SinkLogger::builder()
            .min_level(LogLevel::Info)
            .appender(JsonAppender::new(out))
            .build();
        Self::new(logger, opts)
    }

    /// Human-readable lines to `out`, with the sink at info level
    pub fn console<W: Write + Send + Sync + 'static>(out: W, opts: HandlerOptions) -> Self {
        let logger = SinkLogger::builder()
            .min_level(LogLevel::Info)
            .appender(ConsoleAppender::with_writer(out).with_timestamp_format(TimestampFormat::DateTime))
            .build();
        Self::new(logger, opts)
    }

    pub fn logger(&self) -> &SinkLogger {
        &self.logger
    }

    pub fn options(&self) -> &HandlerOptions {
        &self.opts
    }

    /// Start a sink event for a record at `level`.
    ///
    /// A configured minimum replaces the sink logger's level for this event.
    fn start_log(&self, level: Level) -> Event {
        match self.opts.min_level() {
            Some(min) => self
                .logger
                .level(LogLevel::from(min))
                .with_level(LogLevel::from(level)),
            None => self.logger.with_level(LogLevel::from(level)),
        }
    }

    /// Add caller and timestamp, then commit with the record message
    fn end_log(&self, record: &Record, mut event: Event) -> Result<()> {
        if self.opts.add_source {
            if let Some(caller) = record.source.as_ref().and_then(Source::resolve) {
                event = event.str(CALLER_FIELD, &caller);
            }
        }
        if let Some(time) = record.time {
            event = event.time(TIMESTAMP_FIELD, time);
        }
        event.msg(record.message.as_str())
    }
}

impl ChainLink for SinkHandler {
    fn admit(&self, level: Level) -> bool {
        let admitted = self.enabled(level);
        if !admitted {
            self.logger.metrics().record_filtered();
        }
        admitted
    }

    fn handle_group(&self, group: &str, record: &Record, dict: Event) -> Result<()> {
        let event = self.start_log(record.level);
        if !event.enabled() {
            return Ok(());
        }
        let event = attach(event, group, dict, self.opts.empty_groups);
        self.end_log(record, event)
    }
}

impl Handler for SinkHandler {
    fn enabled(&self, level: Level) -> bool {
        match self.opts.min_level() {
            Some(min) => level >= min,
            None => LogLevel::from(level) >= self.logger.get_level(),
        }
    }

    fn handle(&self, record: Record) -> Result<()> {
        if !self.admit(record.level) {
            return Ok(());
        }
        let event = self.start_log(record.level);
        if !event.enabled() {
            return Ok(());
        }
        let event = map_attrs(event, record.attrs());
        self.end_log(&record, event)
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        Arc::new(SinkHandler {
            opts: Arc::clone(&self.opts),
            logger: map_attrs(self.logger.with(), &attrs).logger(),
        })
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        Arc::new(GroupHandler::new(
            Arc::new(self.clone()),
            self.logger.with().reset().logger(),
            name.trim(),
            Arc::clone(&self.opts),
        ))
    }
}
