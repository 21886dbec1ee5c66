//! Front-end logger
//!
//! A thin wrapper that builds [`Record`]s at the call site and hands them to
//! a [`Handler`]. Handler failures are reported on stderr; a log call never
//! fails the caller.

use super::handler::Handler;
use super::level::Level;
use super::record::Record;
use super::value::Attr;
use std::sync::Arc;

#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
}

impl Logger {
    pub fn new<H: Handler + 'static>(handler: H) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    pub fn from_handler(handler: Arc<dyn Handler>) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    /// Logger whose records carry `attrs` in the current group
    #[must_use]
    pub fn with(&self, attrs: impl IntoIterator<Item = Attr>) -> Logger {
        let attrs: Vec<Attr> = attrs.into_iter().collect();
        if attrs.is_empty() {
            return self.clone();
        }
        Logger::from_handler(self.handler.with_attrs(attrs))
    }

    /// Logger whose further attributes nest under `name`
    #[must_use]
    pub fn with_group(&self, name: &str) -> Logger {
        Logger::from_handler(self.handler.with_group(name))
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.handler.enabled(level)
    }

    #[track_caller]
    pub fn log(&self, level: Level, message: impl Into<String>) {
        self.log_attrs(level, message, Vec::new());
    }

    /// Log `message` with `attrs` at `level`, recording the call site
    #[track_caller]
    pub fn log_attrs(
        &self,
        level: Level,
        message: impl Into<String>,
        attrs: impl IntoIterator<Item = Attr>,
    ) {
        if !self.enabled(level) {
            return;
        }

        let record = Record::now(level, message).with_attrs(attrs);
        if let Err(e) = self.handler.handle(record) {
            eprintln!("[LOGGER ERROR] Failed to handle record: {}", e);
        }
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.log_attrs(Level::DEBUG, message, attrs);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.log_attrs(Level::INFO, message, attrs);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.log_attrs(Level::WARN, message, attrs);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.log_attrs(Level::ERROR, message, attrs);
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Result;
    use parking_lot::Mutex;

    /// Handler that keeps every record it receives
    #[derive(Clone, Default)]
    struct Capture {
        records: Arc<Mutex<Vec<Record>>>,
        min: Level,
    }

    impl Handler for Capture {
        fn enabled(&self, level: Level) -> bool {
            level >= self.min
        }

        fn handle(&self, record: Record) -> Result<()> {
            self.records.lock().push(record);
            Ok(())
        }

        fn with_attrs(&self, _attrs: Vec<Attr>) -> Arc<dyn Handler> {
            Arc::new(self.clone())
        }

        fn with_group(&self, _name: &str) -> Arc<dyn Handler> {
            Arc::new(self.clone())
        }
    }

    #[test]
    fn test_log_records_call_site() {
        let capture = Capture::default();
        let logger = Logger::new(capture.clone());

        let line = line!() + 1;
        logger.info("hello", vec![Attr::int64("n", 1)]);

        let records = capture.records.lock();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.level, Level::INFO);
        assert_eq!(record.message, "hello");
        assert_eq!(record.num_attrs(), 1);
        assert!(record.time.is_some());
        let source = record.source.as_ref().expect("source captured");
        assert_eq!(source.line, line);
        assert!(source.file.ends_with("logger.rs"));
    }

    #[test]
    fn test_disabled_levels_skip_handler() {
        let capture = Capture {
            min: Level::WARN,
            ..Default::default()
        };
        let logger = Logger::new(capture.clone());

        logger.debug("no", Vec::new());
        logger.info("no", Vec::new());
        logger.warn("yes", Vec::new());
        logger.error("yes", Vec::new());

        assert_eq!(capture.records.lock().len(), 2);
    }
}
