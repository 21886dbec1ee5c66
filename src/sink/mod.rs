//! Field-oriented event sink
//!
//! A [`SinkLogger`] starts [`Event`]s at a coarse [`LogLevel`](crate::LogLevel),
//! collects typed fields through [`FieldWriter`] and commits each event once
//! to its appenders. Loggers derived with [`SinkLogger::with`] carry fields
//! bound to all of their events.

pub mod appender;
pub mod entry;
pub mod event;
pub mod fields;
pub mod logger;
pub mod metrics;
pub mod writer;

pub use appender::Appender;
pub use entry::LogEntry;
pub use event::{dict, Event};
pub use fields::{Encoded, FieldValue, Fields};
pub use logger::{Context, SinkLogger, SinkLoggerBuilder};
pub use metrics::SinkMetrics;
pub use writer::FieldWriter;

/// Field holding the level name
pub const LEVEL_FIELD: &str = "level";
/// Field holding the event message
pub const MESSAGE_FIELD: &str = "message";
/// Field holding the record time
pub const TIMESTAMP_FIELD: &str = "time";
/// Field holding the `file:line` call site
pub const CALLER_FIELD: &str = "caller";
