//! # Rust Log Bridge
//!
//! Structured-logging front-end bridged to a field-oriented event sink.
//!
//! Records carry a fine-grained [`Level`], a message and typed [`Attr`]s,
//! possibly nested in groups or computed lazily. A [`SinkHandler`] maps them
//! onto sink events: levels collapse to the sink's [`LogLevel`]s, attributes
//! become typed fields and every `with_group` scope becomes one nested object.
//!
//! ## Features
//!
//! - **Typed mapping**: scalars, groups, IP/MAC addresses, errors and
//!   self-serializing values each get a dedicated field type
//! - **Persistent handler chains**: deriving a handler never touches the one
//!   it came from, so a base logger can be shared across threads
//! - **Lazy values**: computed only for records that pass the level check
//! - **JSON and console output** through pluggable appenders
//!
//! ## Example
//!
//! ```
//! use rust_log_bridge::prelude::*;
//!
//! let buffer = SharedBuffer::new();
//! let logger = Logger::new(SinkHandler::json(buffer.clone(), HandlerOptions::default()));
//!
//! logger.warn("disk almost full", attrs!("free_mb" => 512i64));
//! assert_eq!(buffer.json_lines()[0]["free_mb"], 512);
//! ```

pub mod appenders;
pub mod bridge;
pub mod core;
pub mod macros;
pub mod sink;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, JsonAppender, SharedBuffer};
    pub use crate::attrs;
    pub use crate::bridge::{EmptyGroupPolicy, HandlerConfig, HandlerOptions, SinkHandler};
    pub use crate::core::{
        AnyValue, Attr, DiscardHandler, ErrorValue, Handler, IpPrefix, Json, Level, LevelVar,
        Leveler, LogLevel, Logger, LoggerError, MacAddr, Record, Result, Serialized, Source,
        Stringer, TimestampFormat, Value,
    };
    pub use crate::sink::{FieldWriter, SinkLogger};
}

pub use appenders::{ConsoleAppender, JsonAppender, SharedBuffer};
pub use bridge::{EmptyGroupPolicy, GroupHandler, HandlerConfig, HandlerOptions, SinkHandler};
pub use core::{
    AnyValue, Attr, DiscardHandler, ErrorValue, Handler, IpPrefix, Json, Kind, Level, LevelVar,
    Leveler, LogLevel, LogValuer, Logger, LoggerError, MacAddr, MarshalError, Record, Result,
    Serialized, Source, Stringer, TimestampFormat, Value,
};
pub use sink::{Event, FieldValue, FieldWriter, SinkLogger, SinkMetrics};
