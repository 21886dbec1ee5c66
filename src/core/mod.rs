//! Front-end types: levels, values, records and the handler contract

pub mod any_value;
pub mod error;
pub mod handler;
pub mod level;
pub mod log_level;
pub mod logger;
pub mod record;
pub mod timestamp;
pub mod value;

pub use any_value::{AnyValue, ErrorValue, IpPrefix, Json, MacAddr, MarshalError, Serialized, Stringer};
pub use error::{LoggerError, Result};
pub use handler::{DiscardHandler, Handler};
pub use level::{Level, LevelVar, Leveler};
pub use log_level::LogLevel;
pub use logger::Logger;
pub use record::{Record, Source};
pub use timestamp::TimestampFormat;
pub use value::{Attr, Kind, LogValuer, Value};
