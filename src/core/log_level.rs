//! Coarse sink severity and the mapping from fine-grained front-end levels

use super::error::LoggerError;
use super::level::Level;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity understood by the sink.
///
/// The front-end speaks a finer integer scale ([`Level`]); every record is
/// quantized into one of these buckets before an event is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    /// All levels, lowest first
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    /// Value written under the level field of JSON output
    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Three letter tag used by console output
    pub fn abbreviation(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRC",
            LogLevel::Debug => "DBG",
            LogLevel::Info => "INF",
            LogLevel::Warn => "WRN",
            LogLevel::Error => "ERR",
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Trace => Magenta,
            LogLevel::Debug => Yellow,
            LogLevel::Info => Green,
            LogLevel::Warn => BrightRed,
            LogLevel::Error => Red,
        }
    }
}

impl From<Level> for LogLevel {
    /// Quantize a front-end level: the greatest named threshold not above
    /// `level` wins, anything below `DEBUG` is trace and anything at or above
    /// `ERROR` is error.
    fn from(level: Level) -> Self {
        if level < Level::DEBUG {
            LogLevel::Trace
        } else if level < Level::INFO {
            LogLevel::Debug
        } else if level < Level::WARN {
            LogLevel::Info
        } else if level < Level::ERROR {
            LogLevel::Warn
        } else {
            LogLevel::Error
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" | "trc" => Ok(LogLevel::Trace),
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "info" | "inf" => Ok(LogLevel::Info),
            "warn" | "warning" | "wrn" => Ok(LogLevel::Warn),
            "error" | "err" => Ok(LogLevel::Error),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}
