//! Appender trait for sink output destinations

use super::entry::LogEntry;
use crate::core::error::Result;

pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &LogEntry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
