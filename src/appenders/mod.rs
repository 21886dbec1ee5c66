//! Appender implementations

pub mod buffer;
pub mod console;
pub mod json;

pub use buffer::SharedBuffer;
pub use console::ConsoleAppender;
pub use json::JsonAppender;

pub use crate::sink::Appender;
