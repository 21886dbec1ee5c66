//! Logging macros for ergonomic record construction.
//!
//! The level macros format their message like `format!`; [`attrs!`] builds
//! the attribute list passed to the `Logger` methods that take one.
//!
//! # Examples
//!
//! ```
//! use rust_log_bridge::prelude::*;
//! use rust_log_bridge::info;
//!
//! let logger = Logger::new(DiscardHandler);
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With attributes
//! logger.info("request served", attrs!("status" => 200i64, "path" => "/health"));
//! ```

/// Build a `Vec<Attr>` from `key => value` pairs.
///
/// Values go through `Value::from`, so scalars, strings, times, durations and
/// `Vec<Attr>` groups can be written directly.
///
/// ```
/// use rust_log_bridge::{attrs, Attr, Kind};
///
/// let attrs = attrs!("user" => "alice", "retries" => 3i64, "req" => attrs!("id" => 7u64));
/// assert_eq!(attrs.len(), 3);
/// assert_eq!(attrs[2].value.kind(), Kind::Group);
///
/// let none: Vec<Attr> = attrs!();
/// assert!(none.is_empty());
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        ::std::vec::Vec::<$crate::Attr>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Attr::new($key, $value)),+]
    };
}

/// Log a formatted message at a front-end level.
///
/// # Examples
///
/// ```
/// # use rust_log_bridge::prelude::*;
/// # let logger = Logger::new(DiscardHandler);
/// use rust_log_bridge::log;
/// log!(logger, Level::INFO, "Simple message");
/// log!(logger, Level::ERROR + 2, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_bridge::prelude::*;
/// # let logger = Logger::new(DiscardHandler);
/// use rust_log_bridge::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::DEBUG, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::INFO, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_bridge::prelude::*;
/// # let logger = Logger::new(DiscardHandler);
/// use rust_log_bridge::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::WARN, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::ERROR, $($arg)+)
    };
}
