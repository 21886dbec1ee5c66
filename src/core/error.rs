//! Error types for the logging bridge

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// An appender returned an error while writing or flushing an entry
    #[error("Appender '{appender}' failed: {message}")]
    AppenderFailed { appender: String, message: String },

    /// An appender panicked while writing an entry
    #[error("Appender '{appender}' panicked: {message}")]
    AppenderPanicked { appender: String, message: String },

    /// Prefix length does not fit the address family
    #[error("Invalid IP prefix length {prefix_len} for {addr}")]
    InvalidPrefix { addr: String, prefix_len: u8 },

    /// Unparseable network value (prefix or hardware address)
    #[error("Invalid {kind} '{input}'")]
    InvalidAddress { kind: &'static str, input: String },

    /// Unparseable level text
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an appender failure error
    pub fn appender(appender: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::AppenderFailed {
            appender: appender.into(),
            message: message.into(),
        }
    }

    /// Create an appender panic error
    pub fn appender_panic(appender: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::AppenderPanicked {
            appender: appender.into(),
            message: message.into(),
        }
    }

    /// Create an invalid address error
    pub fn address(kind: &'static str, input: impl Into<String>) -> Self {
        LoggerError::InvalidAddress {
            kind,
            input: input.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

/// Text carried by a caught panic payload
pub(crate) fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::appender("json", "broken pipe");
        assert!(matches!(err, LoggerError::AppenderFailed { .. }));

        let err = LoggerError::config("HandlerConfig", "unknown level");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::address("MAC address", "zz:zz");
        assert!(matches!(err, LoggerError::InvalidAddress { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::appender_panic("console", "boom");
        assert_eq!(err.to_string(), "Appender 'console' panicked: boom");

        let err = LoggerError::InvalidPrefix {
            addr: "10.0.0.0".to_string(),
            prefix_len: 40,
        };
        assert_eq!(err.to_string(), "Invalid IP prefix length 40 for 10.0.0.0");

        let err = LoggerError::InvalidLevel("LOUD".to_string());
        assert_eq!(err.to_string(), "Invalid log level: 'LOUD'");
    }

    #[test]
    fn test_panic_message_payloads() {
        let payload = std::panic::catch_unwind(|| panic!("static text")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "static text");

        let payload = std::panic::catch_unwind(|| panic!("formatted {}", 7)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "formatted 7");

        let payload = std::panic::catch_unwind(|| std::panic::panic_any(42u8)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "Unknown panic");
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("writing json line", "cannot write", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("writing json line"));
        assert!(err.to_string().contains("cannot write"));
    }
}
