//! Handler configuration

use crate::core::error::{LoggerError, Result};
use crate::core::level::{Level, Leveler};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// What a group with an empty name turns into
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyGroupPolicy {
    /// No nesting level: the group's fields land in the enclosing scope
    #[default]
    Inline,
    /// Nested object under the `""` key
    Nest,
}

/// Options of a [`SinkHandler`](super::SinkHandler)
///
/// # Example
///
/// ```
/// use rust_log_bridge::bridge::HandlerOptions;
/// use rust_log_bridge::{Level, LevelVar};
/// use std::sync::Arc;
///
/// let level = Arc::new(LevelVar::new(Level::INFO));
/// let opts = HandlerOptions::new()
///     .with_add_source(true)
///     .with_level(level.clone());
///
/// // Raised later without rebuilding the handler
/// level.set(Level::WARN);
/// assert_eq!(opts.min_level(), Some(Level::WARN));
/// ```
#[derive(Clone, Default)]
pub struct HandlerOptions {
    /// Write the call site of each record under the caller field
    pub add_source: bool,

    /// Minimum record level, read for every record.
    ///
    /// `None` leaves filtering to the sink logger's own level.
    pub level: Option<Arc<dyn Leveler>>,

    pub empty_groups: EmptyGroupPolicy,
}

impl HandlerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_add_source(mut self, add_source: bool) -> Self {
        self.add_source = add_source;
        self
    }

    #[must_use]
    pub fn with_level<L: Leveler + 'static>(mut self, level: L) -> Self {
        self.level = Some(Arc::new(level));
        self
    }

    #[must_use]
    pub fn with_empty_groups(mut self, policy: EmptyGroupPolicy) -> Self {
        self.empty_groups = policy;
        self
    }

    /// Current minimum level, if one is configured
    pub fn min_level(&self) -> Option<Level> {
        self.level.as_ref().map(|l| l.level())
    }
}

impl fmt::Debug for HandlerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerOptions")
            .field("add_source", &self.add_source)
            .field("level", &self.min_level())
            .field("empty_groups", &self.empty_groups)
            .finish()
    }
}

/// Plain-data form of [`HandlerOptions`], e.g. read from a config file
///
/// ```
/// use rust_log_bridge::bridge::HandlerConfig;
/// use rust_log_bridge::Level;
///
/// let config: HandlerConfig =
///     serde_json::from_str(r#"{"level": "warn+2", "add_source": true}"#).unwrap();
/// let opts = config.into_options().unwrap();
/// assert_eq!(opts.min_level(), Some(Level::WARN + 2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerConfig {
    /// Level text such as `"info"` or `"DEBUG-2"`
    pub level: Option<String>,
    pub add_source: bool,
    pub empty_groups: EmptyGroupPolicy,
}

impl HandlerConfig {
    pub fn into_options(self) -> Result<HandlerOptions> {
        let mut opts = HandlerOptions::new()
            .with_add_source(self.add_source)
            .with_empty_groups(self.empty_groups);

        if let Some(text) = self.level {
            let level: Level = text.parse().map_err(|e: LoggerError| {
                LoggerError::config("handler.level", e.to_string())
            })?;
            opts = opts.with_level(level);
        }
        Ok(opts)
    }
}
