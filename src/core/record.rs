//! Log record handed from the front-end to a handler

use super::level::Level;
use super::value::Attr;
use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::panic::Location;

/// Call site of a log statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub file: Cow<'static, str>,
    pub line: u32,
}

impl Source {
    pub fn new(file: impl Into<Cow<'static, str>>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// `file:line`, or `None` when the location is unknown
    pub fn resolve(&self) -> Option<String> {
        if self.file.is_empty() || self.line == 0 {
            return None;
        }
        Some(format!("{}:{}", self.file, self.line))
    }
}

impl From<&'static Location<'static>> for Source {
    fn from(location: &'static Location<'static>) -> Self {
        Source::new(location.file(), location.line())
    }
}

/// One log event as produced by the front-end.
///
/// Built once per log call and consumed by exactly one `Handler::handle`.
#[derive(Debug, Clone)]
pub struct Record {
    /// `None` means "no timestamp"; the handler then writes none
    pub time: Option<DateTime<Utc>>,
    pub level: Level,
    pub message: String,
    pub source: Option<Source>,
    attrs: Vec<Attr>,
}

impl Record {
    pub fn new(
        time: Option<DateTime<Utc>>,
        level: Level,
        message: impl Into<String>,
        source: Option<Source>,
    ) -> Self {
        Self {
            time,
            level,
            message: message.into(),
            source,
            attrs: Vec::new(),
        }
    }

    /// Record stamped with the current time and the caller's location
    #[track_caller]
    pub fn now(level: Level, message: impl Into<String>) -> Self {
        Self::new(
            Some(Utc::now()),
            level,
            message,
            Some(Source::from(Location::caller())),
        )
    }

    pub fn add_attrs(&mut self, attrs: impl IntoIterator<Item = Attr>) {
        self.attrs.extend(attrs);
    }

    #[must_use]
    pub fn with_attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.add_attrs(attrs);
        self
    }

    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    pub fn num_attrs(&self) -> usize {
        self.attrs.len()
    }
}
