//! Fine-grained front-end levels

use super::error::LoggerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;
use std::sync::atomic::{AtomicI32, Ordering};

/// Severity of a record on the front-end's signed integer scale.
///
/// The named levels are four units apart so that callers can express
/// intermediate severities (`Level::WARN + 1`) without inventing new names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Level(i32);

impl Level {
    pub const DEBUG: Level = Level(-4);
    pub const INFO: Level = Level(0);
    pub const WARN: Level = Level(4);
    pub const ERROR: Level = Level(8);

    pub const fn new(value: i32) -> Self {
        Level(value)
    }

    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl Add<i32> for Level {
    type Output = Level;

    fn add(self, rhs: i32) -> Level {
        Level(self.0.saturating_add(rhs))
    }
}

impl Sub<i32> for Level {
    type Output = Level;

    fn sub(self, rhs: i32) -> Level {
        Level(self.0.saturating_sub(rhs))
    }
}

impl fmt::Display for Level {
    /// Name of the nearest named level at or below, plus the offset from it:
    /// `INFO`, `WARN+1`, `DEBUG-2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, base) = if *self < Level::INFO {
            ("DEBUG", Level::DEBUG)
        } else if *self < Level::WARN {
            ("INFO", Level::INFO)
        } else if *self < Level::ERROR {
            ("WARN", Level::WARN)
        } else {
            ("ERROR", Level::ERROR)
        };
        let offset = i64::from(self.0) - i64::from(base.0);
        if offset == 0 {
            f.write_str(name)
        } else {
            write!(f, "{}{:+}", name, offset)
        }
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (name, offset) = match trimmed.find(['+', '-']) {
            Some(idx) => {
                let offset: i32 = trimmed[idx..]
                    .parse()
                    .map_err(|_| LoggerError::InvalidLevel(s.to_string()))?;
                (&trimmed[..idx], offset)
            }
            None => (trimmed, 0),
        };

        let base = match name.to_uppercase().as_str() {
            "DEBUG" => Level::DEBUG,
            "INFO" => Level::INFO,
            "WARN" | "WARNING" => Level::WARN,
            "ERROR" => Level::ERROR,
            _ => return Err(LoggerError::InvalidLevel(s.to_string())),
        };
        Ok(base + offset)
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Source of a minimum level, consulted once per record.
pub trait Leveler: Send + Sync {
    fn level(&self) -> Level;
}

impl Leveler for Level {
    fn level(&self) -> Level {
        *self
    }
}

impl<L: Leveler + ?Sized> Leveler for std::sync::Arc<L> {
    fn level(&self) -> Level {
        (**self).level()
    }
}

/// A minimum level that can be changed while handlers are in use.
///
/// # Example
///
/// ```
/// use rust_log_bridge::{Level, LevelVar, Leveler};
///
/// let var = LevelVar::new(Level::INFO);
/// var.set(Level::DEBUG);
/// assert_eq!(var.level(), Level::DEBUG);
/// ```
#[derive(Debug, Default)]
pub struct LevelVar {
    value: AtomicI32,
}

impl LevelVar {
    pub fn new(level: Level) -> Self {
        Self {
            value: AtomicI32::new(level.0),
        }
    }

    pub fn set(&self, level: Level) {
        self.value.store(level.0, Ordering::Relaxed);
    }
}

impl Leveler for LevelVar {
    fn level(&self) -> Level {
        Level(self.value.load(Ordering::Relaxed))
    }
}
