//! Handler trait consumed by the front-end

use super::error::Result;
use super::level::Level;
use super::record::Record;
use super::value::Attr;
use std::sync::Arc;

/// Back-end of a [`Logger`](crate::Logger).
///
/// Implementations are immutable: `with_attrs` and `with_group` return new
/// handlers and leave `self` usable as before.
pub trait Handler: Send + Sync {
    /// Whether a record at `level` would be emitted
    fn enabled(&self, level: Level) -> bool;

    /// Emit one record
    fn handle(&self, record: Record) -> Result<()>;

    /// Handler whose output carries `attrs` in its current scope
    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler>;

    /// Handler whose further attributes nest under `name`
    fn with_group(&self, name: &str) -> Arc<dyn Handler>;
}

/// Handler that accepts everything and writes nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardHandler;

impl Handler for DiscardHandler {
    fn enabled(&self, _level: Level) -> bool {
        true
    }

    fn handle(&self, _record: Record) -> Result<()> {
        Ok(())
    }

    fn with_attrs(&self, _attrs: Vec<Attr>) -> Arc<dyn Handler> {
        Arc::new(*self)
    }

    fn with_group(&self, _name: &str) -> Arc<dyn Handler> {
        Arc::new(*self)
    }
}
