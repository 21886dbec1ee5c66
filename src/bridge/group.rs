//! Group nodes of a handler chain
//!
//! Every `with_group` call adds one node pointing at its parent. A record
//! handled by a node is mapped into a dictionary that each ancestor wraps
//! under its own group name, until the root handler commits the event.

use super::mapper::map_attrs;
use super::options::{EmptyGroupPolicy, HandlerOptions};
use crate::core::error::Result;
use crate::core::handler::Handler;
use crate::core::level::Level;
use crate::core::record::Record;
use crate::core::value::Attr;
use crate::sink::{Event, FieldWriter, SinkLogger};
use std::sync::Arc;

/// A link of the handler chain that can emit a record on behalf of a child
/// group.
pub(crate) trait ChainLink: Handler {
    /// Level check done once per record by the root; rejected records are
    /// counted as filtered by the sink
    fn admit(&self, level: Level) -> bool;

    /// Emit `record` with `dict` nested under `group` in this node's scope
    fn handle_group(&self, group: &str, record: &Record, dict: Event) -> Result<()>;
}

/// Attach a completed group dictionary to `target`
pub(crate) fn attach<W: FieldWriter>(
    target: W,
    group: &str,
    dict: Event,
    policy: EmptyGroupPolicy,
) -> W {
    if group.is_empty() && policy == EmptyGroupPolicy::Inline {
        target.merge(dict)
    } else {
        target.dict(group, dict)
    }
}

/// Handler for one level of group nesting.
///
/// Immutable: deriving a handler allocates a new node and leaves this one,
/// and its parent, untouched.
#[derive(Clone)]
pub struct GroupHandler {
    parent: Arc<dyn ChainLink>,
    /// Logger carrying only the attributes bound at this level
    bound: SinkLogger,
    name: String,
    opts: Arc<HandlerOptions>,
}

impl GroupHandler {
    pub(crate) fn new(
        parent: Arc<dyn ChainLink>,
        bound: SinkLogger,
        name: impl Into<String>,
        opts: Arc<HandlerOptions>,
    ) -> Self {
        Self {
            parent,
            bound,
            name: name.into(),
            opts,
        }
    }

    /// Group name, possibly empty
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for GroupHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupHandler")
            .field("name", &self.name)
            .field("bound", &self.bound.context_fields())
            .finish()
    }
}

impl ChainLink for GroupHandler {
    fn admit(&self, level: Level) -> bool {
        self.parent.admit(level)
    }

    fn handle_group(&self, group: &str, record: &Record, dict: Event) -> Result<()> {
        let scope = attach(self.bound.dict(), group, dict, self.opts.empty_groups);
        self.parent.handle_group(&self.name, record, scope)
    }
}

impl Handler for GroupHandler {
    fn enabled(&self, level: Level) -> bool {
        self.parent.enabled(level)
    }

    fn handle(&self, record: Record) -> Result<()> {
        // Checked before mapping so deferred values of dropped records stay
        // unresolved
        if !self.admit(record.level) {
            return Ok(());
        }
        let scope = map_attrs(self.bound.dict(), record.attrs());
        self.parent.handle_group(&self.name, &record, scope)
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        if attrs.is_empty() {
            return Arc::new(self.clone());
        }
        Arc::new(GroupHandler {
            parent: Arc::clone(&self.parent),
            bound: map_attrs(self.bound.with(), &attrs).logger(),
            name: self.name.clone(),
            opts: Arc::clone(&self.opts),
        })
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        Arc::new(GroupHandler::new(
            Arc::new(self.clone()),
            self.bound.with().reset().logger(),
            name,
            Arc::clone(&self.opts),
        ))
    }
}
