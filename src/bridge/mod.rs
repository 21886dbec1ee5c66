//! Bridge from front-end records to sink events
//!
//! [`SinkHandler`] is the root of a handler chain and owns the sink logger.
//! `with_group` extends the chain with [`GroupHandler`] nodes; each record is
//! mapped at the node that handles it and wrapped once per enclosing group on
//! its way back to the root, which commits it.

pub mod group;
pub mod handler;
pub mod mapper;
pub mod options;

pub use group::GroupHandler;
pub use handler::SinkHandler;
pub use mapper::{map_any, map_attr, map_attrs, ERROR_MARKER};
pub use options::{EmptyGroupPolicy, HandlerConfig, HandlerOptions};
