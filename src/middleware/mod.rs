//! Middleware layer.
//!
//! Cross-cutting concerns that wrap every routed request. Currently one:
//!
//! - [`trace`]: per-request span with method, path, status, latency

mod trace;

pub(crate) use trace::trace;
