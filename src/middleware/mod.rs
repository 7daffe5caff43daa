//! Hooks that run around every handler call.
//!
//! The server only invokes middleware for requests that have already been
//! routed, so a hook never sees an unvalidated title.

mod core;
mod tracing;

pub use self::core::Middleware;
pub use self::tracing::TracingMiddleware;
