//! The forwarder component: logging entry point and lifecycle.
//!
//! [`InfluxAccessLog`] is built by
//! [`AccessLogBuilder`](crate::config::AccessLogBuilder), started once by the
//! host, and then called from any number of worker threads with each
//! completed request. Its lifecycle is an explicit state machine
//! ([`LifecycleState`]); failures on the logging path go to a
//! [`DiagnosticSink`] rather than back to the caller.

mod diagnostics;
mod handler;
mod lifecycle;


pub use diagnostics::{DiagnosticSink, LogDiagnostics};
pub use handler::{AccessLog, InfluxAccessLog};
pub use lifecycle::{LifecycleError, LifecycleState};
