//! Access-log forwarding to a time-series store.
//!
//! For every completed request the host calls
//! [`InfluxAccessLog::log_request`], which extracts the access-log fields,
//! lays them out as a `common` or `combined` [`AccessRecord`], and writes the
//! record to an InfluxDB series either over HTTP into a named database or as
//! a UDP datagram. Writes are serialised through one shared connection;
//! failures are reported and the record dropped.
//!
//! ```no_run
//! use influx_access_log::{AccessLogBuilder, CompletedRequest, CompletedResponse, LogPattern};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let access_log = AccessLogBuilder::new()
//!     .with_connection_url("http://localhost:8086/")
//!     .with_connection_name("root")
//!     .with_connection_password("root")
//!     .with_database_name("tomcatLogs")
//!     .with_pattern(LogPattern::Combined)
//!     .build()?;
//! access_log.start()?;
//!
//! let request = CompletedRequest::new("10.0.0.5", "/api/x").with_method("GET");
//! access_log.log_request(&request, &CompletedResponse::new(200, 512));
//!
//! access_log.stop()?;
//! # Ok(())
//! # }
//! ```

pub mod access_log;
pub mod config;
pub mod error;
pub mod record;
pub mod request;
pub mod store;

pub use access_log::{
    AccessLog, DiagnosticSink, InfluxAccessLog, LifecycleError, LifecycleState, LogDiagnostics,
};
pub use config::{AccessLogBuilder, AccessLogConfig, ConfigError, load_ini_file};
pub use error::{ConnectionError, DispatchError, WriteError};
pub use record::{AccessFields, AccessRecord, FieldValue, HostLookup, LogPattern, build_record};
pub use request::{
    CompletedRequest, CompletedResponse, REMOTE_ADDR_ATTRIBUTE, REMOTE_HOST_ATTRIBUTE,
    RequestView, ResponseView,
};
pub use store::{
    ConnectParams, DispatchTarget, InfluxConnector, StoreConnection, StoreConnector,
    StoreSession, TimePrecision, Transport,
};
