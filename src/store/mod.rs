//! Access to the remote time-series store.
//!
//! The store is reached through two seams: a [`StoreConnector`] that opens a
//! [`StoreSession`], and the session's two write verbs. [`InfluxConnector`]
//! talks to InfluxDB's series API over HTTP and UDP; hosts and tests may
//! supply their own implementations.
//!
//! [`StoreConnection`] holds the single connection state shared by every
//! logging call, and [`dispatch`] picks the write verb for a transport.

mod connection;
mod dispatch;
mod endpoint;
mod influx;


pub use connection::StoreConnection;
pub use dispatch::{DispatchTarget, Transport, dispatch};
pub use influx::{InfluxConnector, InfluxSession};

use crate::{
    error::{ConnectionError, WriteError},
    record::AccessRecord,
};

/// Resolution of timestamps the store assigns to written points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimePrecision {
    Seconds,
    #[default]
    Milliseconds,
    Microseconds,
}

impl TimePrecision {
    /// Query-string value understood by the store.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Seconds => "s",
            Self::Milliseconds => "ms",
            Self::Microseconds => "u",
        }
    }
}

/// Credentials and endpoint used to open a session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectParams {
    pub url: String,
    pub user: String,
    pub password: String,
    /// Database used to verify credentials, when known.
    pub database: Option<String>,
}

/// Opens sessions against the store.
pub trait StoreConnector: Send + Sync {
    /// Establish a session, failing when the store is unreachable or refuses
    /// the credentials.
    fn connect(&self, params: &ConnectParams) -> Result<Box<dyn StoreSession>, ConnectionError>;
}

/// An open link to the store exposing its two write verbs.
pub trait StoreSession: Send + std::fmt::Debug {
    /// Write `record` as one point of `series` into `database`.
    fn write(
        &self,
        database: &str,
        precision: TimePrecision,
        series: &str,
        record: &AccessRecord,
    ) -> Result<(), WriteError>;

    /// Send `record` as one point of `series` in a single datagram to `port`.
    fn write_datagram(
        &self,
        port: u16,
        series: &str,
        record: &AccessRecord,
    ) -> Result<(), WriteError>;
}
