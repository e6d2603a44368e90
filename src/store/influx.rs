//! InfluxDB series API over HTTP, plus its UDP listener.
//!
//! Opening a session pings the server and, when a database and user are
//! known, asks the server to authenticate them. Writes post a one-point JSON
//! series; datagrams carry the same payload to the UDP listener on the host
//! named by the connection URL.

use std::{
    io,
    net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket},
    sync::Arc,
    time::Duration,
};

use native_tls::TlsConnector;
use ureq::{Agent, AgentBuilder};

use crate::{
    error::{ConnectionError, WriteError},
    record::{AccessRecord, serialise_series},
};

use super::{ConnectParams, StoreConnector, StoreSession, TimePrecision, endpoint::Endpoint};

/// Opens [`InfluxSession`]s.
#[derive(Clone, Debug, Default)]
pub struct InfluxConnector {
    connect_timeout: Option<Duration>,
}

impl InfluxConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound the time spent establishing TCP connections. Writes themselves
    /// are never bounded.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    fn agent(&self, endpoint: &Endpoint) -> Result<Agent, ConnectionError> {
        let mut builder = AgentBuilder::new();
        if let Some(timeout) = self.connect_timeout {
            builder = builder.timeout_connect(timeout);
        }
        if endpoint.secure {
            let connector = TlsConnector::new().map_err(|err| ConnectionError::Unreachable {
                url: endpoint.base.clone(),
                reason: format!("TLS setup failed: {err}"),
            })?;
            builder = builder.tls_connector(Arc::new(connector));
        }
        Ok(builder.build())
    }
}

impl StoreConnector for InfluxConnector {
    fn connect(&self, params: &ConnectParams) -> Result<Box<dyn StoreSession>, ConnectionError> {
        let endpoint = Endpoint::parse(&params.url)?;
        let session = InfluxSession {
            agent: self.agent(&endpoint)?,
            endpoint,
            user: params.user.clone(),
            password: params.password.clone(),
        };
        session.ping()?;
        if let Some(database) = params.database.as_deref()
            && !params.user.is_empty()
        {
            session.authenticate(database)?;
        }
        Ok(Box::new(session))
    }
}

/// An authenticated link to one InfluxDB server.
pub struct InfluxSession {
    agent: Agent,
    endpoint: Endpoint,
    user: String,
    password: String,
}

impl InfluxSession {
    fn ping(&self) -> Result<(), ConnectionError> {
        let url = self.endpoint.join("ping");
        match self.agent.get(&url).call() {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(status, _)) => Err(ConnectionError::Status {
                url: self.endpoint.base.clone(),
                status,
            }),
            Err(ureq::Error::Transport(err)) => Err(ConnectionError::Unreachable {
                url: self.endpoint.base.clone(),
                reason: err.to_string(),
            }),
        }
    }

    fn authenticate(&self, database: &str) -> Result<(), ConnectionError> {
        let url = self.endpoint.authenticate_url(database);
        let request = self
            .agent
            .get(&url)
            .query("u", &self.user)
            .query("p", &self.password);
        match request.call() {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(401 | 403, _)) => Err(ConnectionError::Rejected {
                url: self.endpoint.base.clone(),
                user: self.user.clone(),
            }),
            Err(ureq::Error::Status(status, _)) => Err(ConnectionError::Status {
                url: self.endpoint.base.clone(),
                status,
            }),
            Err(ureq::Error::Transport(err)) => Err(ConnectionError::Unreachable {
                url: self.endpoint.base.clone(),
                reason: err.to_string(),
            }),
        }
    }

    fn datagram_addr(&self, port: u16) -> io::Result<SocketAddr> {
        (self.endpoint.host.as_str(), port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no address for {}:{port}", self.endpoint.host),
                )
            })
    }
}

impl StoreSession for InfluxSession {
    fn write(
        &self,
        database: &str,
        precision: TimePrecision,
        series: &str,
        record: &AccessRecord,
    ) -> Result<(), WriteError> {
        let payload = serialise_series(series, record)?;
        let request = self
            .agent
            .post(&self.endpoint.series_url(database))
            .query("u", &self.user)
            .query("p", &self.password)
            .query("time_precision", precision.as_query_value())
            .set("Content-Type", "application/json");
        match request.send_bytes(&payload) {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(status, response)) => Err(WriteError::Status {
                status,
                body: response.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(err)) => Err(WriteError::Transport(err.to_string())),
        }
    }

    fn write_datagram(
        &self,
        port: u16,
        series: &str,
        record: &AccessRecord,
    ) -> Result<(), WriteError> {
        let payload = serialise_series(series, record)?;
        let target = self.datagram_addr(port)?;
        let local: SocketAddr = if target.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(local)?;
        let sent = socket.send_to(&payload, target)?;
        if sent != payload.len() {
            return Err(WriteError::Datagram(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("datagram truncated: sent {sent} of {} bytes", payload.len()),
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for InfluxSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InfluxSession")
            .field("endpoint", &self.endpoint.base)
            .field("user", &self.user)
            .finish()
    }
}
