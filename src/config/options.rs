//! Recognised options and their defaults.

use std::time::Duration;

use log::warn;

use crate::{
    record::{HostLookup, LogPattern},
    store::{ConnectParams, DispatchTarget, TimePrecision, Transport},
};

use super::ConfigError;

/// Series name used when none is configured.
pub const DEFAULT_SERIES_NAME: &str = "accessLogs";

/// Every option understood by the forwarder.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessLogConfig {
    /// Endpoint of the store, e.g. `http://localhost:8086/`.
    pub connection_url: String,
    pub connection_name: String,
    pub connection_password: String,
    /// Target database for connection-oriented writes.
    pub database_name: Option<String>,
    pub series_name: String,
    pub pattern: LogPattern,
    pub transport: Transport,
    /// Target port for datagram writes.
    pub udp_port: Option<u16>,
    pub resolve_hosts: bool,
    pub request_attributes_enabled: bool,
    /// Bound on establishing the HTTP connection; writes are unbounded.
    pub connect_timeout: Option<Duration>,
}

impl Default for AccessLogConfig {
    fn default() -> Self {
        Self {
            connection_url: String::new(),
            connection_name: String::new(),
            connection_password: String::new(),
            database_name: None,
            series_name: DEFAULT_SERIES_NAME.to_owned(),
            pattern: LogPattern::Common,
            transport: Transport::Tcp,
            udp_port: None,
            resolve_hosts: false,
            request_attributes_enabled: true,
            connect_timeout: None,
        }
    }
}

/// Boolean options accept `true` in any case; anything else is false.
fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

impl AccessLogConfig {
    /// Set an option by its configuration-file name.
    ///
    /// Names follow the attribute names hosts use in their server
    /// configuration (`connectionURL`, `udpPort`, ...).
    pub fn apply_property(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            option: name.to_owned(),
            value: value.to_owned(),
        };
        match name {
            "connectionURL" => self.connection_url = value.trim().to_owned(),
            "connectionName" => self.connection_name = value.to_owned(),
            "connectionPassword" => self.connection_password = value.to_owned(),
            "databaseName" => self.database_name = Some(value.trim().to_owned()),
            "seriesName" => self.series_name = value.trim().to_owned(),
            "pattern" => {
                if !LogPattern::is_recognised(value) {
                    warn!("InfluxAccessLog: unrecognised pattern {value:?}; using common");
                }
                self.pattern = LogPattern::from_name(value);
            }
            "transport" => {
                if !Transport::is_recognised(value) {
                    warn!("InfluxAccessLog: unrecognised transport {value:?}; using TCP");
                }
                self.transport = Transport::from_name(value);
            }
            "udpPort" => self.udp_port = Some(value.trim().parse().map_err(|_| invalid())?),
            "resolveHosts" => self.resolve_hosts = parse_flag(value),
            "requestAttributesEnabled" => self.request_attributes_enabled = parse_flag(value),
            "connectTimeoutMs" => {
                let millis: u64 = value.trim().parse().map_err(|_| invalid())?;
                self.connect_timeout = Some(Duration::from_millis(millis));
            }
            _ => return Err(ConfigError::UnknownOption(name.to_owned())),
        }
        Ok(())
    }

    /// Apply a sequence of `(name, value)` pairs in order.
    pub fn apply_properties<'a>(
        &mut self,
        properties: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<(), ConfigError> {
        properties
            .into_iter()
            .try_for_each(|(name, value)| self.apply_property(name, value))
    }

    /// Check that the options describe a usable forwarder.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.connection_url.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "connectionURL must be set".into(),
            ));
        }
        if self.series_name.is_empty() {
            return Err(ConfigError::InvalidConfig("seriesName must not be empty".into()));
        }
        self.dispatch_target().map(|_| ())
    }

    /// Resolve where records are written.
    pub fn dispatch_target(&self) -> Result<DispatchTarget, ConfigError> {
        match self.transport {
            Transport::Tcp => match self.database_name.as_deref() {
                Some(name) if !name.is_empty() => Ok(DispatchTarget::Database {
                    name: name.to_owned(),
                    precision: TimePrecision::Milliseconds,
                }),
                _ => Err(ConfigError::InvalidConfig(
                    "databaseName is required for the TCP transport".into(),
                )),
            },
            Transport::Udp => match self.udp_port {
                Some(port) if port != 0 => Ok(DispatchTarget::Datagram { port }),
                _ => Err(ConfigError::InvalidConfig(
                    "udpPort is required for the UDP transport".into(),
                )),
            },
        }
    }

    pub fn connect_params(&self) -> ConnectParams {
        ConnectParams {
            url: self.connection_url.clone(),
            user: self.connection_name.clone(),
            password: self.connection_password.clone(),
            database: self.database_name.clone().filter(|name| !name.is_empty()),
        }
    }

    pub fn host_lookup(&self) -> HostLookup {
        HostLookup {
            resolve_hosts: self.resolve_hosts,
            request_attributes_enabled: self.request_attributes_enabled,
        }
    }
}

impl std::fmt::Debug for AccessLogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessLogConfig")
            .field("connection_url", &self.connection_url)
            .field("connection_name", &self.connection_name)
            .field("connection_password", &"<redacted>")
            .field("database_name", &self.database_name)
            .field("series_name", &self.series_name)
            .field("pattern", &self.pattern)
            .field("transport", &self.transport)
            .field("udp_port", &self.udp_port)
            .field("resolve_hosts", &self.resolve_hosts)
            .field("request_attributes_enabled", &self.request_attributes_enabled)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}
