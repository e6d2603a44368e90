//! Builder for [`InfluxAccessLog`](crate::InfluxAccessLog).

use std::{path::Path, sync::Arc, time::Duration};

use crate::{
    access_log::{DiagnosticSink, InfluxAccessLog, LogDiagnostics},
    record::LogPattern,
    store::{InfluxConnector, StoreConnector, Transport},
};

use super::{AccessLogConfig, ConfigError, load_ini_file};

macro_rules! string_setter {
    ($(#[$meta:meta])* $fn_name:ident, $field:ident) => {
        $(#[$meta])*
        pub fn $fn_name(mut self, value: impl Into<String>) -> Self {
            self.config.$field = value.into();
            self
        }
    };
}

macro_rules! flag_setter {
    ($(#[$meta:meta])* $fn_name:ident, $field:ident) => {
        $(#[$meta])*
        pub fn $fn_name(mut self, value: bool) -> Self {
            self.config.$field = value;
            self
        }
    };
}

/// Builder for constructing [`InfluxAccessLog`] instances.
#[derive(Clone, Default)]
pub struct AccessLogBuilder {
    config: AccessLogConfig,
    connector: Option<Arc<dyn StoreConnector>>,
    diagnostics: Option<Arc<dyn DiagnosticSink>>,
}

impl AccessLogBuilder {
    /// Create a builder holding the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing option set.
    pub fn from_config(config: AccessLogConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Start from the options in `section` of an INI file.
    pub fn from_ini_file(
        path: impl AsRef<Path>,
        section: Option<&str>,
        encoding: Option<&str>,
    ) -> Result<Self, ConfigError> {
        load_ini_file(path, section, encoding).map(Self::from_config)
    }

    string_setter!(
        #[doc = "Set the store endpoint (required)."]
        with_connection_url,
        connection_url
    );
    string_setter!(
        #[doc = "Set the user name used to open the connection."]
        with_connection_name,
        connection_name
    );
    string_setter!(
        #[doc = "Set the password used to open the connection."]
        with_connection_password,
        connection_password
    );
    string_setter!(
        #[doc = "Set the series name tagging every record."]
        with_series_name,
        series_name
    );
    flag_setter!(
        #[doc = "Log peer hostnames instead of addresses."]
        with_resolve_hosts,
        resolve_hosts
    );
    flag_setter!(
        #[doc = "Prefer request attributes recorded earlier in the pipeline."]
        with_request_attributes_enabled,
        request_attributes_enabled
    );

    /// Set the database for connection-oriented writes.
    pub fn with_database_name(mut self, database: impl Into<String>) -> Self {
        self.config.database_name = Some(database.into());
        self
    }

    pub fn with_pattern(mut self, pattern: LogPattern) -> Self {
        self.config.pattern = pattern;
        self
    }

    /// Write over connection-oriented HTTP (the default).
    pub fn with_tcp(mut self) -> Self {
        self.config.transport = Transport::Tcp;
        self
    }

    /// Write datagrams to `port` on the store host.
    pub fn with_udp(mut self, port: u16) -> Self {
        self.config.transport = Transport::Udp;
        self.config.udp_port = Some(port);
        self
    }

    /// Bound the time spent establishing connections.
    pub fn with_connect_timeout_ms(mut self, millis: u64) -> Self {
        self.config.connect_timeout = Some(Duration::from_millis(millis));
        self
    }

    /// Set an option by its configuration-file name.
    pub fn with_property(mut self, name: &str, value: &str) -> Result<Self, ConfigError> {
        self.config.apply_property(name, value)?;
        Ok(self)
    }

    /// Replace the store client, e.g. with an in-process stub.
    pub fn with_connector(mut self, connector: Arc<dyn StoreConnector>) -> Self {
        self.connector = Some(connector);
        self
    }

    /// Replace the facility that receives write failures.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    pub fn config(&self) -> &AccessLogConfig {
        &self.config
    }

    /// Validate the options and build a stopped forwarder.
    pub fn build(&self) -> Result<InfluxAccessLog, ConfigError> {
        self.config.validate()?;
        let connector = self.connector.clone().unwrap_or_else(|| {
            let mut connector = InfluxConnector::new();
            if let Some(timeout) = self.config.connect_timeout {
                connector = connector.with_connect_timeout(timeout);
            }
            Arc::new(connector)
        });
        let diagnostics = self
            .diagnostics
            .clone()
            .unwrap_or_else(|| Arc::new(LogDiagnostics));
        InfluxAccessLog::from_parts(&self.config, connector, diagnostics)
    }
}

impl std::fmt::Debug for AccessLogBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessLogBuilder")
            .field("config", &self.config)
            .field("custom_connector", &self.connector.is_some())
            .field("custom_diagnostics", &self.diagnostics.is_some())
            .finish()
    }
}
