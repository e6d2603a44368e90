//! Fixtures wiring the forwarder to a [`StubStore`] and a recording
//! diagnostic sink.

use std::sync::Arc;

use influx_access_log::{AccessLogBuilder, DiagnosticSink, DispatchError};
use parking_lot::Mutex;
use rstest::fixture;

use super::stub_store::StubStore;

/// Diagnostic sink keeping the rendered text of every reported failure.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    messages: Mutex<Vec<String>>,
}

impl RecordingDiagnostics {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl DiagnosticSink for RecordingDiagnostics {
    fn write_failed(&self, error: &DispatchError) {
        self.messages.lock().push(error.to_string());
    }
}

#[fixture]
pub fn store() -> Arc<StubStore> {
    StubStore::new()
}

/// Builder for a TCP forwarder writing into `tomcatLogs` through `store`.
pub fn tcp_builder(
    store: &Arc<StubStore>,
    diagnostics: &Arc<RecordingDiagnostics>,
) -> AccessLogBuilder {
    AccessLogBuilder::new()
        .with_connection_url("http://localhost:8086/")
        .with_connection_name("root")
        .with_connection_password("root")
        .with_database_name("tomcatLogs")
        .with_connector(store.connector())
        .with_diagnostics(Arc::clone(diagnostics) as Arc<dyn DiagnosticSink>)
}

/// Builder for a UDP forwarder sending datagrams to `port` through `store`.
pub fn udp_builder(
    store: &Arc<StubStore>,
    diagnostics: &Arc<RecordingDiagnostics>,
    port: u16,
) -> AccessLogBuilder {
    AccessLogBuilder::new()
        .with_connection_url("http://localhost:8086/")
        .with_udp(port)
        .with_connector(store.connector())
        .with_diagnostics(Arc::clone(diagnostics) as Arc<dyn DiagnosticSink>)
}
