//! The forwarder invoked by the host for every completed request.

use std::sync::Arc;

use log::{debug, info};
use parking_lot::Mutex;

use crate::{
    config::{AccessLogConfig, ConfigError},
    error::DispatchError,
    record::{AccessFields, AccessRecord, HostLookup, LogPattern, build_record},
    request::{RequestView, ResponseView},
    store::{ConnectParams, DispatchTarget, StoreConnection, StoreConnector, dispatch},
};

use super::{
    diagnostics::DiagnosticSink,
    lifecycle::{LifecycleError, LifecycleState},
};

/// Host-facing access-log interface.
pub trait AccessLog: Send + Sync {
    /// Record one completed request. Never fails and never panics on store
    /// errors.
    fn log(&self, request: &dyn RequestView, response: &dyn ResponseView);

    /// Whether request attributes take precedence over live lookups.
    fn request_attributes_enabled(&self) -> bool;
}

/// Options resolved once when the forwarder is built.
#[derive(Debug)]
struct Settings {
    series: String,
    pattern: LogPattern,
    lookup: HostLookup,
    target: DispatchTarget,
    connect: ConnectParams,
}

/// Forwards access-log records to a time-series store.
///
/// One instance is shared by every worker of the host. Records are written
/// one at a time through a single store connection held behind a mutex; a
/// failed write drops the record, reports the error to the
/// [`DiagnosticSink`], and closes the connection so the next record reopens
/// it.
pub struct InfluxAccessLog {
    settings: Settings,
    connector: Arc<dyn StoreConnector>,
    diagnostics: Arc<dyn DiagnosticSink>,
    /// Held for the whole of `start` and `stop` so they never interleave.
    lifecycle: Mutex<()>,
    state: Mutex<LifecycleState>,
    connection: Mutex<StoreConnection>,
}

impl InfluxAccessLog {
    pub(crate) fn from_parts(
        config: &AccessLogConfig,
        connector: Arc<dyn StoreConnector>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Result<Self, ConfigError> {
        let settings = Settings {
            series: config.series_name.clone(),
            pattern: config.pattern,
            lookup: config.host_lookup(),
            target: config.dispatch_target()?,
            connect: config.connect_params(),
        };
        Ok(Self {
            settings,
            connector,
            diagnostics,
            lifecycle: Mutex::new(()),
            state: Mutex::new(LifecycleState::Stopped),
            connection: Mutex::new(StoreConnection::Closed),
        })
    }

    /// Open the store connection and begin accepting log calls.
    ///
    /// A connection failure leaves the forwarder stopped.
    pub fn start(&self) -> Result<(), LifecycleError> {
        let _lifecycle = self.lifecycle.lock();
        self.state.lock().transition(LifecycleState::Starting)?;
        let opened = self
            .connection
            .lock()
            .open(self.connector.as_ref(), &self.settings.connect)
            .map(|_| ());
        let mut state = self.state.lock();
        match opened {
            Ok(()) => {
                state.transition(LifecycleState::Available)?;
                info!(
                    "InfluxAccessLog started: series {} via {}",
                    self.settings.series,
                    self.settings.target.transport()
                );
                Ok(())
            }
            Err(err) => {
                state.transition(LifecycleState::Stopped)?;
                Err(LifecycleError::Start(err))
            }
        }
    }

    /// Stop accepting log calls and drop the store connection.
    ///
    /// Waits for a concurrent `start` to finish, then closes whatever it
    /// opened. Stopping a stopped forwarder does nothing.
    pub fn stop(&self) -> Result<(), LifecycleError> {
        let _lifecycle = self.lifecycle.lock();
        {
            let mut state = self.state.lock();
            if *state == LifecycleState::Stopped {
                return Ok(());
            }
            state.transition(LifecycleState::Stopping)?;
        }
        self.connection.lock().close();
        self.state.lock().transition(LifecycleState::Stopped)?;
        info!("InfluxAccessLog stopped");
        Ok(())
    }

    pub fn state(&self) -> LifecycleState {
        *self.state.lock()
    }

    pub fn is_available(&self) -> bool {
        self.state().is_available()
    }

    /// Whether a store connection is currently held.
    pub fn is_connected(&self) -> bool {
        self.connection.lock().is_open()
    }

    pub fn pattern(&self) -> LogPattern {
        self.settings.pattern
    }

    pub fn series_name(&self) -> &str {
        &self.settings.series
    }

    pub fn dispatch_target(&self) -> &DispatchTarget {
        &self.settings.target
    }

    /// Hand the request to the next pipeline stage untouched.
    pub fn invoke<Req, Resp, T>(
        &self,
        request: Req,
        response: Resp,
        next: impl FnOnce(Req, Resp) -> T,
    ) -> T {
        next(request, response)
    }

    /// Build the record for a completed request without sending it.
    pub fn build_record<Q, S>(&self, request: &Q, response: &S) -> AccessRecord
    where
        Q: RequestView + ?Sized,
        S: ResponseView + ?Sized,
    {
        let pattern = self.settings.pattern;
        let fields = AccessFields::extract(request, response, pattern, self.settings.lookup);
        build_record(pattern, &fields)
    }

    /// Record one completed request.
    ///
    /// Does nothing unless the forwarder is available. Store failures are
    /// reported to the diagnostic sink and never returned.
    pub fn log_request<Q, S>(&self, request: &Q, response: &S)
    where
        Q: RequestView + ?Sized,
        S: ResponseView + ?Sized,
    {
        if !self.is_available() {
            return;
        }
        let record = self.build_record(request, response);

        let mut connection = self.connection.lock();
        // A concurrent stop may have closed the connection while this call
        // waited for the lock.
        if !self.is_available() {
            debug!("InfluxAccessLog dropped record: stopping");
            return;
        }
        if let Err(err) = self.write_locked(&mut connection, &record) {
            self.diagnostics.write_failed(&err);
            connection.close();
        }
    }

    fn write_locked(
        &self,
        connection: &mut StoreConnection,
        record: &AccessRecord,
    ) -> Result<(), DispatchError> {
        let session = connection.open(self.connector.as_ref(), &self.settings.connect)?;
        dispatch(session, &self.settings.series, record, &self.settings.target)?;
        Ok(())
    }
}

impl AccessLog for InfluxAccessLog {
    fn log(&self, request: &dyn RequestView, response: &dyn ResponseView) {
        self.log_request(request, response);
    }

    fn request_attributes_enabled(&self) -> bool {
        self.settings.lookup.request_attributes_enabled
    }
}

impl std::fmt::Debug for InfluxAccessLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InfluxAccessLog")
            .field("series", &self.settings.series)
            .field("pattern", &self.settings.pattern)
            .field("target", &self.settings.target)
            .field("state", &self.state())
            .finish()
    }
}
