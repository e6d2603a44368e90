//! In-process store used by the integration tests.
//!
//! [`StubStore`] records every call made through its sessions and can be
//! told to refuse connections or fail writes. It also flags any two writes
//! that overlap in time, which the forwarder must never allow.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    thread,
    time::Duration,
};

use influx_access_log::{
    AccessRecord, ConnectParams, ConnectionError, StoreConnector, StoreSession, TimePrecision,
    WriteError,
};
use parking_lot::Mutex;

/// One call observed by the stub.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreCall {
    Write {
        database: String,
        precision: TimePrecision,
        series: String,
        record: AccessRecord,
    },
    Datagram {
        port: u16,
        series: String,
        record: AccessRecord,
    },
}

#[derive(Debug, Default)]
pub struct StubStore {
    connects: AtomicUsize,
    refuse_connect: AtomicBool,
    fail_writes: AtomicBool,
    in_flight: AtomicBool,
    overlapped: AtomicBool,
    write_delay: Mutex<Option<Duration>>,
    calls: Mutex<Vec<StoreCall>>,
}

impl StubStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Connector handing out sessions backed by this stub.
    pub fn connector(self: &Arc<Self>) -> Arc<dyn StoreConnector> {
        Arc::new(StubConnector(Arc::clone(self)))
    }

    pub fn refuse_connections(&self, refuse: bool) {
        self.refuse_connect.store(refuse, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Hold every write open for `delay` to widen race windows.
    pub fn set_write_delay(&self, delay: Duration) {
        *self.write_delay.lock() = Some(delay);
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().clone()
    }

    pub fn saw_overlapping_writes(&self) -> bool {
        self.overlapped.load(Ordering::SeqCst)
    }

    fn record_call(&self, call: StoreCall) -> Result<(), WriteError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            self.overlapped.store(true, Ordering::SeqCst);
        }
        let delay = *self.write_delay.lock();
        if let Some(delay) = delay {
            thread::sleep(delay);
        }
        let result = if self.fail_writes.load(Ordering::SeqCst) {
            Err(WriteError::Transport("stub store unavailable".into()))
        } else {
            self.calls.lock().push(call);
            Ok(())
        };
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }
}

struct StubConnector(Arc<StubStore>);

impl StoreConnector for StubConnector {
    fn connect(&self, params: &ConnectParams) -> Result<Box<dyn StoreSession>, ConnectionError> {
        self.0.connects.fetch_add(1, Ordering::SeqCst);
        if self.0.refuse_connect.load(Ordering::SeqCst) {
            return Err(ConnectionError::Unreachable {
                url: params.url.clone(),
                reason: "connection refused".into(),
            });
        }
        Ok(Box::new(StubSession(Arc::clone(&self.0))))
    }
}

#[derive(Debug)]
struct StubSession(Arc<StubStore>);

impl StoreSession for StubSession {
    fn write(
        &self,
        database: &str,
        precision: TimePrecision,
        series: &str,
        record: &AccessRecord,
    ) -> Result<(), WriteError> {
        self.0.record_call(StoreCall::Write {
            database: database.to_owned(),
            precision,
            series: series.to_owned(),
            record: record.clone(),
        })
    }

    fn write_datagram(
        &self,
        port: u16,
        series: &str,
        record: &AccessRecord,
    ) -> Result<(), WriteError> {
        self.0.record_call(StoreCall::Datagram {
            port,
            series: series.to_owned(),
            record: record.clone(),
        })
    }
}
