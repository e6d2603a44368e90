//! Destination for write failures.

use log::error;

use crate::error::DispatchError;

/// Receives failures absorbed by the logging path.
///
/// Failures never reach the request that triggered them; a sink is the only
/// place they surface.
pub trait DiagnosticSink: Send + Sync {
    /// Called once per dropped record with the error that caused the drop.
    fn write_failed(&self, error: &DispatchError);
}

/// Reports failures through the `log` facade at error level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogDiagnostics;

impl DiagnosticSink for LogDiagnostics {
    fn write_failed(&self, error: &DispatchError) {
        error!("InfluxAccessLog failed to write access record: {error}");
    }
}
