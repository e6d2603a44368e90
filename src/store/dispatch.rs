//! Transport selection for a built record.

use std::fmt;

use crate::{error::WriteError, record::AccessRecord};

use super::{StoreSession, TimePrecision};

/// Wire transport named by the `transport` option.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Transport {
    /// Connection-oriented writes into a named database.
    #[default]
    Tcp,
    /// Fire-and-forget datagrams to a fixed port.
    Udp,
}

impl Transport {
    /// Resolve a transport name. Only the exact literal `UDP` selects the
    /// datagram transport.
    pub fn from_name(name: &str) -> Self {
        if name == "UDP" { Self::Udp } else { Self::Tcp }
    }

    pub fn is_recognised(name: &str) -> bool {
        matches!(name, "TCP" | "UDP")
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tcp => "TCP",
            Self::Udp => "UDP",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a record goes once the transport is resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchTarget {
    Database {
        name: String,
        precision: TimePrecision,
    },
    Datagram {
        port: u16,
    },
}

impl DispatchTarget {
    pub fn transport(&self) -> Transport {
        match self {
            Self::Database { .. } => Transport::Tcp,
            Self::Datagram { .. } => Transport::Udp,
        }
    }
}

/// Write `record` as one point of `series` using the verb matching `target`.
pub fn dispatch(
    session: &dyn StoreSession,
    series: &str,
    record: &AccessRecord,
    target: &DispatchTarget,
) -> Result<(), WriteError> {
    match target {
        DispatchTarget::Database { name, precision } => {
            session.write(name, *precision, series, record)
        }
        DispatchTarget::Datagram { port } => session.write_datagram(*port, series, record),
    }
}
