//! Connection state shared by every logging call.

use log::debug;

use crate::error::ConnectionError;

use super::{ConnectParams, StoreConnector, StoreSession};

/// Liveness of the link to the store.
///
/// A session is assumed usable until a write through it fails, at which
/// point the caller closes it and the next use reopens.
#[derive(Debug, Default)]
pub enum StoreConnection {
    #[default]
    Closed,
    Open(Box<dyn StoreSession>),
}

impl StoreConnection {
    /// Open a session unless one is already held, returning the held session.
    pub fn open(
        &mut self,
        connector: &dyn StoreConnector,
        params: &ConnectParams,
    ) -> Result<&dyn StoreSession, ConnectionError> {
        match self {
            Self::Open(session) => Ok(&**session),
            Self::Closed => {
                let session = connector.connect(params)?;
                debug!("InfluxAccessLog connected to {}", params.url);
                *self = Self::Open(session);
                self.open(connector, params)
            }
        }
    }

    /// Drop the session. Nothing is sent to the store.
    pub fn close(&mut self) {
        if let Self::Open(_) = std::mem::take(self) {
            debug!("InfluxAccessLog connection closed");
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }
}
