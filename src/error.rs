//! Error types shared by the store, dispatch, and lifecycle layers.

use std::io;

use thiserror::Error;

/// Failure to establish or authenticate the link to the store.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The configured URL could not be interpreted.
    #[error("invalid store URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    /// The endpoint did not answer.
    #[error("store at {url} is unreachable: {reason}")]
    Unreachable { url: String, reason: String },
    /// The endpoint answered but refused the credentials.
    #[error("store at {url} rejected credentials for user {user:?}")]
    Rejected { url: String, user: String },
    /// The endpoint answered with an unexpected status.
    #[error("store at {url} answered HTTP {status} while connecting")]
    Status { url: String, status: u16 },
}

/// Failure to transmit a single record.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The store answered the write with a non-success status.
    #[error("store answered HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// The HTTP request never produced a response.
    #[error("store transport failed: {0}")]
    Transport(String),
    /// Sending the datagram failed.
    #[error("datagram write failed: {0}")]
    Datagram(#[from] io::Error),
    /// The record could not be encoded.
    #[error("record serialisation failed: {0}")]
    Serialise(#[from] serde_json::Error),
}

/// Anything that can go wrong between taking the lock and finishing a write.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    #[error(transparent)]
    Write(#[from] WriteError),
}
