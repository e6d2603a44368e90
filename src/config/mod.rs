//! Configuration for the access-log forwarder.
//!
//! [`AccessLogConfig`] holds the recognised options with their defaults.
//! Values can be set field by field, through [`AccessLogBuilder`], by name
//! with [`AccessLogConfig::apply_property`], or from an INI file with
//! [`load_ini_file`]. Validation happens once, when the builder produces an
//! [`InfluxAccessLog`](crate::InfluxAccessLog); the result is immutable.

mod builder;
mod ini_file;
mod options;


pub use builder::AccessLogBuilder;
pub use ini_file::{load_ini_file, parse_ini_str};
pub use options::{AccessLogConfig, DEFAULT_SERIES_NAME};

use std::io;

use thiserror::Error;

/// Errors raised while assembling a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The options are individually valid but do not form a usable setup.
    #[error("invalid access log configuration: {0}")]
    InvalidConfig(String),
    /// An option name is not recognised.
    #[error("unknown access log option {0:?}")]
    UnknownOption(String),
    /// An option value could not be parsed.
    #[error("invalid value {value:?} for option {option}")]
    InvalidValue { option: String, value: String },
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    /// The configuration file is not valid INI.
    #[error("{path} is invalid: {reason}")]
    Ini { path: String, reason: String },
    /// The requested text encoding is unknown.
    #[error("unknown encoding {0}")]
    UnknownEncoding(String),
    /// The file could not be decoded with the requested encoding.
    #[error("{path} is not valid {encoding}")]
    Decode { path: String, encoding: String },
    /// The requested section does not exist.
    #[error("{path} has no section [{section}]")]
    MissingSection { path: String, section: String },
}
