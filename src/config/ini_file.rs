//! Loading options from INI files.
//!
//! A file holds one or more sections of `option = value` pairs using the
//! option names accepted by [`AccessLogConfig::apply_property`]. Keys outside
//! the chosen section are ignored.

use std::{fs, path::Path};

use encoding_rs::{Encoding, UTF_8};
use ini::Ini;

use super::{AccessLogConfig, ConfigError};

/// Read `section` of the INI file at `path` into a configuration.
///
/// `section` of `None` selects the keys before the first section header.
/// `encoding` names the file's text encoding (any WHATWG label); UTF-8 is
/// assumed when absent.
pub fn load_ini_file(
    path: impl AsRef<Path>,
    section: Option<&str>,
    encoding: Option<&str>,
) -> Result<AccessLogConfig, ConfigError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let bytes = read_file_bytes(path, &display)?;
    let text = decode_contents(&bytes, encoding, &display)?;
    parse_ini_str(&display, &text, section)
}

/// Parse INI text; `origin` names the source in error messages.
pub fn parse_ini_str(
    origin: &str,
    text: &str,
    section: Option<&str>,
) -> Result<AccessLogConfig, ConfigError> {
    let ini = Ini::load_from_str(text).map_err(|err| ConfigError::Ini {
        path: origin.to_owned(),
        reason: err.to_string(),
    })?;
    let properties = ini
        .section(section)
        .ok_or_else(|| ConfigError::MissingSection {
            path: origin.to_owned(),
            section: section.unwrap_or("general").to_owned(),
        })?;
    let mut config = AccessLogConfig::default();
    config.apply_properties(properties.iter())?;
    Ok(config)
}

fn read_file_bytes(path: &Path, display: &str) -> Result<Vec<u8>, ConfigError> {
    fs::read(path).map_err(|source| ConfigError::Io {
        path: display.to_owned(),
        source,
    })
}

fn decode_contents(
    bytes: &[u8],
    encoding: Option<&str>,
    display: &str,
) -> Result<String, ConfigError> {
    let encoding = match encoding {
        Some(label) => Encoding::for_label(label.trim().to_ascii_lowercase().as_bytes())
            .ok_or_else(|| ConfigError::UnknownEncoding(label.to_owned()))?,
        None => UTF_8,
    };
    let (decoded, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(ConfigError::Decode {
            path: display.to_owned(),
            encoding: encoding.name().to_owned(),
        });
    }
    Ok(decoded.into_owned())
}
