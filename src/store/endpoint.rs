//! Parsing of the configured store URL.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::error::ConnectionError;

/// Characters escaped when a database name is placed in a path segment.
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Base URL of the store plus the host used for datagrams.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Endpoint {
    /// Scheme, authority, and path prefix without a trailing slash.
    pub base: String,
    /// Host name or address, without IPv6 brackets.
    pub host: String,
    pub secure: bool,
}

impl Endpoint {
    pub fn parse(url: &str) -> Result<Self, ConnectionError> {
        let invalid = |reason: &str| ConnectionError::InvalidUrl {
            url: url.to_owned(),
            reason: reason.to_owned(),
        };
        let trimmed = url.trim();
        let (scheme, rest) = trimmed
            .split_once("://")
            .ok_or_else(|| invalid("missing scheme"))?;
        let secure = match scheme.to_ascii_lowercase().as_str() {
            "http" => false,
            "https" => true,
            _ => return Err(invalid("scheme must be http or https")),
        };
        let rest = rest.split(['?', '#']).next().unwrap_or_default();
        let (authority, path) = match rest.find('/') {
            Some(idx) => rest.split_at(idx),
            None => (rest, ""),
        };
        let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);
        let host = if let Some(bracketed) = host_port.strip_prefix('[') {
            bracketed
                .split_once(']')
                .map(|(host, _)| host)
                .ok_or_else(|| invalid("unterminated IPv6 address"))?
        } else {
            host_port.split(':').next().unwrap_or_default()
        };
        if host.is_empty() {
            return Err(invalid("missing host"));
        }
        Ok(Self {
            base: format!("{scheme}://{authority}{}", path.trim_end_matches('/')),
            host: host.to_owned(),
            secure,
        })
    }

    /// URL of `path` below the base.
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    /// URL of the series resource of `database`.
    pub fn series_url(&self, database: &str) -> String {
        self.join(&format!("db/{}/series", encode_segment(database)))
    }

    /// URL of the credential check for `database`.
    pub fn authenticate_url(&self, database: &str) -> String {
        self.join(&format!("db/{}/authenticate", encode_segment(database)))
    }
}

fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT_ENCODE_SET).to_string()
}
