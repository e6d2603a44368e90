//! Field extraction and record construction.

use crate::request::{REMOTE_ADDR_ATTRIBUTE, REMOTE_HOST_ATTRIBUTE, RequestView, ResponseView};

use super::{AccessRecord, FieldValue, LogPattern};

/// How the `remoteHost` column is sourced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HostLookup {
    /// Log the peer hostname instead of its address.
    pub resolve_hosts: bool,
    /// Prefer an attribute recorded earlier in the pipeline over asking the
    /// request directly.
    pub request_attributes_enabled: bool,
}

impl Default for HostLookup {
    fn default() -> Self {
        Self {
            resolve_hosts: false,
            request_attributes_enabled: true,
        }
    }
}

impl HostLookup {
    fn remote_host(self, request: &(impl RequestView + ?Sized)) -> String {
        let attribute = if self.resolve_hosts {
            REMOTE_HOST_ATTRIBUTE
        } else {
            REMOTE_ADDR_ATTRIBUTE
        };
        if self.request_attributes_enabled
            && let Some(value) = request.attribute(attribute)
        {
            return value.to_owned();
        }
        if self.resolve_hosts {
            request.remote_host().into_owned()
        } else {
            request.remote_addr().into_owned()
        }
    }
}

/// Normalised fields of a completed request.
///
/// The `combined`-only fields stay empty unless extraction was asked for the
/// combined layout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessFields {
    pub remote_host: String,
    pub user_name: String,
    pub query: String,
    pub status: u16,
    pub bytes: u64,
    pub virtual_host: String,
    pub method: String,
    pub referer: String,
    pub user_agent: String,
}

impl AccessFields {
    /// Pull the fields needed by `pattern` out of a request/response pair.
    pub fn extract(
        request: &(impl RequestView + ?Sized),
        response: &(impl ResponseView + ?Sized),
        pattern: LogPattern,
        lookup: HostLookup,
    ) -> Self {
        let mut fields = Self {
            remote_host: lookup.remote_host(request),
            user_name: request.remote_user().unwrap_or_default().to_owned(),
            query: request.request_uri().to_owned(),
            status: response.status(),
            bytes: clamp_bytes(response.bytes_written()),
            ..Self::default()
        };
        if pattern == LogPattern::Combined {
            fields.virtual_host = request.server_name().to_owned();
            fields.method = request.method().to_owned();
            fields.referer = request.header("referer").unwrap_or_default().to_owned();
            fields.user_agent = request.header("user-agent").unwrap_or_default().to_owned();
        }
        fields
    }
}

/// Negative byte counts mean "unknown" and are logged as zero.
pub(crate) fn clamp_bytes(bytes: i64) -> u64 {
    u64::try_from(bytes).unwrap_or(0)
}

/// Lay `fields` out in the column order of `pattern`.
pub fn build_record(pattern: LogPattern, fields: &AccessFields) -> AccessRecord {
    let bytes = i64::try_from(fields.bytes).unwrap_or(i64::MAX);
    let mut values: Vec<FieldValue> = Vec::with_capacity(pattern.columns().len());
    values.push(fields.remote_host.as_str().into());
    values.push(fields.user_name.as_str().into());
    values.push(fields.query.as_str().into());
    values.push(i64::from(fields.status).into());
    values.push(bytes.into());
    if pattern == LogPattern::Combined {
        values.push(fields.virtual_host.as_str().into());
        values.push(fields.method.as_str().into());
        values.push(fields.referer.as_str().into());
        values.push(fields.user_agent.as_str().into());
    }
    AccessRecord::new(pattern, values)
}
