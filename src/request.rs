//! Read-only views of a completed request/response pair.
//!
//! The host server implements [`RequestView`] and [`ResponseView`] for its own
//! types. [`CompletedRequest`] and [`CompletedResponse`] are plain owned
//! implementations for hosts that would rather copy the handful of fields the
//! access log needs.

use std::borrow::Cow;

/// Request attribute carrying a hostname resolved earlier in the pipeline.
pub const REMOTE_HOST_ATTRIBUTE: &str = "AccessLog.RemoteHost";
/// Request attribute carrying a remote address recorded earlier in the
/// pipeline (for example by a proxy-aware filter).
pub const REMOTE_ADDR_ATTRIBUTE: &str = "AccessLog.RemoteAddr";

/// Fields of a finished request consumed by the record builder.
pub trait RequestView {
    /// Pre-computed request attribute, if the host set one.
    fn attribute(&self, name: &str) -> Option<&str>;
    /// Raw peer address.
    fn remote_addr(&self) -> Cow<'_, str>;
    /// Peer hostname, resolved on demand when the host supports it.
    fn remote_host(&self) -> Cow<'_, str>;
    /// Authenticated principal, if any.
    fn remote_user(&self) -> Option<&str>;
    /// Request URI path as received.
    fn request_uri(&self) -> &str;
    /// Server (virtual host) name the request was addressed to.
    fn server_name(&self) -> &str;
    fn method(&self) -> &str;
    /// Header value; lookups are case-insensitive.
    fn header(&self, name: &str) -> Option<&str>;
}

/// Fields of a finished response consumed by the record builder.
pub trait ResponseView {
    fn status(&self) -> u16;
    /// Total bytes written, negative when unknown.
    fn bytes_written(&self) -> i64;
}

/// Owned snapshot of a completed request.
#[derive(Clone, Debug, Default)]
pub struct CompletedRequest {
    pub remote_addr: String,
    /// Hostname the host already resolved; `None` falls back to the address.
    pub remote_hostname: Option<String>,
    pub remote_user: Option<String>,
    pub request_uri: String,
    pub server_name: String,
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub attributes: Vec<(String, String)>,
}

impl CompletedRequest {
    /// Create a snapshot for a request from `remote_addr` to `request_uri`.
    pub fn new(remote_addr: impl Into<String>, request_uri: impl Into<String>) -> Self {
        Self {
            remote_addr: remote_addr.into(),
            request_uri: request_uri.into(),
            ..Self::default()
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.remote_user = Some(user.into());
        self
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.remote_hostname = Some(hostname.into());
        self
    }

    pub fn with_server_name(mut self, server_name: impl Into<String>) -> Self {
        self.server_name = server_name.into();
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }
}

impl RequestView for CompletedRequest {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn remote_addr(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.remote_addr)
    }

    fn remote_host(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.remote_hostname.as_deref().unwrap_or(&self.remote_addr))
    }

    fn remote_user(&self) -> Option<&str> {
        self.remote_user.as_deref()
    }

    fn request_uri(&self) -> &str {
        &self.request_uri
    }

    fn server_name(&self) -> &str {
        &self.server_name
    }

    fn method(&self) -> &str {
        &self.method
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Owned snapshot of a completed response.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompletedResponse {
    pub status: u16,
    pub bytes_written: i64,
}

impl CompletedResponse {
    pub fn new(status: u16, bytes_written: i64) -> Self {
        Self {
            status,
            bytes_written,
        }
    }
}

impl ResponseView for CompletedResponse {
    fn status(&self) -> u16 {
        self.status
    }

    fn bytes_written(&self) -> i64 {
        self.bytes_written
    }
}
