//! HTTP transport for the Azur Lane API.
//!
//! # Design
//! Requests and responses are plain data. The client builds `HttpRequest`
//! values and parses `HttpResponse` values without touching the network; the
//! `Transport` trait is the only place I/O happens. `UreqTransport` is the
//! production implementation. Hosts that already own an HTTP stack (or tests)
//! can plug in their own.
//!
//! Every call is a single GET attempt. Redirects follow ureq's default policy.

use std::fmt;
use std::io;
use std::time::Duration;

use crate::error::TransportError;

/// A GET request described as plain data.
///
/// Built by `AzurLaneClient::build_*` methods with the query already
/// percent-encoded into `url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data, body fully read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Executes one `HttpRequest` and returns whatever the server answered.
///
/// Implementations must not interpret the status code; a 500 is a successful
/// execution. Only failures to obtain a response are errors.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a single reused `ureq::Agent`.
///
/// Bodies are read through ureq's default 10 MB limit. A larger body is a
/// `TransportErrorKind::BodyTooLarge` error even though the server answered.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    timeout: Duration,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl UreqTransport {
    /// `timeout` bounds connect plus the full body read.
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent, timeout }
    }

    fn classify(&self, err: ureq::Error) -> TransportError {
        match err {
            ureq::Error::Timeout(which) => {
                TransportError::timeout(format!("{which:?} timeout after {:?}", self.timeout))
            }
            ureq::Error::Io(e) if matches!(e.kind(), io::ErrorKind::TimedOut) => {
                TransportError::timeout(format!("{e} after {:?}", self.timeout))
            }
            ureq::Error::BodyExceedsLimit(limit) => {
                TransportError::body_too_large(format!("limit is {limit} bytes"))
            }
            other => TransportError::network(other.to_string()),
        }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.agent.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder.call().map_err(|e| self.classify(e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| self.classify(e))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
