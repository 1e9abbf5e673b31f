//! HTTP transport abstraction.
//!
//! [`crate::RoutingClient`] builds plain [`HttpRequest`] values and hands them
//! to a [`Transport`]. The trait is synchronous so the client stays usable
//! from non-async code; [`ReqwestTransport`] bridges onto an async client.

mod http;

use std::fmt;
use std::time::Duration;

use crate::TransportError;

pub use self::http::{ReqwestTransport, TransportBuildError};

/// HTTP method used for a route call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET` with query parameters.
    Get,
    /// `POST` with a JSON body.
    Post,
}

impl Method {
    /// Upper-case method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully built outbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// Method.
    pub method: Method,
    /// Absolute URL including the query string.
    pub url: String,
    /// Header name/value pairs in send order.
    pub headers: Vec<(String, String)>,
    /// JSON body for POST requests.
    pub body: Option<String>,
    /// Time allowed for the whole exchange.
    pub timeout: Duration,
}

impl HttpRequest {
    /// First header value matching `name`, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A received response.
///
/// Header names appear once per received value, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// First header value matching `name`, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Executes HTTP requests on behalf of the client.
///
/// Implementations must be safe to share between threads; the client holds
/// its transport behind an `Arc` and may be used concurrently.
///
/// Non-2xx responses are returned as `Ok`: the routing service reports
/// errors in the body and the client parses them.
pub trait Transport: Send + Sync {
    /// Send `request` and wait for the response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Timeout`] when `request.timeout` elapses and
    /// [`TransportError::Network`] for connection or read failures.
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(200, true)]
    #[case(299, true)]
    #[case(400, false)]
    #[case(500, false)]
    fn success_covers_2xx(#[case] status: u16, #[case] want: bool) {
        let response = HttpResponse {
            status,
            ..HttpResponse::default()
        };
        assert_eq!(response.is_success(), want);
    }

    #[rstest]
    fn header_lookup_ignores_case() {
        let response = HttpResponse {
            status: 200,
            headers: vec![("Content-Type".to_owned(), "application/json".to_owned())],
            body: Vec::new(),
        };
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("x-missing"), None);
    }

    #[rstest]
    fn method_names() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.as_str(), "POST");
    }
}
