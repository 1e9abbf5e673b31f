//! Test utilities for the routing client.
//!
//! This module provides [`StubTransport`], a deterministic [`Transport`] that
//! returns a pre-configured response and records every request it receives.

use std::sync::{Mutex, PoisonError};

use serde_json::Value;

use crate::{HttpRequest, HttpResponse, Transport, TransportError};

/// Stub [`Transport`] for testing.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use serde_json::json;
/// use waymark_client::test_support::StubTransport;
/// use waymark_client::{RoutingClient, RoutingClientConfig};
/// use waymark_core::{GeoPoint, RouteRequest};
///
/// let stub = Arc::new(StubTransport::with_json(200, json!({"paths": [], "hints": {}})));
/// let client = RoutingClient::with_transport(RoutingClientConfig::default(), stub.clone());
///
/// let request = RouteRequest::new(GeoPoint::new(42.5, 1.53), GeoPoint::new(42.51, 1.55));
/// let response = client.route(&request)?;
/// assert!(response.paths.is_empty());
/// assert_eq!(stub.requests().len(), 1);
/// # Ok::<(), waymark_client::ClientError>(())
/// ```
#[derive(Debug)]
pub struct StubTransport {
    response: StubResponse,
    requests: Mutex<Vec<HttpRequest>>,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Response(HttpResponse),
    Error(TransportError),
}

impl StubTransport {
    /// Create a transport that returns the given response.
    #[must_use]
    pub fn with_response(response: HttpResponse) -> Self {
        Self {
            response: StubResponse::Response(response),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a transport that returns `body` as JSON with the given status.
    #[must_use]
    pub fn with_json(status: u16, body: Value) -> Self {
        Self::with_response(HttpResponse {
            status,
            headers: vec![("Content-Type".to_owned(), "application/json".to_owned())],
            body: body.to_string().into_bytes(),
        })
    }

    /// Create a transport that returns the given error.
    #[must_use]
    pub fn with_error(error: TransportError) -> Self {
        Self {
            response: StubResponse::Error(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Add a response header. Has no effect on error stubs.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let StubResponse::Response(response) = &mut self.response {
            response.headers.push((name.into(), value.into()));
        }
        self
    }

    /// Requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent request, if any.
    #[must_use]
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Transport for StubTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        match &self.response {
            StubResponse::Response(response) => Ok(response.clone()),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Method;
    use rstest::rstest;
    use serde_json::json;
    use std::time::Duration;

    fn sample_request() -> HttpRequest {
        HttpRequest {
            method: Method::Get,
            url: "http://example.com/route?profile=car".to_owned(),
            headers: Vec::new(),
            body: None,
            timeout: Duration::from_secs(1),
        }
    }

    #[rstest]
    fn with_json_returns_body_and_records_request() {
        let stub = StubTransport::with_json(200, json!({"paths": []}));

        let response = stub.execute(sample_request()).expect("should succeed");

        assert_eq!(response.status, 200);
        assert_eq!(response.body, br#"{"paths":[]}"#);
        assert_eq!(stub.requests(), vec![sample_request()]);
    }

    #[rstest]
    fn with_error_returns_configured_error() {
        let stub = StubTransport::with_error(TransportError::Network {
            url: "http://example.com/route".to_owned(),
            message: "connection refused".to_owned(),
        });

        let err = stub.execute(sample_request()).expect_err("should fail");

        assert!(matches!(err, TransportError::Network { .. }));
        assert!(stub.last_request().is_some());
    }

    #[rstest]
    fn with_header_appends_in_order() {
        let stub = StubTransport::with_json(200, json!({}))
            .with_header("X-Rate-Limit-Remaining", "123")
            .with_header("X-Rate-Limit-Remaining", "122");

        let response = stub.execute(sample_request()).expect("should succeed");

        let values: Vec<&str> = response
            .headers
            .iter()
            .filter(|(name, _)| name == "X-Rate-Limit-Remaining")
            .map(|(_, value)| value.as_str())
            .collect();
        assert_eq!(values, ["123", "122"]);
    }
}
