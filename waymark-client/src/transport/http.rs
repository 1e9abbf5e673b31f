//! `reqwest`-backed [`Transport`].
//!
//! The [`Transport`] trait is synchronous; this adapter blocks on a Tokio
//! runtime to drive the async `reqwest` client.

use std::time::Duration;

use log::debug;
use reqwest::Client;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use super::{HttpRequest, HttpResponse, Method, Transport};
use crate::{RoutingClientConfig, TransportError};

/// Error type for [`ReqwestTransport`] construction failures.
#[derive(Debug)]
pub enum TransportBuildError {
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
    /// Failed to build the Tokio runtime.
    Runtime(std::io::Error),
}

impl std::fmt::Display for TransportBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
            Self::Runtime(err) => write!(f, "failed to build Tokio runtime: {err}"),
        }
    }
}

impl std::error::Error for TransportBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::HttpClient(err) => Some(err),
            Self::Runtime(err) => Some(err),
        }
    }
}

/// Blocking transport over an async `reqwest::Client`.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the transport drives requests on its own
/// current-thread runtime. Inside a multi-threaded runtime (detected via
/// [`Handle::try_current()`] and [`RuntimeFlavor::MultiThread`]) it blocks on
/// that runtime's handle within [`tokio::task::block_in_place`].
///
/// Inside a `current_thread` runtime it falls back to its own runtime. That
/// avoids the `block_in_place` panic but may deadlock if the caller's runtime
/// drives IO this request depends on.
pub struct ReqwestTransport {
    client: Client,
    runtime: Runtime,
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("client", &self.client)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl ReqwestTransport {
    /// Build a transport using the user agent and timeout from `config`.
    ///
    /// The configured timeout bounds connection setup; each request carries
    /// its own overall timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(config: &RoutingClientConfig) -> Result<Self, TransportBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .build()
            .map_err(TransportBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(TransportBuildError::Runtime)?;
        Ok(Self { client, runtime })
    }

    async fn execute_async(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
            timeout,
        } = request;

        let mut builder = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        }
        .timeout(timeout);
        for (name, value) in &headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        debug!("{method} {url}");
        let response = builder
            .send()
            .await
            .map_err(|err| convert_reqwest_error(&err, &url, timeout))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_owned(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|err| convert_reqwest_error(&err, &url, timeout))?
            .to_vec();
        debug!("{method} {url} -> {status} ({} bytes)", body.len());

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Convert a reqwest error to a [`TransportError`].
fn convert_reqwest_error(error: &reqwest::Error, url: &str, timeout: Duration) -> TransportError {
    if error.is_timeout() {
        return TransportError::Timeout {
            url: url.to_owned(),
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        };
    }

    TransportError::Network {
        url: url.to_owned(),
        message: error.to_string(),
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let future = self.execute_async(request);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}
