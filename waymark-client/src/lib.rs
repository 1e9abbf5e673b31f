//! HTTP client for a routing service's route endpoint.
//!
//! [`RoutingClient`] turns a [`waymark_core::RouteRequest`] into a GET or
//! POST request, sends it through a [`Transport`] and parses the answer into
//! a [`waymark_core::RouteResponse`]. Errors the service reports in its body
//! are returned inside the response; only construction, transport and parse
//! failures surface as [`ClientError`].
//!
//! # Architecture
//!
//! The client is synchronous. [`ReqwestTransport`] bridges onto an async
//! `reqwest` client by blocking on a Tokio runtime, keeping the client usable
//! from plain threads. Tests swap in [`test_support::StubTransport`].
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use waymark_client::{RoutingClient, RoutingClientConfig};
//! use waymark_core::{GeoPoint, RouteRequest};
//!
//! let config = RoutingClientConfig::new("http://localhost:8989/route")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_user_agent("my-app/1.0");
//! let client = RoutingClient::new(config)?;
//!
//! let request = RouteRequest::new(GeoPoint::new(52.52, 13.405), GeoPoint::new(52.5, 13.42))
//!     .with_profile("bike")
//!     .put_hint("elevation", true);
//! let response = client.route(&request)?;
//! for error in &response.errors {
//!     eprintln!("{error}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

mod body;
mod client;
mod config;
mod error;
mod key;
mod options;
mod parse;
mod query;
mod transport;

#[doc(hidden)]
pub mod test_support;

pub use client::{CLIENT_VERSION_HEADER, RoutingClient};
pub use config::{DEFAULT_ROUTE_URL, DEFAULT_USER_AGENT, RequestMode, RoutingClientConfig};
pub use error::{ClientError, KeyError, RequestError, TransportError};
pub use key::ApiKey;
pub use transport::{
    HttpRequest, HttpResponse, Method, ReqwestTransport, Transport, TransportBuildError,
};
