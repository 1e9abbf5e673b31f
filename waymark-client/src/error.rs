//! Error types for the routing client.

use thiserror::Error;
use waymark_core::PolylineError;

/// Errors from validating an API key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// No key was supplied.
    #[error("Key must not be null")]
    Missing,
    /// The key was an empty string.
    #[error("Key must not be empty")]
    Empty,
}

/// Errors raised while turning a route request into an HTTP request.
///
/// These are detected before any network traffic happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// A custom model needs a JSON body, which GET requests cannot carry.
    #[error("Custom models cannot be used for GET requests. Use setPostRequest(true)")]
    CustomModelWithGet,
    /// Instructions were requested while point calculation was disabled.
    #[error(
        "cannot calculate instructions without points; set both calc_points and instructions to false to skip geometry"
    )]
    InstructionsWithoutPoints,
}

/// Errors from the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request did not complete within its timeout.
    #[error("request to {url} timed out after {timeout_ms} ms")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Timeout that elapsed.
        timeout_ms: u64,
    },
    /// The connection failed or the response could not be read.
    #[error("request to {url} failed: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Description of the failure.
        message: String,
    },
}

/// Errors returned by [`crate::RoutingClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The API key was rejected.
    #[error(transparent)]
    Key(#[from] KeyError),
    /// The route URL could not be parsed.
    #[error("invalid route URL {url:?}: {source}")]
    InvalidUrl {
        /// URL as configured.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
    /// The request could not be built.
    #[error(transparent)]
    Request(#[from] RequestError),
    /// The request could not be sent or the response not received.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The response body was not valid JSON of the expected shape.
    #[error("failed to parse routing response: {0}")]
    Parse(#[from] serde_json::Error),
    /// Path geometry could not be decoded.
    #[error("failed to decode path geometry: {0}")]
    Geometry(#[from] PolylineError),
}
