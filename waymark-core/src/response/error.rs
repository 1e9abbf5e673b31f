use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// An error reported by the routing service in its response body.
///
/// These are stored in [`crate::RouteResponse::errors`] rather than returned
/// as `Err`; callers check [`crate::RouteResponse::has_errors`].
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ServiceError {
    /// The requested feature is not supported by the service.
    #[error("unsupported operation: {message}")]
    UnsupportedOperation {
        /// Service message.
        message: String,
    },
    /// The service was in a state that prevented answering.
    #[error("illegal state: {message}")]
    IllegalState {
        /// Service message.
        message: String,
    },
    /// A request parameter was rejected.
    #[error("illegal argument: {message}")]
    IllegalArgument {
        /// Service message.
        message: String,
    },
    /// A request point could not be snapped to the road network.
    #[error("point {point_index} not found: {message}")]
    PointNotFound {
        /// Service message.
        message: String,
        /// Index of the offending request point.
        point_index: usize,
    },
    /// A request point lies outside the service's coverage.
    #[error("point {point_index} out of bounds: {message}")]
    PointOutOfBounds {
        /// Service message.
        message: String,
        /// Index of the offending request point.
        point_index: usize,
    },
    /// No connection exists between the request points.
    #[error("connection not found: {message}")]
    ConnectionNotFound {
        /// Service message.
        message: String,
        /// Remaining members of the error object.
        details: Map<String, Value>,
    },
    /// The search exceeded the service's node limit.
    #[error("maximum nodes exceeded: {message}")]
    MaximumNodesExceeded {
        /// Service message.
        message: String,
        /// Remaining members of the error object.
        details: Map<String, Value>,
    },
    /// Any other structured error.
    #[error("{message}")]
    Detailed {
        /// Service message, prefixed with the error class when one was sent.
        message: String,
        /// Remaining members of the error object.
        details: Map<String, Value>,
    },
    /// A bare top-level message without structured hints.
    #[error("{message}")]
    Message {
        /// Service message.
        message: String,
    },
}

impl ServiceError {
    /// The message the service sent.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::UnsupportedOperation { message }
            | Self::IllegalState { message }
            | Self::IllegalArgument { message }
            | Self::PointNotFound { message, .. }
            | Self::PointOutOfBounds { message, .. }
            | Self::ConnectionNotFound { message, .. }
            | Self::MaximumNodesExceeded { message, .. }
            | Self::Detailed { message, .. }
            | Self::Message { message } => message,
        }
    }
}
