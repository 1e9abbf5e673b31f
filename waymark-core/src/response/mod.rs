//! Parsed answers from the routing service.

mod error;
mod path;

pub use error::ServiceError;
pub use path::{Instruction, PathDetail, PathPoint, ResponsePath};

use serde::Serialize;
use thiserror::Error;

use crate::Hints;

/// Outcome of one route call.
///
/// Business failures reported by the service populate [`Self::errors`]
/// instead of surfacing as `Err`, so callers must check
/// [`Self::has_errors`] before reading paths.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RouteResponse {
    /// Route alternatives, best first.
    pub paths: Vec<ResponsePath>,
    /// Hints from the response body merged with every response header.
    pub hints: Hints,
    /// Errors reported by the service.
    pub errors: Vec<ServiceError>,
}

/// Errors from [`RouteResponse::best`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BestPathError {
    /// The service reported errors.
    #[error("routing failed: {}", summarise(.errors))]
    Service {
        /// Errors as reported.
        errors: Vec<ServiceError>,
    },
    /// The response carried neither errors nor paths.
    #[error("no path was returned")]
    NoPath,
}

fn summarise(errors: &[ServiceError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl RouteResponse {
    /// Whether the service reported any error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The first (best) path.
    ///
    /// # Errors
    ///
    /// Returns [`BestPathError::Service`] when the service reported errors and
    /// [`BestPathError::NoPath`] when no alternative was returned.
    pub fn best(&self) -> Result<&ResponsePath, BestPathError> {
        if self.has_errors() {
            return Err(BestPathError::Service {
                errors: self.errors.clone(),
            });
        }
        self.paths.first().ok_or(BestPathError::NoPath)
    }
}
