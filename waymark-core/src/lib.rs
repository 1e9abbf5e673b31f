//! Core data model for the Waymark routing client.
//!
//! These types describe what is sent to and received from a routing
//! service: [`RouteRequest`] with its optional [`CustomModel`], and
//! [`RouteResponse`] with its paths, hints and service errors. They carry no
//! networking; see `waymark-client` for that.

#![forbid(unsafe_code)]

pub mod custom_model;
mod hints;
pub mod parameters;
mod point;
pub mod polyline;
mod request;
pub mod response;

pub use custom_model::{
    AreaError, AreaGeometry, CustomModel, Feature, FeatureCollection, Keyword, Op, Statement,
};
pub use hints::{Hints, value_as_text};
pub use point::{GeoPoint, format_decimal, round6};
pub use polyline::PolylineError;
pub use request::{DEFAULT_LOCALE, RouteRequest};
pub use response::{
    BestPathError, Instruction, PathDetail, PathPoint, ResponsePath, RouteResponse, ServiceError,
};
