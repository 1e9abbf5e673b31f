//! Facade crate for the Waymark routing client.
//!
//! This crate re-exports the request and response model from `waymark-core`
//! and the HTTP client from `waymark-client`.
//!
//! ```
//! use waymark::{GeoPoint, RequestMode, RouteRequest, RoutingClientConfig};
//!
//! let request = RouteRequest::new(GeoPoint::new(42.509225, 1.534728), GeoPoint::new(42.512602, 1.551558))
//!     .with_profile("car");
//! let config = RoutingClientConfig::new("http://localhost:8989/route").with_post_request(true);
//! assert_eq!(config.mode, RequestMode::Post);
//! assert_eq!(request.points.len(), 2);
//! ```

#![forbid(unsafe_code)]

pub use waymark_client::{
    ClientError, KeyError, RequestError, RequestMode, RoutingClient, RoutingClientConfig,
    TransportError,
};
pub use waymark_core::{
    CustomModel, GeoPoint, Hints, ResponsePath, RouteRequest, RouteResponse, ServiceError,
    Statement,
};
