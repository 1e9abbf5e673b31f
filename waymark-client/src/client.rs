//! The routing client.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use serde_json::{Map, Value};
use waymark_core::{RouteRequest, RouteResponse, parameters};

use crate::options::{OutputOptions, request_timeout};
use crate::parse::{PathOptions, parse_response};
use crate::{
    ApiKey, ClientError, HttpRequest, KeyError, Method, RequestError, RequestMode,
    ReqwestTransport, RoutingClientConfig, Transport, TransportBuildError, body, query,
};

/// Header naming the client library version on every request.
pub const CLIENT_VERSION_HEADER: &str = "X-Waymark-Client-Version";

const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Synchronous client for a route endpoint.
///
/// The client holds immutable configuration and a shared transport, so one
/// instance may serve concurrent callers.
///
/// # Example
///
/// ```no_run
/// use waymark_client::{RoutingClient, RoutingClientConfig};
/// use waymark_core::{GeoPoint, RouteRequest};
///
/// let config = RoutingClientConfig::new("https://routing.example.com/route").with_post_request(true);
/// let mut client = RoutingClient::new(config)?;
/// client.set_key(Some("my-api-key"))?;
///
/// let request = RouteRequest::new(GeoPoint::new(42.509225, 1.534728), GeoPoint::new(42.512602, 1.551558))
///     .with_profile("car");
/// let response = client.route(&request)?;
/// if let Ok(best) = response.best() {
///     println!("{} m", best.distance);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct RoutingClient {
    config: RoutingClientConfig,
    key: Option<ApiKey>,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for RoutingClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingClient")
            .field("config", &self.config)
            .field("key", &self.key)
            .field("transport", &"<dyn Transport>")
            .finish()
    }
}

impl RoutingClient {
    /// Create a client backed by a [`ReqwestTransport`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(config: RoutingClientConfig) -> Result<Self, TransportBuildError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client using the given transport.
    #[must_use]
    pub fn with_transport(config: RoutingClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            key: None,
            transport,
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &RoutingClientConfig {
        &self.config
    }

    /// Set the API key sent with every request.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Missing`] for `None` and [`KeyError::Empty`] for an
    /// empty key; the previous key is kept in both cases.
    pub fn set_key(&mut self, key: Option<&str>) -> Result<&mut Self, KeyError> {
        self.key = Some(ApiKey::parse(key)?);
        Ok(self)
    }

    /// Switch between POST (`true`) and GET (`false`) requests.
    pub const fn set_post_request(&mut self, post: bool) -> &mut Self {
        self.config.mode = if post {
            RequestMode::Post
        } else {
            RequestMode::Get
        };
        self
    }

    /// Timeout for `request`: its `timeout` hint in milliseconds, or the
    /// configured default.
    #[must_use]
    pub fn timeout_for(&self, request: &RouteRequest) -> Duration {
        request_timeout(&self.config, &request.hints)
    }

    /// Build the GET request for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::CustomModelWithGet`] when the request carries a
    /// custom model, [`RequestError::InstructionsWithoutPoints`] for
    /// contradictory output flags and [`ClientError::InvalidUrl`] for an
    /// unparsable route URL.
    pub fn create_get_request(&self, request: &RouteRequest) -> Result<HttpRequest, ClientError> {
        let options = OutputOptions::resolve(&self.config, &request.hints)?;
        self.get_request(request, &options)
    }

    /// Build the POST request for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InstructionsWithoutPoints`] for contradictory
    /// output flags and [`ClientError::InvalidUrl`] for an unparsable route
    /// URL.
    pub fn create_post_request(&self, request: &RouteRequest) -> Result<HttpRequest, ClientError> {
        let options = OutputOptions::resolve(&self.config, &request.hints)?;
        self.post_request(request, &options)
    }

    /// The JSON body a POST request for `request` would carry.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InstructionsWithoutPoints`] for contradictory
    /// output flags.
    pub fn request_to_json(&self, request: &RouteRequest) -> Result<Map<String, Value>, ClientError> {
        let options = OutputOptions::resolve(&self.config, &request.hints)?;
        body::post_body(request, &options)
    }

    /// Send `request` and parse the answer.
    ///
    /// Errors reported by the service are returned inside the response; check
    /// [`RouteResponse::has_errors`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request cannot be built or sent, or
    /// when the response cannot be parsed.
    pub fn route(&self, request: &RouteRequest) -> Result<RouteResponse, ClientError> {
        let options = OutputOptions::resolve(&self.config, &request.hints)?;
        let mut outbound = request.clone();
        outbound.hints.remove(parameters::TURN_DESCRIPTION);

        let http_request = match self.config.mode {
            RequestMode::Get => self.get_request(&outbound, &options)?,
            RequestMode::Post => self.post_request(&outbound, &options)?,
        };
        let response = self.transport.execute(http_request)?;
        debug!("route response status {}", response.status);

        parse_response(
            &response,
            PathOptions {
                elevation: options.elevation,
                turn_description: options.turn_description,
            },
        )
    }

    fn get_request(
        &self,
        request: &RouteRequest,
        options: &OutputOptions,
    ) -> Result<HttpRequest, ClientError> {
        if request.custom_model.is_some() {
            return Err(RequestError::CustomModelWithGet.into());
        }
        let url = query::get_url(self.route_url()?, request, options, self.key_str());
        Ok(HttpRequest {
            method: Method::Get,
            url,
            headers: self.common_headers(),
            body: None,
            timeout: options.timeout,
        })
    }

    fn post_request(
        &self,
        request: &RouteRequest,
        options: &OutputOptions,
    ) -> Result<HttpRequest, ClientError> {
        let url = query::post_url(self.route_url()?, self.key_str());
        let body = Value::Object(body::post_body(request, options)?).to_string();
        let mut headers = self.common_headers();
        headers.push(("Content-Type".to_owned(), "application/json".to_owned()));
        Ok(HttpRequest {
            method: Method::Post,
            url,
            headers,
            body: Some(body),
            timeout: options.timeout,
        })
    }

    fn route_url(&self) -> Result<&str, ClientError> {
        let url = self.config.route_url.as_str();
        url::Url::parse(url).map_err(|source| ClientError::InvalidUrl {
            url: url.to_owned(),
            source,
        })?;
        Ok(url)
    }

    fn key_str(&self) -> Option<&str> {
        self.key.as_ref().map(ApiKey::as_str)
    }

    fn common_headers(&self) -> Vec<(String, String)> {
        vec![
            (CLIENT_VERSION_HEADER.to_owned(), CLIENT_VERSION.to_owned()),
            ("User-Agent".to_owned(), self.config.user_agent.clone()),
        ]
    }
}
