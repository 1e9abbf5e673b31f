//! Client configuration.

use std::time::Duration;

/// Default user agent for routing requests.
pub const DEFAULT_USER_AGENT: &str = concat!("waymark-client/", env!("CARGO_PKG_VERSION"));

/// Default route endpoint.
pub const DEFAULT_ROUTE_URL: &str = "http://localhost:8989/route";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How route requests are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestMode {
    /// Query parameters only; custom models are rejected.
    #[default]
    Get,
    /// JSON body; supports every request feature.
    Post,
}

/// Configuration for [`crate::RoutingClient`].
///
/// The output flags are defaults; a request overrides them through hints of
/// the same name.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingClientConfig {
    /// Route endpoint (e.g. `"https://example.com/route"`).
    pub route_url: String,
    /// GET or POST.
    pub mode: RequestMode,
    /// Timeout applied to each request unless a `timeout` hint overrides it.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Request turn instructions.
    pub instructions: bool,
    /// Request path geometry.
    pub calc_points: bool,
    /// Request elevation data.
    pub elevation: bool,
    /// Value of the `optimize` parameter.
    pub optimize: String,
}

impl Default for RoutingClientConfig {
    fn default() -> Self {
        Self {
            route_url: DEFAULT_ROUTE_URL.to_owned(),
            mode: RequestMode::Get,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            instructions: true,
            calc_points: true,
            elevation: false,
            optimize: "false".to_owned(),
        }
    }
}

impl RoutingClientConfig {
    /// Create a new configuration with the given route URL.
    #[must_use]
    pub fn new(route_url: impl Into<String>) -> Self {
        Self {
            route_url: route_url.into(),
            ..Default::default()
        }
    }

    /// Send requests as POST (`true`) or GET (`false`).
    #[must_use]
    pub const fn with_post_request(mut self, post: bool) -> Self {
        self.mode = if post {
            RequestMode::Post
        } else {
            RequestMode::Get
        };
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the default for turn instructions.
    #[must_use]
    pub const fn with_instructions(mut self, instructions: bool) -> Self {
        self.instructions = instructions;
        self
    }

    /// Set the default for path geometry.
    #[must_use]
    pub const fn with_calc_points(mut self, calc_points: bool) -> Self {
        self.calc_points = calc_points;
        self
    }

    /// Set the default for elevation data.
    #[must_use]
    pub const fn with_elevation(mut self, elevation: bool) -> Self {
        self.elevation = elevation;
        self
    }

    /// Set the default `optimize` value.
    #[must_use]
    pub fn with_optimize(mut self, optimize: impl Into<String>) -> Self {
        self.optimize = optimize.into();
        self
    }
}
