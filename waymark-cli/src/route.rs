//! Route command implementation for the Waymark CLI.

use std::io::{BufReader, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::{info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waymark_client::{DEFAULT_ROUTE_URL, RoutingClient, RoutingClientConfig};
use waymark_core::{RouteRequest, RouteResponse};

use crate::fs::{file_is_file, open_utf8_file};
use crate::{
    ARG_KEY, ARG_POST, ARG_ROUTE_REQUEST, ARG_ROUTE_URL, ARG_TIMEOUT_MS, CliError,
    ENV_ROUTE_REQUEST,
};

/// CLI arguments for the `route` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Send a route request to a routing service. The request is \
                 read from a JSON-encoded RouteRequest file; the service \
                 endpoint, API key and transport options come from CLI \
                 flags, configuration files, or environment variables. \
                 The parsed response, including any errors the service \
                 reported, is printed as JSON.",
    about = "Request a route"
)]
#[ortho_config(prefix = "WAYMARK")]
pub(crate) struct RouteArgs {
    /// Path to a JSON file containing a RouteRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Route endpoint (e.g. "http://localhost:8989/route").
    #[arg(long = ARG_ROUTE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) route_url: Option<String>,
    /// API key sent with the request.
    #[arg(long = ARG_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) key: Option<String>,
    /// Send the request as a JSON POST instead of a GET.
    #[arg(
        long = ARG_POST,
        value_name = "bool",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) post: Option<bool>,
    /// Request timeout in milliseconds.
    #[arg(long = ARG_TIMEOUT_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) timeout_ms: Option<u64>,
}

impl RouteArgs {
    pub(crate) fn into_config(self) -> Result<RouteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RouteConfig::try_from(merged)
    }
}

/// Resolved `route` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RouteConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Route endpoint.
    pub(crate) route_url: String,
    /// API key, if any.
    pub(crate) key: Option<String>,
    /// Whether to POST.
    pub(crate) post: bool,
    /// Request timeout; `None` keeps the client default.
    pub(crate) timeout: Option<Duration>,
}

impl RouteConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        match file_is_file(&self.request_path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::MissingSourceFile {
                field: ARG_ROUTE_REQUEST,
                path: self.request_path.clone(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field: ARG_ROUTE_REQUEST,
                    path: self.request_path.clone(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field: ARG_ROUTE_REQUEST,
                path: self.request_path.clone(),
                source,
            }),
        }
    }

    /// Client configuration for this invocation.
    pub(crate) fn client_config(&self) -> RoutingClientConfig {
        let config = RoutingClientConfig::new(self.route_url.clone()).with_post_request(self.post);
        match self.timeout {
            Some(timeout) => config.with_timeout(timeout),
            None => config,
        }
    }
}

impl TryFrom<RouteArgs> for RouteConfig {
    type Error = CliError;

    fn try_from(args: RouteArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_ROUTE_REQUEST,
            env: ENV_ROUTE_REQUEST,
        })?;

        Ok(Self {
            request_path,
            route_url: args
                .route_url
                .unwrap_or_else(|| DEFAULT_ROUTE_URL.to_owned()),
            key: args.key,
            post: args.post.unwrap_or(false),
            timeout: args.timeout_ms.map(Duration::from_millis),
        })
    }
}

/// Builds a routing client for the current route invocation.
pub(crate) trait RouteClientBuilder {
    fn build(&self, config: RoutingClientConfig) -> Result<RoutingClient, CliError>;
}

pub(crate) struct DefaultRouteClientBuilder;

impl RouteClientBuilder for DefaultRouteClientBuilder {
    fn build(&self, config: RoutingClientConfig) -> Result<RoutingClient, CliError> {
        let route_url = config.route_url.clone();
        RoutingClient::new(config)
            .map_err(|source| CliError::BuildClient { route_url, source })
    }
}

pub(crate) fn run_route(args: RouteArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultRouteClientBuilder;
    run_route_with(args, &builder, &mut stdout)
}

pub(crate) fn run_route_with(
    args: RouteArgs,
    builder: &dyn RouteClientBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let response = execute_route(args, builder)?;
    write_route_response(writer, &response)
}

fn execute_route(
    args: RouteArgs,
    builder: &dyn RouteClientBuilder,
) -> Result<RouteResponse, CliError> {
    let config = resolve_route_config(args)?;
    let request = load_route_request(&config.request_path)?;
    let mut client = builder.build(config.client_config())?;
    if let Some(key) = config.key.as_deref() {
        client.set_key(Some(key))?;
    }

    info!(
        "requesting route with {} point(s) from {}",
        request.points.len(),
        config.route_url
    );
    let response = client.route(&request)?;
    if response.has_errors() {
        warn!(
            "routing service reported {} error(s)",
            response.errors.len()
        );
    }
    Ok(response)
}

fn resolve_route_config(args: RouteArgs) -> Result<RouteConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`RouteRequest`] from disk.
pub(crate) fn load_route_request(path: &Utf8Path) -> Result<RouteRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRouteRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseRouteRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_route_response(writer: &mut dyn Write, response: &RouteResponse) -> Result<(), CliError> {
    let payload =
        serde_json::to_string_pretty(response).map_err(CliError::SerialiseRouteResponse)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteRouteOutput)?;
    writer
        .write_all(b"\n")
        .map_err(CliError::WriteRouteOutput)?;
    Ok(())
}
