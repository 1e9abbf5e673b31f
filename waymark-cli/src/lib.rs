//! Command-line interface for querying a routing service.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod route;

pub use error::CliError;
use route::RouteArgs;

const ARG_ROUTE_REQUEST: &str = "request";
const ARG_ROUTE_URL: &str = "route-url";
const ARG_KEY: &str = "key";
const ARG_POST: &str = "post";
const ARG_TIMEOUT_MS: &str = "timeout-ms";
const ENV_ROUTE_REQUEST: &str = "WAYMARK_CMDS_ROUTE_REQUEST_PATH";

/// Run the Waymark CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when argument parsing, configuration, the route
/// call or writing the output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Route(args) => route::run_route(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "waymark",
    about = "Query a routing service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Send a route request read from a JSON file and print the response.
    Route(RouteArgs),
}

#[cfg(test)]
mod tests;
