//! Test helpers for writing request files and stubbing the routing client.

use super::*;
use crate::route::RouteClientBuilder;
use camino::Utf8Path;
use serde_json::Value;
use std::sync::Arc;
use waymark_client::test_support::StubTransport;
use waymark_client::{RoutingClient, RoutingClientConfig};

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

/// Builds clients that talk to a shared [`StubTransport`].
pub(super) struct StubClientBuilder {
    pub(super) transport: Arc<StubTransport>,
}

impl StubClientBuilder {
    pub(super) fn with_json(status: u16, body: Value) -> Self {
        Self {
            transport: Arc::new(StubTransport::with_json(status, body)),
        }
    }
}

impl RouteClientBuilder for StubClientBuilder {
    fn build(&self, config: RoutingClientConfig) -> Result<RoutingClient, CliError> {
        let transport: Arc<dyn waymark_client::Transport> = self.transport.clone();
        Ok(RoutingClient::with_transport(config, transport))
    }
}
