//! Focused unit tests covering route CLI configuration and request loading.

use super::helpers::{StubClientBuilder, write_utf8};
use super::*;
use crate::route::{RouteArgs, RouteConfig, load_route_request, run_route_with};
use camino::Utf8PathBuf;
use rstest::rstest;
use serde_json::json;
use std::time::Duration;
use tempfile::TempDir;
use waymark_client::{Method, RequestMode};

fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

#[rstest]
fn converting_route_without_request_errors() {
    let err = RouteConfig::try_from(RouteArgs::default()).expect_err("missing request");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_ROUTE_REQUEST);
            assert_eq!(env, ENV_ROUTE_REQUEST);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn route_config_applies_defaults() {
    let args = RouteArgs {
        request_path: Some(Utf8PathBuf::from("request.json")),
        ..RouteArgs::default()
    };

    let config = RouteConfig::try_from(args).expect("config should build");

    assert_eq!(config.route_url, "http://localhost:8989/route");
    assert!(!config.post);
    assert_eq!(config.timeout, None);
    let client_config = config.client_config();
    assert_eq!(client_config.mode, RequestMode::Get);
    assert_eq!(client_config.timeout, Duration::from_secs(30));
}

#[rstest]
fn route_config_carries_overrides() {
    let args = RouteArgs {
        request_path: Some(Utf8PathBuf::from("request.json")),
        route_url: Some("https://routing.example.com/route".to_owned()),
        key: Some("abc".to_owned()),
        post: Some(true),
        timeout_ms: Some(2_500),
    };

    let client_config = RouteConfig::try_from(args)
        .expect("config should build")
        .client_config();

    assert_eq!(client_config.route_url, "https://routing.example.com/route");
    assert_eq!(client_config.mode, RequestMode::Post);
    assert_eq!(client_config.timeout, Duration::from_millis(2_500));
}

#[rstest]
fn post_flag_parses_without_value() {
    let cli = Cli::try_parse_from(["waymark", "route", "request.json", "--post"])
        .expect("arguments should parse");
    let Command::Route(args) = cli.command;
    assert_eq!(args.post, Some(true));
    assert_eq!(args.request_path, Some(Utf8PathBuf::from("request.json")));
}

#[rstest]
fn validate_sources_rejects_missing_and_directory_paths() {
    let (_tmp, root) = workspace();
    for path in [root.join("missing.json"), root.clone()] {
        let config = RouteConfig {
            request_path: path,
            route_url: "http://localhost:8989/route".to_owned(),
            key: None,
            post: false,
            timeout: None,
        };
        match config.validate_sources() {
            Err(CliError::MissingSourceFile { field, .. }) => {
                assert_eq!(field, ARG_ROUTE_REQUEST);
            }
            other => panic!("expected MissingSourceFile, found {other:?}"),
        }
    }
}

#[rstest]
fn load_route_request_reads_json() {
    let (_tmp, root) = workspace();
    let path = root.join("request.json");
    write_utf8(
        &path,
        br#"{"points": [{"lat": 42.509225, "lon": 1.534728}, {"lat": 42.512602, "lon": 1.551558}], "profile": "car"}"#,
    );

    let request = load_route_request(&path).expect("request should load");

    assert_eq!(request.points.len(), 2);
    assert_eq!(request.profile, "car");
}

#[rstest]
fn load_route_request_reports_invalid_json() {
    let (_tmp, root) = workspace();
    let path = root.join("request.json");
    write_utf8(&path, b"{ not valid json");

    match load_route_request(&path) {
        Err(CliError::ParseRouteRequest { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected ParseRouteRequest, found {other:?}"),
    }
}

#[rstest]
fn empty_key_is_rejected_before_sending() {
    let (_tmp, root) = workspace();
    let path = root.join("request.json");
    write_utf8(&path, br#"{"points": [], "profile": "car"}"#);
    let builder = StubClientBuilder::with_json(200, json!({"paths": []}));
    let args = RouteArgs {
        request_path: Some(path),
        key: Some(String::new()),
        ..RouteArgs::default()
    };

    let mut output = Vec::new();
    let err = run_route_with(args, &builder, &mut output).expect_err("empty key");

    assert!(matches!(err, CliError::InvalidKey(_)));
    assert!(builder.transport.requests().is_empty());
}

#[rstest]
fn key_and_mode_reach_the_transport() {
    let (_tmp, root) = workspace();
    let path = root.join("request.json");
    write_utf8(&path, br#"{"points": [{"lat": 1.0, "lon": 2.0}], "profile": "car"}"#);
    let builder = StubClientBuilder::with_json(200, json!({"paths": []}));
    let args = RouteArgs {
        request_path: Some(path),
        route_url: Some("http://routing.test/route".to_owned()),
        key: Some("abc".to_owned()),
        post: Some(true),
        timeout_ms: None,
    };

    let mut output = Vec::new();
    run_route_with(args, &builder, &mut output).expect("route should succeed");

    let sent = builder.transport.last_request().expect("request recorded");
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.url, "http://routing.test/route?key=abc");
}
