//! Conversion of HTTP responses into [`RouteResponse`] values.

mod errors;
mod path;

use log::warn;
use serde_json::Value;
use waymark_core::{Hints, RouteResponse};

use crate::{ClientError, HttpResponse};

pub(crate) use self::path::PathOptions;
use self::path::PathRepr;

/// Parse a route response.
///
/// An error payload (one with a top-level `message`) populates
/// [`RouteResponse::errors`] and nothing else from the body. Response headers
/// are copied into the hints in both cases.
pub(crate) fn parse_response(
    response: &HttpResponse,
    options: PathOptions,
) -> Result<RouteResponse, ClientError> {
    let json: Value = serde_json::from_slice(&response.body)?;
    let mut route = RouteResponse::default();

    if let Some(message) = json.get("message") {
        let message = waymark_core::value_as_text(message).unwrap_or_default();
        route.errors = errors::read_errors(&message, json.get("hints"));
        warn!(
            "routing service answered {} with {} error(s): {message}",
            response.status,
            route.errors.len()
        );
    } else {
        if let Some(paths) = json.get("paths") {
            let reprs: Vec<PathRepr> = serde_json::from_value(paths.clone())?;
            route.paths = reprs
                .into_iter()
                .map(|repr| repr.into_path(options))
                .collect::<Result<_, _>>()?;
        }
        if let Some(hints) = json.get("hints") {
            let hints: Hints = serde_json::from_value(hints.clone())?;
            route.hints.merge(hints);
        }
    }

    copy_headers(&response.headers, &mut route.hints);
    Ok(route)
}

/// Store each header as a list of its values under the first spelling seen.
fn copy_headers(headers: &[(String, String)], hints: &mut Hints) {
    let mut grouped: Vec<(&str, Vec<Value>)> = Vec::new();
    for (name, value) in headers {
        let value = Value::String(value.clone());
        match grouped
            .iter_mut()
            .find(|(seen, _)| seen.eq_ignore_ascii_case(name))
        {
            Some((_, values)) => values.push(value),
            None => grouped.push((name.as_str(), vec![value])),
        }
    }
    for (name, values) in grouped {
        hints.put(name, values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;
    use waymark_core::ServiceError;

    #[fixture]
    fn options() -> PathOptions {
        PathOptions {
            elevation: false,
            turn_description: true,
        }
    }

    fn response(status: u16, body: &Value, headers: &[(&str, &str)]) -> HttpResponse {
        HttpResponse {
            status,
            headers: headers
                .iter()
                .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
                .collect(),
            body: body.to_string().into_bytes(),
        }
    }

    #[rstest]
    fn success_merges_body_hints_and_headers(options: PathOptions) {
        let body = json!({"paths": [], "hints": {"abcd": "val-42"}});
        let parsed = parse_response(
            &response(
                200,
                &body,
                &[("X-Rate-Limit-Remaining", "123"), ("X-Trace", "trace-0001")],
            ),
            options,
        )
        .expect("parse");

        assert!(!parsed.has_errors());
        assert!(parsed.paths.is_empty());
        assert_eq!(parsed.hints.get("abcd"), Some(&json!("val-42")));
        assert_eq!(
            parsed.hints.get("x-rate-limit-remaining"),
            Some(&json!(["123"]))
        );
    }

    #[rstest]
    fn repeated_headers_become_one_list(options: PathOptions) {
        let parsed = parse_response(
            &response(
                200,
                &json!({"paths": []}),
                &[("Set-Cookie", "a=1"), ("set-cookie", "b=2")],
            ),
            options,
        )
        .expect("parse");

        let names: Vec<&str> = parsed.hints.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["Set-Cookie"]);
        assert_eq!(parsed.hints.get("SET-COOKIE"), Some(&json!(["a=1", "b=2"])));
    }

    #[rstest]
    fn error_payload_populates_errors_only(options: PathOptions) {
        let body = json!({
            "message": "Cannot find point 1",
            "hints": [{
                "message": "Cannot find point 1: 45.4,-73.7",
                "details": "com.graphhopper.util.exceptions.PointNotFoundException",
                "point_index": 1
            }],
            "paths": [{"distance": 1.0}]
        });

        let parsed = parse_response(&response(400, &body, &[("X-Trace", "t")]), options)
            .expect("parse");

        assert!(parsed.paths.is_empty());
        assert_eq!(
            parsed.errors,
            vec![ServiceError::PointNotFound {
                message: "Cannot find point 1: 45.4,-73.7".to_owned(),
                point_index: 1
            }]
        );
        assert_eq!(parsed.hints.get("x-trace"), Some(&json!(["t"])));
    }

    #[rstest]
    fn reads_paths_in_order(options: PathOptions) {
        let body = json!({"paths": [{"distance": 10.0}, {"distance": 12.0}]});
        let parsed = parse_response(&response(200, &body, &[]), options).expect("parse");
        let distances: Vec<f64> = parsed.paths.iter().map(|path| path.distance).collect();
        assert_eq!(distances, [10.0, 12.0]);
    }

    #[rstest]
    fn malformed_json_is_a_parse_error(options: PathOptions) {
        let bad = HttpResponse {
            status: 502,
            headers: Vec::new(),
            body: b"<html>Bad Gateway</html>".to_vec(),
        };
        let err = parse_response(&bad, options).expect_err("not JSON");
        assert!(matches!(err, ClientError::Parse(_)));
    }
}
