//! Query strings for GET route requests.

use url::form_urlencoded::byte_serialize;
use waymark_core::{RouteRequest, format_decimal, parameters, value_as_text};

use crate::options::OutputOptions;

/// Geometry precision requested from the service.
pub(crate) const POINTS_ENCODED_MULTIPLIER: u32 = 1_000_000;

/// Hints that are either sent as dedicated parameters or consumed locally.
///
/// Keys are compared lower-cased.
const GET_IGNORED_HINTS: &[&str] = &[
    parameters::CALC_POINTS,
    "calcpoints",
    parameters::INSTRUCTIONS,
    parameters::ELEVATION,
    parameters::KEY,
    parameters::OPTIMIZE,
    parameters::TYPE,
    parameters::TIMEOUT,
    parameters::TURN_DESCRIPTION,
    parameters::POINTS_ENCODED,
    parameters::POINTS_ENCODED_MULTIPLIER,
    parameters::DETAILS,
    parameters::POINT_HINT,
    parameters::CURBSIDE,
    parameters::SNAP_PREVENTION,
    parameters::CUSTOM_MODEL,
    "profile",
    "point",
    "heading",
    "algorithm",
    "locale",
];

/// Appends `name=value` pairs to a base URL.
struct Query {
    url: String,
    first: bool,
}

impl Query {
    fn new(base: &str) -> Self {
        Self {
            url: base.to_owned(),
            first: !base.contains('?'),
        }
    }

    fn separator(&mut self) {
        self.url.push(if self.first { '?' } else { '&' });
        self.first = false;
    }

    /// Append a pair with a form-encoded value.
    fn text(&mut self, name: &str, value: &str) -> &mut Self {
        self.separator();
        self.url.extend(byte_serialize(name.as_bytes()));
        self.url.push('=');
        self.url.extend(byte_serialize(value.as_bytes()));
        self
    }

    /// Append a pair whose value is already URL safe.
    fn raw(&mut self, name: &str, value: impl std::fmt::Display) -> &mut Self {
        self.separator();
        self.url.push_str(name);
        self.url.push('=');
        self.url.push_str(&value.to_string());
        self
    }

    fn finish(self) -> String {
        self.url
    }
}

fn any_non_empty(values: &[String]) -> bool {
    values.iter().any(|value| !value.is_empty())
}

/// Build the full GET URL for `request`.
///
/// Parameters appear in a fixed order so identical requests produce identical
/// URLs.
pub(crate) fn get_url(
    route_url: &str,
    request: &RouteRequest,
    options: &OutputOptions,
    key: Option<&str>,
) -> String {
    let mut query = Query::new(route_url);
    query.text("profile", &request.profile);
    for point in &request.points {
        query.raw("point", point.to_query_value());
    }
    query
        .text(
            parameters::TYPE,
            &request.hints.get_string(parameters::TYPE, "json"),
        )
        .raw(parameters::INSTRUCTIONS, options.instructions)
        .raw(parameters::POINTS_ENCODED, true)
        .raw(parameters::POINTS_ENCODED_MULTIPLIER, POINTS_ENCODED_MULTIPLIER)
        .raw(parameters::CALC_POINTS, options.calc_points)
        .text("algorithm", &request.algorithm)
        .text("locale", &request.locale)
        .raw(parameters::ELEVATION, options.elevation)
        .text(parameters::OPTIMIZE, &options.optimize);

    for heading in &request.headings {
        query.raw("heading", format_decimal(*heading));
    }
    for detail in &request.path_details {
        query.text(parameters::DETAILS, detail);
    }
    if any_non_empty(&request.point_hints) {
        for hint in &request.point_hints {
            query.text(parameters::POINT_HINT, hint);
        }
    }
    if any_non_empty(&request.curbsides) {
        for curbside in &request.curbsides {
            query.text(parameters::CURBSIDE, curbside);
        }
    }
    for prevention in &request.snap_preventions {
        query.text(parameters::SNAP_PREVENTION, prevention);
    }
    if let Some(key) = key {
        query.text(parameters::KEY, key);
    }

    for (name, value) in request.hints.iter() {
        if GET_IGNORED_HINTS.contains(&name.to_ascii_lowercase().as_str()) {
            continue;
        }
        match value_as_text(value) {
            Some(text) if !text.is_empty() => {
                query.text(name, &text);
            }
            _ => {}
        }
    }

    query.finish()
}

/// URL for POST requests: the key travels in the query string.
pub(crate) fn post_url(route_url: &str, key: Option<&str>) -> String {
    let mut query = Query::new(route_url);
    if let Some(key) = key {
        query.text(parameters::KEY, key);
    }
    query.finish()
}
