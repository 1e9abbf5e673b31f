//! JSON bodies for POST route requests.

use serde_json::{Map, Value, json};
use waymark_core::{RouteRequest, parameters};

use crate::ClientError;
use crate::options::OutputOptions;
use crate::query::POINTS_ENCODED_MULTIPLIER;

/// Hints never copied into the body.
const POST_IGNORED_HINTS: &[&str] = &[parameters::KEY, parameters::TIMEOUT, parameters::TURN_DESCRIPTION];

/// Build the POST body for `request`.
///
/// Hints whose name matches a member already written are skipped: their value
/// has been folded into that member.
pub(crate) fn post_body(
    request: &RouteRequest,
    options: &OutputOptions,
) -> Result<Map<String, Value>, ClientError> {
    let mut body = Map::new();
    let points: Vec<[f64; 2]> = request.points.iter().map(|point| point.to_lon_lat()).collect();
    body.insert("points".to_owned(), json!(points));
    if !request.point_hints.is_empty() {
        body.insert("point_hints".to_owned(), json!(request.point_hints));
    }
    if !request.headings.is_empty() {
        body.insert("headings".to_owned(), json!(request.headings));
    }
    if !request.curbsides.is_empty() {
        body.insert("curbsides".to_owned(), json!(request.curbsides));
    }
    if !request.snap_preventions.is_empty() {
        body.insert("snap_preventions".to_owned(), json!(request.snap_preventions));
    }
    if !request.path_details.is_empty() {
        body.insert(parameters::DETAILS.to_owned(), json!(request.path_details));
    }
    body.insert("locale".to_owned(), json!(request.locale));
    if !request.profile.is_empty() {
        body.insert("profile".to_owned(), json!(request.profile));
    }
    if !request.algorithm.is_empty() {
        body.insert("algorithm".to_owned(), json!(request.algorithm));
    }
    body.insert(parameters::POINTS_ENCODED.to_owned(), json!(true));
    body.insert(
        parameters::POINTS_ENCODED_MULTIPLIER.to_owned(),
        json!(POINTS_ENCODED_MULTIPLIER),
    );
    body.insert(parameters::INSTRUCTIONS.to_owned(), json!(options.instructions));
    body.insert(parameters::CALC_POINTS.to_owned(), json!(options.calc_points));
    body.insert(parameters::ELEVATION.to_owned(), json!(options.elevation));
    body.insert(parameters::OPTIMIZE.to_owned(), json!(options.optimize));
    if let Some(model) = &request.custom_model {
        body.insert(parameters::CUSTOM_MODEL.to_owned(), serde_json::to_value(model)?);
    }

    for (name, value) in request.hints.iter() {
        let lower = name.to_ascii_lowercase();
        if POST_IGNORED_HINTS.contains(&lower.as_str()) || body.contains_key(&lower) {
            continue;
        }
        body.insert(name.to_owned(), value.clone());
    }

    Ok(body)
}
