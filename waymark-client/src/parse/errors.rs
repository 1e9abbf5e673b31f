//! Classification of error payloads.

use serde_json::{Map, Value};
use waymark_core::ServiceError;

/// Read the service errors from an error payload.
///
/// Each object in `hints` (an array, or the values of an object) becomes one
/// error, classified by its `details` member. When nothing structured was
/// sent the top-level message is reported on its own.
pub(crate) fn read_errors(message: &str, hints: Option<&Value>) -> Vec<ServiceError> {
    let items: Vec<&Value> = match hints {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::Object(map)) => map.values().collect(),
        _ => Vec::new(),
    };

    let mut errors: Vec<ServiceError> = items
        .into_iter()
        .filter_map(Value::as_object)
        .map(classify)
        .collect();
    if errors.is_empty() {
        errors.push(ServiceError::Message {
            message: message.to_owned(),
        });
    }
    errors
}

fn classify(error: &Map<String, Value>) -> ServiceError {
    let message = text(error, "message");
    let class = text(error, "details");
    let point_index = error
        .get("point_index")
        .and_then(Value::as_u64)
        .and_then(|index| usize::try_from(index).ok())
        .unwrap_or_default();

    // `details` carries a qualified class name such as
    // `com.example.PointNotFoundException`.
    let simple = class.rsplit('.').next().unwrap_or_default();
    let kind = simple.strip_suffix("Exception").unwrap_or(simple);

    match kind {
        "UnsupportedOperation" => ServiceError::UnsupportedOperation { message },
        "IllegalState" => ServiceError::IllegalState { message },
        "IllegalArgument" => ServiceError::IllegalArgument { message },
        "PointNotFound" => ServiceError::PointNotFound {
            message,
            point_index,
        },
        "PointOutOfBounds" => ServiceError::PointOutOfBounds {
            message,
            point_index,
        },
        "ConnectionNotFound" => ServiceError::ConnectionNotFound {
            message,
            details: error.clone(),
        },
        "MaximumNodesExceeded" => ServiceError::MaximumNodesExceeded {
            message,
            details: error.clone(),
        },
        "" => ServiceError::Detailed {
            message,
            details: error.clone(),
        },
        _ => ServiceError::Detailed {
            message: format!("{class} {message}"),
            details: error.clone(),
        },
    }
}

fn text(object: &Map<String, Value>, key: &str) -> String {
    object
        .get(key)
        .and_then(waymark_core::value_as_text)
        .unwrap_or_default()
}
