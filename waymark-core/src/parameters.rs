//! Well-known hint and parameter names understood by the routing service.

/// Include turn instructions.
pub const INSTRUCTIONS: &str = "instructions";
/// Return path geometry.
pub const CALC_POINTS: &str = "calc_points";
/// Include elevation in path geometry.
pub const ELEVATION: &str = "elevation";
/// Reorder intermediate points to minimise cost.
pub const OPTIMIZE: &str = "optimize";
/// Response format for GET requests.
pub const TYPE: &str = "type";
/// Per-request timeout in milliseconds; consumed by the client.
pub const TIMEOUT: &str = "timeout";
/// Whether instruction texts are used; consumed by the client and never sent.
pub const TURN_DESCRIPTION: &str = "turn_description";
/// API key parameter.
pub const KEY: &str = "key";
/// Encoded geometry flag.
pub const POINTS_ENCODED: &str = "points_encoded";
/// Precision of encoded geometry.
pub const POINTS_ENCODED_MULTIPLIER: &str = "points_encoded_multiplier";
/// Path detail parameter.
pub const DETAILS: &str = "details";
/// Point hint parameter.
pub const POINT_HINT: &str = "point_hint";
/// Curbside parameter.
pub const CURBSIDE: &str = "curbside";
/// Snap prevention parameter.
pub const SNAP_PREVENTION: &str = "snap_prevention";
/// Custom model body member.
pub const CUSTOM_MODEL: &str = "custom_model";
