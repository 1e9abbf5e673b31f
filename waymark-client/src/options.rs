//! Output options resolved from client defaults and request hints.

use std::time::Duration;

use waymark_core::{Hints, parameters};

use crate::{RequestError, RoutingClientConfig};

/// Output flags for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OutputOptions {
    pub instructions: bool,
    pub calc_points: bool,
    pub elevation: bool,
    pub optimize: String,
    pub turn_description: bool,
    pub timeout: Duration,
}

impl OutputOptions {
    /// Read each flag from `hints`, falling back to `config`.
    ///
    /// Hints are not modified; callers that send the request remove
    /// `turn_description` themselves.
    pub fn resolve(config: &RoutingClientConfig, hints: &Hints) -> Result<Self, RequestError> {
        let instructions = hints.get_bool(parameters::INSTRUCTIONS, config.instructions);
        let calc_points = hints.get_bool(parameters::CALC_POINTS, config.calc_points);
        if instructions && !calc_points {
            return Err(RequestError::InstructionsWithoutPoints);
        }
        Ok(Self {
            instructions,
            calc_points,
            elevation: hints.get_bool(parameters::ELEVATION, config.elevation),
            optimize: hints.get_string(parameters::OPTIMIZE, &config.optimize),
            turn_description: hints.get_bool(parameters::TURN_DESCRIPTION, true),
            timeout: request_timeout(config, hints),
        })
    }
}

/// The `timeout` hint in milliseconds, or the configured timeout.
pub(crate) fn request_timeout(config: &RoutingClientConfig, hints: &Hints) -> Duration {
    if hints.contains_key(parameters::TIMEOUT) {
        let fallback = u64::try_from(config.timeout.as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(hints.get_u64(parameters::TIMEOUT, fallback))
    } else {
        config.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn config() -> RoutingClientConfig {
        RoutingClientConfig::default()
    }

    #[rstest]
    fn falls_back_to_config(config: RoutingClientConfig) {
        let options = OutputOptions::resolve(&config, &Hints::new()).expect("valid options");
        assert!(options.instructions);
        assert!(options.calc_points);
        assert!(!options.elevation);
        assert_eq!(options.optimize, "false");
        assert!(options.turn_description);
        assert_eq!(options.timeout, config.timeout);
    }

    #[rstest]
    fn hints_override_config(config: RoutingClientConfig) {
        let hints: Hints = [
            ("elevation", serde_json::json!(true)),
            ("Timeout", serde_json::json!(5)),
            ("turn_description", serde_json::json!("false")),
        ]
        .into_iter()
        .collect();

        let options = OutputOptions::resolve(&config, &hints).expect("valid options");

        assert!(options.elevation);
        assert!(!options.turn_description);
        assert_eq!(options.timeout, Duration::from_millis(5));
    }

    #[rstest]
    fn instructions_need_points(config: RoutingClientConfig) {
        let hints: Hints = [("calc_points", false)].into_iter().collect();
        assert_eq!(
            OutputOptions::resolve(&config, &hints),
            Err(RequestError::InstructionsWithoutPoints)
        );

        let hints: Hints = [("calc_points", false), ("instructions", false)]
            .into_iter()
            .collect();
        assert!(OutputOptions::resolve(&config, &hints).is_ok());
    }
}
