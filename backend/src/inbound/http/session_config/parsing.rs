//! Environment parsing helpers for session configuration.

use mockable::Env;
use tracing::warn;

use super::{BuildMode, SessionConfigError};

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

/// Configuration for parsing a boolean environment variable.
pub(super) struct BoolEnvConfig {
    name: &'static str,
    default_value: bool,
}

impl BoolEnvConfig {
    pub(super) const fn new(name: &'static str, default_value: bool) -> Self {
        Self {
            name,
            default_value,
        }
    }
}

/// Parse a boolean toggle.
///
/// An unset variable takes the default in every mode. A malformed value is a
/// warning in debug builds and an error in release builds.
pub(super) fn parse_bool_env<E: Env>(
    env: &E,
    mode: BuildMode,
    config: BoolEnvConfig,
) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(config.name) else {
        return Ok(config.default_value);
    };
    if let Some(flag) = parse_bool(&value) {
        return Ok(flag);
    }

    if mode.is_debug() {
        warn!(
            value = %value,
            "invalid {}; defaulting to {}",
            config.name,
            config.default_value
        );
        Ok(config.default_value)
    } else {
        Err(SessionConfigError::InvalidEnv {
            name: config.name,
            value,
            expected: BOOL_EXPECTED,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
