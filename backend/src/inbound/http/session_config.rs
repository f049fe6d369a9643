//! Session configuration parsing and validation.
//!
//! Centralises the environment-driven session settings so they are validated
//! once at startup and can be tested in isolation with `mockable::MockEnv`.

pub mod fingerprint;
mod parsing;

use actix_web::cookie::Key;
use mockable::Env;
use zeroize::Zeroizing;

use self::parsing::{BoolEnvConfig, parse_bool_env};

/// Current signing secret. Required.
pub const SESSION_SECRET_ENV: &str = "SESSION_SECRET";
/// Comma-separated retired secrets still accepted for verification.
pub const PREVIOUS_SECRETS_ENV: &str = "SESSION_PREVIOUS_SECRETS";
/// Whether the session cookie carries the `Secure` attribute.
pub const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
/// Minimum secret length in bytes; shorter material cannot derive a key.
pub const SESSION_SECRET_MIN_LEN: usize = 32;

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate malformed toggles and emit warnings.
    Debug,
    /// Release builds reject malformed toggles.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jokes::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Session settings derived from the environment.
pub struct SessionSettings {
    /// Key used to sign new cookies.
    pub current: Key,
    /// Retired keys, tried in order after `current` when verifying.
    pub previous: Vec<Key>,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SessionConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// A secret is too short to derive a signing key from.
    #[error("{name} entry {index} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        name: &'static str,
        index: usize,
        length: usize,
        min_len: usize,
    },
}

/// Build session settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use jokes::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "SESSION_SECRET" => Some("s".repeat(32)),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Release).expect("valid");
/// assert!(settings.cookie_secure);
/// assert!(settings.previous.is_empty());
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let current = current_key_from_env(env)?;
    let previous = previous_keys_from_env(env)?;
    let cookie_secure = parse_bool_env(env, mode, BoolEnvConfig::new(COOKIE_SECURE_ENV, true))?;

    Ok(SessionSettings {
        current,
        previous,
        cookie_secure,
    })
}

fn current_key_from_env<E: Env>(env: &E) -> Result<Key, SessionConfigError> {
    let secret = env
        .string(SESSION_SECRET_ENV)
        .filter(|value| !value.is_empty())
        .map(Zeroizing::new)
        .ok_or(SessionConfigError::MissingEnv {
            name: SESSION_SECRET_ENV,
        })?;
    derive_key(SESSION_SECRET_ENV, 0, secret.as_bytes())
}

fn previous_keys_from_env<E: Env>(env: &E) -> Result<Vec<Key>, SessionConfigError> {
    let Some(raw) = env.string(PREVIOUS_SECRETS_ENV).map(Zeroizing::new) else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|secret| !secret.is_empty())
        .enumerate()
        .map(|(index, secret)| derive_key(PREVIOUS_SECRETS_ENV, index, secret.as_bytes()))
        .collect()
}

fn derive_key(name: &'static str, index: usize, secret: &[u8]) -> Result<Key, SessionConfigError> {
    if secret.len() < SESSION_SECRET_MIN_LEN {
        return Err(SessionConfigError::SecretTooShort {
            name,
            index,
            length: secret.len(),
            min_len: SESSION_SECRET_MIN_LEN,
        });
    }
    Ok(Key::derive_from(secret))
}

#[cfg(test)]
mod tests;
