//! Unit tests for session configuration parsing.

use super::*;
use super::fingerprint::key_fingerprint;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;

const SECRET: &str = "s3cr3t-s3cr3t-s3cr3t-s3cr3t-s3cr3t";
const OLD_SECRET: &str = "old-old-old-old-old-old-old-old-old";

fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
        .collect();
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn expect_error(
    result: Result<SessionSettings, SessionConfigError>,
    label: &str,
) -> SessionConfigError {
    match result {
        Ok(_) => panic!("{label}"),
        Err(error) => error,
    }
}

#[rstest]
#[case(BuildMode::Debug)]
#[case(BuildMode::Release)]
fn missing_secret_is_fatal_in_every_mode(#[case] mode: BuildMode) {
    let env = mock_env(&[]);
    let err = expect_error(
        session_settings_from_env(&env, mode),
        "expected missing secret to fail",
    );
    assert_eq!(
        err,
        SessionConfigError::MissingEnv {
            name: SESSION_SECRET_ENV
        }
    );
}

#[rstest]
fn empty_secret_counts_as_missing() {
    let env = mock_env(&[(SESSION_SECRET_ENV, "")]);
    let err = expect_error(
        session_settings_from_env(&env, BuildMode::Debug),
        "expected empty secret to fail",
    );
    assert!(matches!(err, SessionConfigError::MissingEnv { .. }));
}

#[rstest]
fn short_secret_is_rejected() {
    let env = mock_env(&[(SESSION_SECRET_ENV, "too-short")]);
    let err = expect_error(
        session_settings_from_env(&env, BuildMode::Debug),
        "expected short secret to fail",
    );
    assert_eq!(
        err,
        SessionConfigError::SecretTooShort {
            name: SESSION_SECRET_ENV,
            index: 0,
            length: 9,
            min_len: SESSION_SECRET_MIN_LEN,
        }
    );
}

#[rstest]
fn defaults_to_secure_cookie_without_previous_keys() {
    let env = mock_env(&[(SESSION_SECRET_ENV, SECRET)]);
    let settings =
        session_settings_from_env(&env, BuildMode::Release).expect("settings should load");
    assert!(settings.cookie_secure);
    assert!(settings.previous.is_empty());
    assert_eq!(
        key_fingerprint(&settings.current),
        key_fingerprint(&Key::derive_from(SECRET.as_bytes()))
    );
}

#[rstest]
fn previous_secrets_are_split_trimmed_and_ordered() {
    let previous = format!(" {OLD_SECRET} ,, {SECRET}");
    let env = mock_env(&[
        (SESSION_SECRET_ENV, SECRET),
        (PREVIOUS_SECRETS_ENV, previous.as_str()),
    ]);
    let settings =
        session_settings_from_env(&env, BuildMode::Release).expect("settings should load");
    let fingerprints: Vec<String> = settings.previous.iter().map(key_fingerprint).collect();
    assert_eq!(
        fingerprints,
        vec![
            key_fingerprint(&Key::derive_from(OLD_SECRET.as_bytes())),
            key_fingerprint(&Key::derive_from(SECRET.as_bytes())),
        ]
    );
}

#[rstest]
fn short_previous_secret_reports_its_position() {
    let previous = format!("{OLD_SECRET},short");
    let env = mock_env(&[
        (SESSION_SECRET_ENV, SECRET),
        (PREVIOUS_SECRETS_ENV, previous.as_str()),
    ]);
    let err = expect_error(
        session_settings_from_env(&env, BuildMode::Debug),
        "expected short previous secret to fail",
    );
    assert!(matches!(
        err,
        SessionConfigError::SecretTooShort {
            name: PREVIOUS_SECRETS_ENV,
            index: 1,
            ..
        }
    ));
}

#[rstest]
#[case("0", false)]
#[case("false", false)]
#[case("No", false)]
#[case("1", true)]
#[case("yes", true)]
fn cookie_secure_parses_bool_values(#[case] raw: &str, #[case] expected: bool) {
    let env = mock_env(&[(SESSION_SECRET_ENV, SECRET), (COOKIE_SECURE_ENV, raw)]);
    let settings =
        session_settings_from_env(&env, BuildMode::Release).expect("settings should load");
    assert_eq!(settings.cookie_secure, expected);
}

#[rstest]
fn debug_invalid_cookie_secure_defaults_to_secure() {
    let env = mock_env(&[(SESSION_SECRET_ENV, SECRET), (COOKIE_SECURE_ENV, "maybe")]);
    let settings =
        session_settings_from_env(&env, BuildMode::Debug).expect("debug tolerates bad toggles");
    assert!(settings.cookie_secure);
}

#[rstest]
#[case("maybe")]
#[case("")]
fn release_invalid_cookie_secure_is_rejected(#[case] raw: &str) {
    let env = mock_env(&[(SESSION_SECRET_ENV, SECRET), (COOKIE_SECURE_ENV, raw)]);
    let err = expect_error(
        session_settings_from_env(&env, BuildMode::Release),
        "expected invalid toggle to fail",
    );
    assert!(matches!(
        err,
        SessionConfigError::InvalidEnv {
            name: COOKIE_SECURE_ENV,
            ..
        }
    ));
}
