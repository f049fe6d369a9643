//! Authentication primitives: login credentials and the login/register form.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

/// Minimum username length, counted in characters.
pub const USERNAME_MIN: usize = 3;
/// Minimum password length, counted in characters.
pub const PASSWORD_MIN: usize = 6;

/// Form-level message used when required fields are missing.
pub const FORM_SUBMITTED_INCORRECTLY: &str = "Form submitted incorrectly";

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use jokes::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" kody ", "twixrox").unwrap();
/// assert_eq!(creds.username(), "kody");
/// assert_eq!(creds.password(), "twixrox");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"..")
            .finish()
    }
}

/// Which flow a login form submission asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginType {
    /// Sign in to an existing account.
    Login,
    /// Create a new account and sign in.
    Register,
}

impl LoginType {
    /// Parse the raw `loginType` form value. Unknown values yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "login" => Some(Self::Login),
            "register" => Some(Self::Register),
            _ => None,
        }
    }
}

/// Field-level validation messages for the login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginFieldErrors {
    /// Message for the `username` field.
    pub username: Option<String>,
    /// Message for the `password` field.
    pub password: Option<String>,
}

impl LoginFieldErrors {
    /// True when no field carries a message.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

/// Raw login form values as submitted; absent fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// `login` or `register`.
    pub login_type: Option<String>,
    /// Requested username.
    pub username: Option<String>,
    /// Plaintext password.
    pub password: Option<String>,
}

/// A login form that passed shape and length validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLogin {
    /// Raw `loginType`; may still be an unknown value.
    pub login_type: String,
    /// Trimmed credentials.
    pub credentials: LoginCredentials,
}

/// Reasons a login form was rejected before any store access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginFormRejection {
    /// One or more fields were missing entirely.
    Malformed,
    /// Fields were present but failed length checks.
    Invalid(LoginFieldErrors),
}

impl LoginForm {
    /// Validate shape and field lengths.
    ///
    /// The login type itself is checked later, after field validation, so a
    /// submission with short fields reports field errors first.
    pub fn validate(&self) -> Result<ValidatedLogin, LoginFormRejection> {
        let (Some(login_type), Some(username), Some(password)) =
            (&self.login_type, &self.username, &self.password)
        else {
            return Err(LoginFormRejection::Malformed);
        };

        let errors = LoginFieldErrors {
            username: validate_username(username),
            password: validate_password(password),
        };
        if !errors.is_empty() {
            return Err(LoginFormRejection::Invalid(errors));
        }

        // Length checks above guarantee both values are non-empty.
        let credentials = LoginCredentials::try_from_parts(username, password)
            .map_err(|_| LoginFormRejection::Malformed)?;

        Ok(ValidatedLogin {
            login_type: login_type.clone(),
            credentials,
        })
    }
}

fn username_message() -> String {
    format!("Usernames must be at least {USERNAME_MIN} characters long")
}

fn password_message() -> String {
    format!("Passwords must be at least {PASSWORD_MIN} characters long")
}

fn validate_username(raw: &str) -> Option<String> {
    (raw.trim().chars().count() < USERNAME_MIN).then(username_message)
}

fn validate_password(raw: &str) -> Option<String> {
    (raw.chars().count() < PASSWORD_MIN).then(password_message)
}
