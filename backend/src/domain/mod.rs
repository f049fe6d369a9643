//! Domain primitives, services and ports.
//!
//! Purpose: define the strongly typed entities of the jokes application and
//! the use-cases that operate on them. Nothing in this module imports the web
//! framework or the ORM; adapters live under `inbound` and `outbound`.
//!
//! Public surface:
//! - Error (alias to `error::Error`) and ErrorCode: transport agnostic failures.
//! - User, UserId, Username, PasswordDigest: account identity.
//! - Joke, JokeId, JokeDraft, JokeFieldErrors: the joke entity and its form.
//! - LoginCredentials, LoginForm, LoginFieldErrors: sign-in form validation.
//! - PasswordVerifier: Argon2id hashing and verification.
//! - AuthService, JokeService: use-case services behind the driving ports.

pub mod auth;
mod auth_service;
pub mod error;
pub mod joke;
mod joke_service;
pub mod password;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    FORM_SUBMITTED_INCORRECTLY, LoginCredentials, LoginFieldErrors, LoginForm,
    LoginFormRejection, LoginType, LoginValidationError, PASSWORD_MIN, USERNAME_MIN,
    ValidatedLogin,
};
pub use self::auth_service::AuthService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::joke::{
    JOKE_CONTENT_MIN, JOKE_NAME_MIN, Joke, JokeContent, JokeDraft, JokeDraftRejection,
    JokeFieldErrors, JokeId, JokeName, JokeSummary, JokeValidationError,
};
pub use self::joke_service::{JokeService, RECENT_JOKES_LIMIT};
pub use self::password::{PasswordCost, PasswordCostError, PasswordVerifier};
pub use self::trace_id::TraceId;
pub use self::user::{PasswordDigest, User, UserId, UserValidationError, Username};

/// Header name carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Convenient domain result alias.
pub type DomainResult<T> = Result<T, Error>;
