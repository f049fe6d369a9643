//! Driving port for login and registration use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing (or importing) the backing
//! infrastructure. HTTP handler tests substitute a double instead of wiring
//! persistence.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

/// Result of a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The account was created.
    Registered(User),
    /// Another account already uses the username.
    UsernameTaken,
}

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Return the user whose password matches, or `None`.
    ///
    /// An unknown username and a wrong password are indistinguishable.
    async fn login(&self, credentials: &LoginCredentials) -> Result<Option<User>, Error>;

    /// Hash the password and store a new user.
    async fn register(&self, credentials: &LoginCredentials)
    -> Result<RegistrationOutcome, Error>;
}
