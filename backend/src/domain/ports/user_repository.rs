//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Error, User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The unique username constraint rejected an insert.
        DuplicateUsername { username: String } => "username {username} is already taken",
    }
}

impl From<UserPersistenceError> for Error {
    fn from(error: UserPersistenceError) -> Self {
        match error {
            UserPersistenceError::Connection { message } => Self::service_unavailable(message),
            UserPersistenceError::Query { message } => Self::internal(message),
            UserPersistenceError::DuplicateUsername { username } => {
                Self::conflict(format!("User with username {username} already exists"))
            }
        }
    }
}

/// Keyed access to stored users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by exact username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Insert a new user.
    ///
    /// Adapters must return [`UserPersistenceError::DuplicateUsername`] when
    /// the username is already stored.
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError>;
}
