//! Driving port for user lookups.
//!
//! The auth gate uses this port to turn a session's user id into a full user
//! without importing outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Fetch the user with `id`, if it still exists.
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, Error>;
}
