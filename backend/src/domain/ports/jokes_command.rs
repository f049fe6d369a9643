//! Driving port for joke mutations.
//!
//! Callers resolve the acting user first; this port enforces ownership.

use async_trait::async_trait;

use crate::domain::{Error, Joke, JokeDraft, JokeId, UserId};

/// Message returned when deleting a joke that does not exist.
pub const DELETE_MISSING_MESSAGE: &str = "Can't delete what does not exist";
/// Message returned when someone other than the owner tries to delete.
pub const DELETE_NOT_OWNER_MESSAGE: &str = "Pssh, nice try. That's not your joke";

/// Domain use-case port for creating and deleting jokes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JokesCommand: Send + Sync {
    /// Store a validated draft owned by `jokester_id`.
    async fn create(&self, jokester_id: &UserId, draft: JokeDraft) -> Result<Joke, Error>;

    /// Delete `id` on behalf of `requester`.
    ///
    /// # Errors
    /// - [`crate::domain::ErrorCode::NotFound`] when the joke does not exist.
    /// - [`crate::domain::ErrorCode::Unauthorized`] when `requester` is not
    ///   the owner. Nothing is deleted in either case.
    async fn delete(&self, requester: &UserId, id: &JokeId) -> Result<(), Error>;
}
