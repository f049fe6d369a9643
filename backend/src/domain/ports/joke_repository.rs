//! Port for joke persistence.

use async_trait::async_trait;

use crate::domain::{Error, Joke, JokeId, JokeSummary};

use super::define_port_error;

define_port_error! {
    /// Errors raised by joke repository adapters.
    pub enum JokePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "joke repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "joke repository query failed: {message}",
    }
}

impl From<JokePersistenceError> for Error {
    fn from(error: JokePersistenceError) -> Self {
        match error {
            JokePersistenceError::Connection { message } => Self::service_unavailable(message),
            JokePersistenceError::Query { message } => Self::internal(message),
        }
    }
}

/// Keyed lookups, inserts and deletes over stored jokes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JokeRepository: Send + Sync {
    /// Total number of stored jokes.
    async fn count(&self) -> Result<u64, JokePersistenceError>;

    /// Fetch a joke by identifier.
    async fn find_by_id(&self, id: &JokeId) -> Result<Option<Joke>, JokePersistenceError>;

    /// Most recent jokes first, at most `limit` entries.
    async fn list_recent(&self, limit: usize) -> Result<Vec<JokeSummary>, JokePersistenceError>;

    /// The joke at `offset` in creation order, if any.
    async fn find_at_offset(&self, offset: u64) -> Result<Option<Joke>, JokePersistenceError>;

    /// Insert a new joke.
    async fn create(&self, joke: &Joke) -> Result<(), JokePersistenceError>;

    /// Delete a joke.
    ///
    /// Returns `true` when a row was deleted and `false` when the joke did
    /// not exist.
    async fn delete_by_id(&self, id: &JokeId) -> Result<bool, JokePersistenceError>;
}
