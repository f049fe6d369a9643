//! Driving port for public joke reads.

use async_trait::async_trait;

use crate::domain::{Error, Joke, JokeId, JokeSummary};

/// Domain use-case port for listing and fetching jokes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JokesQuery: Send + Sync {
    /// The most recent jokes, newest first.
    async fn recent(&self) -> Result<Vec<JokeSummary>, Error>;

    /// Fetch a joke by identifier.
    async fn find(&self, id: &JokeId) -> Result<Option<Joke>, Error>;

    /// Pick a joke uniformly at random; `None` when there are no jokes.
    async fn random(&self) -> Result<Option<Joke>, Error>;
}
