//! Joke listing, lookup, random pick, creation and owner-only deletion.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use rand::Rng;
use tracing::{info, warn};

use super::ports::{
    DELETE_MISSING_MESSAGE, DELETE_NOT_OWNER_MESSAGE, JokeRepository, JokesCommand, JokesQuery,
};
use super::{Error, Joke, JokeDraft, JokeId, JokeSummary, UserId};

/// Number of entries in the recent jokes list.
pub const RECENT_JOKES_LIMIT: usize = 5;

/// Count-then-fetch rounds tried before the random pick reports no joke.
const RANDOM_PICK_ATTEMPTS: u32 = 2;

/// Domain service implementing [`JokesQuery`] and [`JokesCommand`].
#[derive(Clone)]
pub struct JokeService<J> {
    jokes: Arc<J>,
    clock: Arc<dyn Clock>,
}

impl<J> JokeService<J> {
    /// Create a new service; `clock` stamps `created_at` on new jokes.
    pub fn new(jokes: Arc<J>, clock: Arc<dyn Clock>) -> Self {
        Self { jokes, clock }
    }
}

#[async_trait]
impl<J> JokesQuery for JokeService<J>
where
    J: JokeRepository,
{
    async fn recent(&self) -> Result<Vec<JokeSummary>, Error> {
        Ok(self.jokes.list_recent(RECENT_JOKES_LIMIT).await?)
    }

    async fn find(&self, id: &JokeId) -> Result<Option<Joke>, Error> {
        Ok(self.jokes.find_by_id(id).await?)
    }

    async fn random(&self) -> Result<Option<Joke>, Error> {
        for attempt in 1..=RANDOM_PICK_ATTEMPTS {
            let count = self.jokes.count().await?;
            if count == 0 {
                return Ok(None);
            }
            let offset = rand::thread_rng().gen_range(0..count);
            if let Some(joke) = self.jokes.find_at_offset(offset).await? {
                return Ok(Some(joke));
            }
            // Rows deleted between the count and the fetch.
            warn!(attempt, offset, count, "random joke offset no longer exists");
        }
        Ok(None)
    }
}

#[async_trait]
impl<J> JokesCommand for JokeService<J>
where
    J: JokeRepository,
{
    async fn create(&self, jokester_id: &UserId, draft: JokeDraft) -> Result<Joke, Error> {
        let joke = Joke::new(
            JokeId::random(),
            draft,
            jokester_id.clone(),
            self.clock.utc(),
        );
        self.jokes.create(&joke).await?;
        info!(joke_id = %joke.id(), jokester_id = %jokester_id, "joke created");
        Ok(joke)
    }

    async fn delete(&self, requester: &UserId, id: &JokeId) -> Result<(), Error> {
        let Some(joke) = self.jokes.find_by_id(id).await? else {
            return Err(Error::not_found(DELETE_MISSING_MESSAGE));
        };
        if !joke.is_owned_by(requester) {
            warn!(joke_id = %id, requester = %requester, "delete attempted by non-owner");
            return Err(Error::unauthorized(DELETE_NOT_OWNER_MESSAGE));
        }
        if !self.jokes.delete_by_id(id).await? {
            return Err(Error::not_found(DELETE_MISSING_MESSAGE));
        }
        info!(joke_id = %id, "joke deleted");
        Ok(())
    }
}
