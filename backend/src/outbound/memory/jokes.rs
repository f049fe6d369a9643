use std::cmp::Ordering;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{JokePersistenceError, JokeRepository};
use crate::domain::{Joke, JokeId, JokeSummary};

/// `JokeRepository` over a mutex-guarded vector.
///
/// Ordering matches the Diesel adapter: creation time, then id.
#[derive(Default)]
pub struct InMemoryJokeRepository {
    jokes: Mutex<Vec<Joke>>,
}

impl InMemoryJokeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Joke>>, JokePersistenceError> {
        self.jokes
            .lock()
            .map_err(|_| JokePersistenceError::query("joke store lock poisoned"))
    }
}

fn creation_order(a: &Joke, b: &Joke) -> Ordering {
    a.created_at()
        .cmp(&b.created_at())
        .then_with(|| a.id().as_uuid().cmp(b.id().as_uuid()))
}

#[async_trait]
impl JokeRepository for InMemoryJokeRepository {
    async fn count(&self) -> Result<u64, JokePersistenceError> {
        let total = self.lock()?.len();
        u64::try_from(total).map_err(|_| JokePersistenceError::query("joke count overflow"))
    }

    async fn find_by_id(&self, id: &JokeId) -> Result<Option<Joke>, JokePersistenceError> {
        Ok(self.lock()?.iter().find(|joke| joke.id() == *id).cloned())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<JokeSummary>, JokePersistenceError> {
        let mut jokes = self.lock()?.clone();
        jokes.sort_by(|a, b| creation_order(b, a));
        Ok(jokes.iter().take(limit).map(Joke::summary).collect())
    }

    async fn find_at_offset(&self, offset: u64) -> Result<Option<Joke>, JokePersistenceError> {
        let Ok(offset) = usize::try_from(offset) else {
            return Ok(None);
        };
        let mut jokes = self.lock()?.clone();
        jokes.sort_by(creation_order);
        Ok(jokes.into_iter().nth(offset))
    }

    async fn create(&self, joke: &Joke) -> Result<(), JokePersistenceError> {
        self.lock()?.push(joke.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: &JokeId) -> Result<bool, JokePersistenceError> {
        let mut jokes = self.lock()?;
        let before = jokes.len();
        jokes.retain(|joke| joke.id() != *id);
        Ok(jokes.len() < before)
    }
}
