//! Builds the HTTP state from the configured storage.

use std::sync::Arc;

use mockable::DefaultClock;

use jokes::domain::ports::{JokeRepository, UserRepository};
use jokes::domain::{AuthService, JokeService, PasswordVerifier};
use jokes::inbound::http::state::HttpState;
use jokes::outbound::memory::{InMemoryJokeRepository, InMemoryUserRepository};
use jokes::outbound::persistence::{DbPool, DieselJokeRepository, DieselUserRepository};
use tracing::warn;

fn state_from_repositories<U, J>(users: U, jokes: J, passwords: PasswordVerifier) -> HttpState
where
    U: UserRepository + 'static,
    J: JokeRepository + 'static,
{
    let auth = Arc::new(AuthService::new(Arc::new(users), passwords));
    let jokes = Arc::new(JokeService::new(Arc::new(jokes), Arc::new(DefaultClock)));
    HttpState::new(auth.clone(), auth, jokes.clone(), jokes)
}

/// Diesel-backed ports when a pool is configured, in-memory ports otherwise.
pub fn build_http_state(db_pool: Option<&DbPool>, passwords: PasswordVerifier) -> HttpState {
    match db_pool {
        Some(pool) => state_from_repositories(
            DieselUserRepository::new(pool.clone()),
            DieselJokeRepository::new(pool.clone()),
            passwords,
        ),
        None => {
            warn!("no database configured; users and jokes are kept in memory");
            state_from_repositories(
                InMemoryUserRepository::new(),
                InMemoryJokeRepository::new(),
                passwords,
            )
        }
    }
}
