//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{JokesCommand, JokesQuery, LoginService, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Login and registration.
    pub login: Arc<dyn LoginService>,
    /// User lookups for the auth gate.
    pub users: Arc<dyn UsersQuery>,
    /// Public joke reads.
    pub jokes: Arc<dyn JokesQuery>,
    /// Joke creation and deletion.
    pub jokes_command: Arc<dyn JokesCommand>,
}

impl HttpState {
    /// Construct state from port implementations.
    pub fn new(
        login: Arc<dyn LoginService>,
        users: Arc<dyn UsersQuery>,
        jokes: Arc<dyn JokesQuery>,
        jokes_command: Arc<dyn JokesCommand>,
    ) -> Self {
        Self {
            login,
            users,
            jokes,
            jokes_command,
        }
    }
}
