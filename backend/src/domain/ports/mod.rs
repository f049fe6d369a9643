//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`UserRepository`, `JokeRepository`) are implemented by the
//! outbound adapters. Driving ports (`LoginService`, `UsersQuery`,
//! `JokesQuery`, `JokesCommand`) are what inbound handlers call.

mod macros;
pub(crate) use macros::define_port_error;

mod joke_repository;
mod jokes_command;
mod jokes_query;
mod login_service;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use joke_repository::MockJokeRepository;
pub use joke_repository::{JokePersistenceError, JokeRepository};
#[cfg(test)]
pub use jokes_command::MockJokesCommand;
pub use jokes_command::{DELETE_MISSING_MESSAGE, DELETE_NOT_OWNER_MESSAGE, JokesCommand};
#[cfg(test)]
pub use jokes_query::MockJokesQuery;
pub use jokes_query::JokesQuery;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{LoginService, RegistrationOutcome};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
