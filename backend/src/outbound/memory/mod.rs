//! In-process repositories used when no database URL is configured and by
//! the end-to-end tests. Contents are lost on restart.

mod jokes;
mod users;

pub use jokes::InMemoryJokeRepository;
pub use users::InMemoryUserRepository;
