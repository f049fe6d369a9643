//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module. Connections come from a `bb8` pool driven by
//! `diesel-async`.
//!
//! # Example
//!
//! ```ignore
//! use jokes::outbound::persistence::{DbPool, PoolConfig, DieselJokeRepository};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/jokes")).await?;
//! let jokes = DieselJokeRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_joke_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_joke_repository::DieselJokeRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
