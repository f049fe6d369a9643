//! Outbound adapters implementing the domain's repository ports.
//!
//! - **persistence**: PostgreSQL via Diesel, used when a database URL is set.
//! - **memory**: in-process maps for development and end-to-end tests.
//!
//! Adapters translate between domain types and storage representations and
//! contain no business logic.

pub mod memory;
pub mod persistence;
