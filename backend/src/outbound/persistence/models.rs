//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{jokes, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
}

/// Row struct for reading full jokes.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = jokes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct JokeRow {
    pub id: Uuid,
    pub jokester_id: Uuid,
    pub name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Row struct for the recent jokes list.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = jokes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct JokeSummaryRow {
    pub id: Uuid,
    pub name: String,
}

/// Insertable struct for creating new jokes.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = jokes)]
pub(crate) struct NewJokeRow<'a> {
    pub id: Uuid,
    pub jokester_id: Uuid,
    pub name: &'a str,
    pub content: &'a str,
    pub created_at: DateTime<Utc>,
}
