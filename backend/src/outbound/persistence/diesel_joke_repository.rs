//! PostgreSQL-backed `JokeRepository` implementation using Diesel ORM.
//!
//! Offsets walk jokes in creation order with the id as a tiebreak, so a
//! random offset below `count()` always lands on a row unless a concurrent
//! delete got there first.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{JokePersistenceError, JokeRepository};
use crate::domain::{Joke, JokeDraft, JokeDraftRejection, JokeId, JokeSummary, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{JokeRow, JokeSummaryRow, NewJokeRow};
use super::pool::{DbPool, PoolError};
use super::schema::jokes;

/// Diesel-backed implementation of the `JokeRepository` port.
#[derive(Clone)]
pub struct DieselJokeRepository {
    pool: DbPool,
}

impl DieselJokeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> JokePersistenceError {
    map_basic_pool_error(error, JokePersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> JokePersistenceError {
    map_basic_diesel_error(error, JokePersistenceError::query, JokePersistenceError::connection)
}

fn row_to_joke(row: JokeRow) -> Result<Joke, JokePersistenceError> {
    let draft = JokeDraft::validate(Some(row.name.as_str()), Some(row.content.as_str()))
        .map_err(|rejection| {
            let detail = match rejection {
                JokeDraftRejection::Malformed => "missing fields".to_owned(),
                JokeDraftRejection::Invalid(errors) => [errors.name, errors.content]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join("; "),
            };
            JokePersistenceError::query(format!("corrupted joke {}: {detail}", row.id))
        })?;
    Ok(Joke::new(
        JokeId::from_uuid(row.id),
        draft,
        UserId::from_uuid(row.jokester_id),
        row.created_at,
    ))
}

fn to_sql_offset(value: u64) -> Result<i64, JokePersistenceError> {
    i64::try_from(value).map_err(|_| JokePersistenceError::query("offset out of range"))
}

#[async_trait]
impl JokeRepository for DieselJokeRepository {
    async fn count(&self) -> Result<u64, JokePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = jokes::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        u64::try_from(total).map_err(|_| JokePersistenceError::query("negative joke count"))
    }

    async fn find_by_id(&self, id: &JokeId) -> Result<Option<Joke>, JokePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = jokes::table
            .find(*id.as_uuid())
            .select(JokeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_joke).transpose()
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<JokeSummary>, JokePersistenceError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = jokes::table
            .order((jokes::created_at.desc(), jokes::id.desc()))
            .limit(limit)
            .select(JokeSummaryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows
            .into_iter()
            .map(|row| JokeSummary {
                id: JokeId::from_uuid(row.id),
                name: row.name,
            })
            .collect())
    }

    async fn find_at_offset(&self, offset: u64) -> Result<Option<Joke>, JokePersistenceError> {
        let offset = to_sql_offset(offset)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = jokes::table
            .order((jokes::created_at.asc(), jokes::id.asc()))
            .offset(offset)
            .select(JokeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_joke).transpose()
    }

    async fn create(&self, joke: &Joke) -> Result<(), JokePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewJokeRow {
            id: *joke.id().as_uuid(),
            jokester_id: *joke.jokester_id().as_uuid(),
            name: joke.name().as_str(),
            content: joke.content().as_str(),
            created_at: joke.created_at(),
        };
        diesel::insert_into(jokes::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete_by_id(&self, id: &JokeId) -> Result<bool, JokePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(jokes::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn row(name: &str, content: &str) -> JokeRow {
        JokeRow {
            id: uuid::Uuid::new_v4(),
            jokester_id: uuid::Uuid::new_v4(),
            name: name.to_owned(),
            content: content.to_owned(),
            created_at: Utc
                .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
                .single()
                .expect("timestamp"),
        }
    }

    #[rstest]
    fn rows_become_domain_jokes() {
        let source = row("Frisbee", "I was wondering why the frisbee was getting bigger.");
        let joke = row_to_joke(source.clone()).expect("valid row");
        assert_eq!(joke.id().as_uuid(), &source.id);
        assert_eq!(joke.jokester_id().as_uuid(), &source.jokester_id);
        assert_eq!(joke.created_at(), source.created_at);
    }

    #[rstest]
    fn rows_breaking_form_rules_are_reported() {
        let err = row_to_joke(row("ab", "short")).expect_err("corrupted row");
        assert!(matches!(err, JokePersistenceError::Query { .. }));
        assert!(err.to_string().contains("Joke name must be at least 3 characters long"));
    }

    #[rstest]
    fn oversized_offsets_are_rejected() {
        assert!(to_sql_offset(u64::MAX).is_err());
        assert_eq!(to_sql_offset(4).expect("small offset"), 4);
    }
}
