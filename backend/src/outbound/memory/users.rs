use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId, Username};

#[derive(Default)]
struct UserTable {
    by_id: HashMap<Uuid, User>,
    ids_by_username: HashMap<String, Uuid>,
}

/// `UserRepository` over a mutex-guarded map, unique on username.
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: Mutex<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, UserTable>, UserPersistenceError> {
        self.table
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let table = self.lock()?;
        Ok(table
            .ids_by_username
            .get(username.as_str())
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.by_id.get(id.as_uuid()).cloned())
    }

    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut table = self.lock()?;
        let username = user.username().as_str();
        if table.ids_by_username.contains_key(username) {
            return Err(UserPersistenceError::duplicate_username(username));
        }
        let id = *user.id().as_uuid();
        table.ids_by_username.insert(username.to_owned(), id);
        table.by_id.insert(id, user.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PasswordDigest;
    use rstest::rstest;

    fn user(name: &str) -> User {
        User::new(
            UserId::random(),
            Username::new(name).expect("username"),
            PasswordDigest::new("$argon2id$fixture").expect("digest"),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn stored_users_are_found_by_name_and_id() {
        let repo = InMemoryUserRepository::new();
        let kody = user("kody");
        repo.create(&kody).await.expect("create");

        let by_name = repo
            .find_by_username(kody.username())
            .await
            .expect("lookup");
        let by_id = repo.find_by_id(kody.id()).await.expect("lookup");
        assert_eq!(by_name.as_ref(), Some(&kody));
        assert_eq!(by_id, Some(kody));
    }

    #[rstest]
    #[tokio::test]
    async fn usernames_are_unique() {
        let repo = InMemoryUserRepository::new();
        repo.create(&user("kody")).await.expect("first create");

        let err = repo.create(&user("kody")).await.expect_err("duplicate");
        assert_eq!(err, UserPersistenceError::duplicate_username("kody"));
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_users_are_absent() {
        let repo = InMemoryUserRepository::new();
        let missing = Username::new("nobody").expect("username");
        assert!(repo.find_by_username(&missing).await.expect("lookup").is_none());
        assert!(repo.find_by_id(&UserId::random()).await.expect("lookup").is_none());
    }
}
