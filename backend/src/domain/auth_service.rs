//! Login, registration and user lookup backed by a [`UserRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::ports::{
    LoginService, RegistrationOutcome, UserPersistenceError, UserRepository, UsersQuery,
};
use super::{Error, LoginCredentials, PasswordVerifier, User, UserId, Username};

/// Domain service implementing [`LoginService`] and [`UsersQuery`].
#[derive(Clone)]
pub struct AuthService<U> {
    users: Arc<U>,
    passwords: PasswordVerifier,
}

impl<U> AuthService<U> {
    /// Create a new service.
    pub fn new(users: Arc<U>, passwords: PasswordVerifier) -> Self {
        Self { users, passwords }
    }
}

fn username_of(credentials: &LoginCredentials) -> Result<Username, Error> {
    Username::new(credentials.username()).map_err(|err| Error::invalid_request(err.to_string()))
}

#[async_trait]
impl<U> LoginService for AuthService<U>
where
    U: UserRepository,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<Option<User>, Error> {
        let username = username_of(credentials)?;
        let Some(user) = self.users.find_by_username(&username).await? else {
            debug!(%username, "login rejected");
            return Ok(None);
        };

        if self
            .passwords
            .verify(credentials.password(), user.password_digest())
            .await?
        {
            Ok(Some(user))
        } else {
            debug!(%username, "login rejected");
            Ok(None)
        }
    }

    async fn register(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<RegistrationOutcome, Error> {
        let username = username_of(credentials)?;
        if self.users.find_by_username(&username).await?.is_some() {
            return Ok(RegistrationOutcome::UsernameTaken);
        }

        let digest = self.passwords.hash(credentials.password()).await?;
        let user = User::new(UserId::random(), username, digest);
        match self.users.create(&user).await {
            Ok(()) => {
                info!(user_id = %user.id(), "user registered");
                Ok(RegistrationOutcome::Registered(user))
            }
            // Lost a race with a concurrent registration.
            Err(UserPersistenceError::DuplicateUsername { .. }) => {
                Ok(RegistrationOutcome::UsernameTaken)
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl<U> UsersQuery for AuthService<U>
where
    U: UserRepository,
{
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, Error> {
        Ok(self.users.find_by_id(id).await?)
    }
}
