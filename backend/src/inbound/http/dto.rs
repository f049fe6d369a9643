//! Request and response documents for the HTTP adapter.
//!
//! Request bodies are form-encoded with every field optional so a missing
//! field reaches validation instead of failing extraction. Response
//! documents are JSON in camelCase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Joke, JokeFieldErrors, JokeSummary, LoginFieldErrors, User};

/// Form body for `POST /login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// `login` or `register`.
    #[schema(example = "login")]
    pub login_type: Option<String>,
    /// Account name.
    #[schema(example = "kody")]
    pub username: Option<String>,
    /// Plaintext password.
    pub password: Option<String>,
    /// Where to go after signing in.
    #[schema(example = "/jokes")]
    pub redirect_to: Option<String>,
}

/// Form body for `POST /jokes/new`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct JokeRequest {
    /// Joke title, at least 3 characters.
    pub name: Option<String>,
    /// Joke body, at least 10 characters.
    pub content: Option<String>,
}

/// Form body for `POST /jokes/{jokeId}`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct JokeActionRequest {
    /// Only `delete` is supported.
    #[serde(rename = "_method")]
    #[schema(rename = "_method", example = "delete")]
    pub method: Option<String>,
}

/// Public view of a user.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// Stable user identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    /// Login name.
    #[schema(example = "kody")]
    pub username: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
        }
    }
}

/// A full joke.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JokeResponse {
    /// Joke identifier.
    pub id: String,
    /// Joke title.
    pub name: String,
    /// Joke body.
    pub content: String,
    /// Owner identifier.
    pub jokester_id: String,
    /// Creation time (UTC).
    pub created_at: DateTime<Utc>,
}

impl From<&Joke> for JokeResponse {
    fn from(joke: &Joke) -> Self {
        Self {
            id: joke.id().to_string(),
            name: joke.name().as_str().to_owned(),
            content: joke.content().as_str().to_owned(),
            jokester_id: joke.jokester_id().to_string(),
            created_at: joke.created_at(),
        }
    }
}

/// Entry in the recent jokes list.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JokeListItem {
    /// Joke identifier.
    pub id: String,
    /// Joke title.
    pub name: String,
}

impl From<JokeSummary> for JokeListItem {
    fn from(summary: JokeSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            name: summary.name,
        }
    }
}

/// `GET /` document.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LandingPage {
    /// Signed-in user, if any.
    pub user: Option<UserResponse>,
}

/// `GET /jokes` document.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JokesLayout {
    /// Signed-in user, if any.
    pub user: Option<UserResponse>,
    /// Most recent jokes, newest first.
    pub joke_list_items: Vec<JokeListItem>,
}

/// `GET /jokes/{jokeId}` document.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JokePage {
    /// The joke.
    pub joke: JokeResponse,
    /// Whether the caller owns the joke and may delete it.
    pub is_owner: bool,
}

/// `GET /jokes/random` document.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RandomJokePage {
    /// A uniformly chosen joke.
    pub random_joke: JokeResponse,
}

/// Field messages for the joke form.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct JokeFieldErrorsBody {
    /// Message for `name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Message for `content`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl From<JokeFieldErrors> for JokeFieldErrorsBody {
    fn from(errors: JokeFieldErrors) -> Self {
        Self {
            name: errors.name,
            content: errors.content,
        }
    }
}

/// Echoed joke form values.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct JokeFields {
    /// Submitted name.
    pub name: String,
    /// Submitted content.
    pub content: String,
}

/// Joke form document: empty on `GET /jokes/new`, populated on rejection.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JokeFormPage {
    /// Form-level message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_error: Option<String>,
    /// Per-field messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<JokeFieldErrorsBody>,
    /// Values to refill the form with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<JokeFields>,
}

/// Field messages for the login form.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct LoginFieldErrorsBody {
    /// Message for `username`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Message for `password`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl From<LoginFieldErrors> for LoginFieldErrorsBody {
    fn from(errors: LoginFieldErrors) -> Self {
        Self {
            username: errors.username,
            password: errors.password,
        }
    }
}

/// Echoed login form values. The password is never echoed.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginFields {
    /// Submitted login type.
    pub login_type: String,
    /// Submitted username.
    pub username: String,
}

/// Login form document.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginPage {
    /// Sanitised post-login destination.
    pub redirect_to: String,
    /// Form-level message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_error: Option<String>,
    /// Per-field messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<LoginFieldErrorsBody>,
    /// Values to refill the form with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<LoginFields>,
}
