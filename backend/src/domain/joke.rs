//! Joke data model and the create-joke form rules.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::UserId;

/// Minimum joke name length, counted in characters.
pub const JOKE_NAME_MIN: usize = 3;
/// Minimum joke content length, counted in characters.
pub const JOKE_CONTENT_MIN: usize = 10;

/// Validation errors returned by the joke constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JokeValidationError {
    /// Identifier was not a canonical UUID.
    #[error("joke id must be a valid UUID")]
    InvalidId,
    /// Name shorter than [`JOKE_NAME_MIN`].
    #[error("Joke name must be at least {JOKE_NAME_MIN} characters long")]
    NameTooShort,
    /// Content shorter than [`JOKE_CONTENT_MIN`].
    #[error("Joke content must be at least {JOKE_CONTENT_MIN} characters long")]
    ContentTooShort,
}

/// Stable joke identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JokeId(Uuid);

impl JokeId {
    /// Parse an identifier from a path segment or stored value.
    ///
    /// # Examples
    /// ```
    /// use jokes::domain::JokeId;
    ///
    /// assert!(JokeId::new("not-a-uuid").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, JokeValidationError> {
        let raw = raw.as_ref();
        if raw.trim() != raw {
            return Err(JokeValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| JokeValidationError::InvalidId)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an already parsed UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for JokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Joke title; at least [`JOKE_NAME_MIN`] characters, stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JokeName(String);

impl JokeName {
    /// Validate and construct a [`JokeName`].
    pub fn new(raw: impl Into<String>) -> Result<Self, JokeValidationError> {
        let raw = raw.into();
        if raw.chars().count() < JOKE_NAME_MIN {
            return Err(JokeValidationError::NameTooShort);
        }
        Ok(Self(raw))
    }

    /// Borrow the name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Joke body; at least [`JOKE_CONTENT_MIN`] characters, stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JokeContent(String);

impl JokeContent {
    /// Validate and construct a [`JokeContent`].
    pub fn new(raw: impl Into<String>) -> Result<Self, JokeValidationError> {
        let raw = raw.into();
        if raw.chars().count() < JOKE_CONTENT_MIN {
            return Err(JokeValidationError::ContentTooShort);
        }
        Ok(Self(raw))
    }

    /// Borrow the content.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Persisted joke.
///
/// ## Invariants
/// - `jokester_id` referenced an existing user when the joke was created.
/// - Jokes are never updated; only their owner may delete them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Joke {
    id: JokeId,
    name: JokeName,
    content: JokeContent,
    jokester_id: UserId,
    created_at: DateTime<Utc>,
}

impl Joke {
    /// Assemble a joke from a validated draft.
    pub fn new(
        id: JokeId,
        draft: JokeDraft,
        jokester_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        let JokeDraft { name, content } = draft;
        Self {
            id,
            name,
            content,
            jokester_id,
            created_at,
        }
    }

    /// Joke identifier.
    pub fn id(&self) -> JokeId {
        self.id
    }

    /// Joke title.
    pub fn name(&self) -> &JokeName {
        &self.name
    }

    /// Joke body.
    pub fn content(&self) -> &JokeContent {
        &self.content
    }

    /// Owner of the joke.
    pub fn jokester_id(&self) -> &UserId {
        &self.jokester_id
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// True when `user_id` owns this joke.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.jokester_id == user_id
    }

    /// Project the joke into a list item.
    pub fn summary(&self) -> JokeSummary {
        JokeSummary {
            id: self.id,
            name: self.name.as_str().to_owned(),
        }
    }
}

/// List item carrying only the joke id and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JokeSummary {
    /// Joke identifier.
    pub id: JokeId,
    /// Joke title.
    pub name: String,
}

/// Field-level validation messages for the create-joke form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JokeFieldErrors {
    /// Message for the `name` field.
    pub name: Option<String>,
    /// Message for the `content` field.
    pub content: Option<String>,
}

impl JokeFieldErrors {
    /// True when no field carries a message.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.content.is_none()
    }
}

/// Reasons a create-joke submission was rejected before any write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JokeDraftRejection {
    /// One or both fields were missing.
    Malformed,
    /// Fields were present but too short.
    Invalid(JokeFieldErrors),
}

/// Validated input for a new joke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JokeDraft {
    name: JokeName,
    content: JokeContent,
}

impl JokeDraft {
    /// Validate raw form values.
    ///
    /// Both fields are checked so every failing field is reported at once.
    ///
    /// # Examples
    /// ```
    /// use jokes::domain::JokeDraft;
    ///
    /// let draft = JokeDraft::validate(Some("Road"), Some("Why did the chicken cross?"))
    ///     .expect("valid joke");
    /// assert_eq!(draft.name().as_str(), "Road");
    /// ```
    pub fn validate(
        name: Option<&str>,
        content: Option<&str>,
    ) -> Result<Self, JokeDraftRejection> {
        let (Some(name), Some(content)) = (name, content) else {
            return Err(JokeDraftRejection::Malformed);
        };

        match (JokeName::new(name), JokeContent::new(content)) {
            (Ok(name), Ok(content)) => Ok(Self { name, content }),
            (name, content) => Err(JokeDraftRejection::Invalid(JokeFieldErrors {
                name: name.err().map(|err| err.to_string()),
                content: content.err().map(|err| err.to_string()),
            })),
        }
    }

    /// Validated name.
    pub fn name(&self) -> &JokeName {
        &self.name
    }

    /// Validated content.
    pub fn content(&self) -> &JokeContent {
        &self.content
    }
}
