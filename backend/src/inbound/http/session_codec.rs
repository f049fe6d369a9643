//! Signed session cookie codec with secret rotation.
//!
//! The cookie value is the hex-encoded JSON payload
//! `{"userId": "...", "expiresAt": "..."}` signed with HMAC-SHA256 by the
//! `cookie` crate's signed jar. New cookies are always signed with the current
//! key; verification tries the current key and then each retired key in
//! order, so cookies issued before a rotation stay valid until they expire.

use std::sync::Arc;

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, CookieJar, Key, SameSite};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::session_config::SessionSettings;
use crate::domain::{Error, UserId};

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "RJ_session";
/// Session lifetime in days.
pub const SESSION_MAX_AGE_DAYS: i64 = 30;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionPayload {
    user_id: UserId,
    expires_at: DateTime<Utc>,
}

/// Encodes, verifies and destroys session cookies.
///
/// Read-only after construction and cheap to clone.
#[derive(Clone)]
pub struct SessionCodec {
    keys: Arc<[Key]>,
    cookie_secure: bool,
    clock: Arc<dyn Clock>,
}

impl SessionCodec {
    /// Build a codec from a current key and its retired predecessors.
    pub fn new(
        current: Key,
        previous: Vec<Key>,
        cookie_secure: bool,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let keys: Vec<Key> = std::iter::once(current).chain(previous).collect();
        Self {
            keys: keys.into(),
            cookie_secure,
            clock,
        }
    }

    /// Build a codec from validated settings.
    pub fn from_settings(settings: SessionSettings, clock: Arc<dyn Clock>) -> Self {
        let SessionSettings {
            current,
            previous,
            cookie_secure,
        } = settings;
        Self::new(current, previous, cookie_secure, clock)
    }

    fn current_key(&self) -> Result<&Key, Error> {
        self.keys
            .first()
            .ok_or_else(|| Error::internal("session codec has no signing key"))
    }

    fn with_attributes(&self, value: String) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE_NAME, value)
            .path("/")
            .http_only(true)
            .secure(self.cookie_secure)
            .same_site(SameSite::Lax)
            .max_age(Duration::days(SESSION_MAX_AGE_DAYS))
            .finish()
    }

    /// Sign a session for `user_id` with the current key.
    pub fn encode(&self, user_id: &UserId) -> Result<Cookie<'static>, Error> {
        let payload = SessionPayload {
            user_id: user_id.clone(),
            expires_at: self.clock.utc() + TimeDelta::days(SESSION_MAX_AGE_DAYS),
        };
        let json = serde_json::to_vec(&payload)
            .map_err(|err| Error::internal(format!("failed to serialise session: {err}")))?;

        let mut jar = CookieJar::new();
        jar.signed_mut(self.current_key()?)
            .add(self.with_attributes(hex::encode(json)));
        jar.get(SESSION_COOKIE_NAME)
            .cloned()
            .ok_or_else(|| Error::internal("signed session cookie missing from jar"))
    }

    /// Verify `cookie` and return its user id.
    ///
    /// Tampered, unparsable and expired cookies all yield `None`.
    pub fn decode(&self, cookie: &Cookie<'_>) -> Option<UserId> {
        let candidate = Cookie::new(SESSION_COOKIE_NAME, cookie.value().to_owned());
        let jar = CookieJar::new();
        let verified = self
            .keys
            .iter()
            .find_map(|key| jar.signed(key).verify(candidate.clone()));
        let Some(verified) = verified else {
            debug!("session cookie signature rejected");
            return None;
        };

        let payload = hex::decode(verified.value())
            .ok()
            .and_then(|bytes| serde_json::from_slice::<SessionPayload>(&bytes).ok());
        let Some(payload) = payload else {
            debug!("session cookie payload unparsable");
            return None;
        };

        if payload.expires_at <= self.clock.utc() {
            debug!(user_id = %payload.user_id, "session cookie expired");
            return None;
        }
        Some(payload.user_id)
    }

    /// A cookie that removes the session from the browser.
    pub fn destroy(&self) -> Cookie<'static> {
        let mut cookie = self.with_attributes(String::new());
        cookie.make_removal();
        cookie
    }
}
