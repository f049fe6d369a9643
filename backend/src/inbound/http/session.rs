//! Auth gate: resolves the current user from the session cookie.
//!
//! Handlers extract [`SessionContext`] and ask it for an optional or required
//! identity. Required variants return a [`Gate`] rather than an error so the
//! "redirect to login" path is explicit at every call site.

use actix_web::http::header::LOCATION;
use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::{debug, info};
use url::form_urlencoded;

use super::session_codec::{SESSION_COOKIE_NAME, SessionCodec};
use crate::domain::ports::UsersQuery;
use crate::domain::{Error, User, UserId};

/// Path of the login page.
pub const LOGIN_PATH: &str = "/login";
/// Where sign-in lands when no usable `redirectTo` was supplied.
pub const DEFAULT_REDIRECT: &str = "/jokes";

/// Outcome of a required-identity check.
#[derive(Debug)]
pub enum Gate<T> {
    /// The caller is signed in; proceed with the value.
    Continue(T),
    /// The caller must sign in first.
    Interrupt(LoginRedirect),
}

/// Redirect to the login page, remembering where the caller was going.
#[derive(Debug)]
pub struct LoginRedirect {
    redirect_to: String,
    clear_session: Option<actix_web::cookie::Cookie<'static>>,
}

impl LoginRedirect {
    /// Target of the redirect, e.g. `/login?redirectTo=%2Fjokes%2Fnew`.
    pub fn location(&self) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("redirectTo", &self.redirect_to)
            .finish();
        format!("{LOGIN_PATH}?{query}")
    }

    /// True when the redirect also removes a stale session cookie.
    pub fn clears_session(&self) -> bool {
        self.clear_session.is_some()
    }

    /// Render as `303 See Other`.
    pub fn into_response(self) -> HttpResponse {
        let mut response = HttpResponse::SeeOther();
        response.insert_header((LOCATION, self.location()));
        if let Some(removal) = self.clear_session {
            response.cookie(removal);
        }
        response.finish()
    }
}

/// Keep only same-site absolute paths; anything else lands on [`DEFAULT_REDIRECT`].
///
/// # Examples
/// ```
/// use jokes::inbound::http::session::sanitize_redirect;
///
/// assert_eq!(sanitize_redirect(Some("/jokes/new")), "/jokes/new");
/// assert_eq!(sanitize_redirect(Some("//evil.example")), "/jokes");
/// assert_eq!(sanitize_redirect(None), "/jokes");
/// ```
pub fn sanitize_redirect(raw: Option<&str>) -> String {
    match raw {
        Some(path)
            if path.starts_with('/') && !path.starts_with("//") && !path.starts_with("/\\") =>
        {
            path.to_owned()
        }
        _ => DEFAULT_REDIRECT.to_owned(),
    }
}

/// Per-request view of the session.
pub struct SessionContext {
    codec: SessionCodec,
    user_id: Option<UserId>,
    request_path: String,
}

impl SessionContext {
    /// Resolve the session carried by `req`.
    pub fn from_cookie(codec: SessionCodec, req: &HttpRequest) -> Self {
        let user_id = req
            .cookie(SESSION_COOKIE_NAME)
            .and_then(|cookie| codec.decode(&cookie));
        let request_path = req
            .uri()
            .path_and_query()
            .map_or_else(|| req.path().to_owned(), |pq| pq.as_str().to_owned());
        Self {
            codec,
            user_id,
            request_path,
        }
    }

    /// The signed-in user id, trusted without a store lookup.
    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    /// Require a signed-in user id; otherwise redirect to login and come back
    /// to the current path.
    pub fn require_user_id(&self) -> Gate<UserId> {
        match &self.user_id {
            Some(id) => Gate::Continue(id.clone()),
            None => Gate::Interrupt(self.login_redirect(false)),
        }
    }

    /// Resolve the signed-in user. No store access when anonymous.
    pub async fn user(&self, users: &dyn UsersQuery) -> Result<Option<User>, Error> {
        match &self.user_id {
            Some(id) => users.find_user(id).await,
            None => Ok(None),
        }
    }

    /// Require a signed-in user that still exists.
    ///
    /// A session whose user has gone is treated as anonymous and its cookie
    /// is cleared on the way to the login page.
    pub async fn require_user(&self, users: &dyn UsersQuery) -> Result<Gate<User>, Error> {
        let Some(id) = &self.user_id else {
            return Ok(Gate::Interrupt(self.login_redirect(false)));
        };
        match users.find_user(id).await? {
            Some(user) => Ok(Gate::Continue(user)),
            None => {
                info!(user_id = %id, "session refers to a missing user");
                Ok(Gate::Interrupt(self.login_redirect(true)))
            }
        }
    }

    /// Start a session for `user_id` and redirect to `redirect_to`.
    pub fn create_session(
        &self,
        user_id: &UserId,
        redirect_to: &str,
    ) -> Result<HttpResponse, Error> {
        let cookie = self.codec.encode(user_id)?;
        debug!(user_id = %user_id, redirect_to, "session created");
        Ok(HttpResponse::SeeOther()
            .insert_header((LOCATION, redirect_to.to_owned()))
            .cookie(cookie)
            .finish())
    }

    /// End the session and redirect to `/`.
    pub fn logout(&self) -> HttpResponse {
        HttpResponse::SeeOther()
            .insert_header((LOCATION, "/"))
            .cookie(self.codec.destroy())
            .finish()
    }

    fn login_redirect(&self, clear_session: bool) -> LoginRedirect {
        LoginRedirect {
            redirect_to: self.request_path.clone(),
            clear_session: clear_session.then(|| self.codec.destroy()),
        }
    }
}

impl FromRequest for SessionContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let context = req
            .app_data::<web::Data<SessionCodec>>()
            .map(|codec| Self::from_cookie(codec.get_ref().clone(), req))
            .ok_or_else(|| Error::internal("session codec is not configured"));
        ready(context)
    }
}
