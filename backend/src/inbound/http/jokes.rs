//! Joke handlers: the public list, single and random views, plus the
//! signed-in create and delete flows.

use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, get, post, web};

use super::ApiResult;
use super::dto::{
    JokeActionRequest, JokeFieldErrorsBody, JokeFields, JokeFormPage, JokeListItem, JokePage,
    JokeRequest, JokeResponse, JokesLayout, RandomJokePage, UserResponse,
};
use super::form::read_form;
use super::schemas::ErrorSchema;
use super::session::{Gate, SessionContext};
use super::state::HttpState;
use crate::domain::ports::DELETE_MISSING_MESSAGE;
use crate::domain::{Error, FORM_SUBMITTED_INCORRECTLY, JokeDraft, JokeDraftRejection, JokeId};

/// 404 message for an unknown joke id.
pub const JOKE_NOT_FOUND_MESSAGE: &str = "What a joke! Not found.";
/// 404 message when there is nothing to pick at random.
pub const NO_JOKES_MESSAGE: &str = "No jokes to pick from";
/// 400 message for a `POST /jokes/{jokeId}` without `_method=delete`.
pub const UNSUPPORTED_METHOD_MESSAGE: &str = "Unsupported joke action";

fn see_other(location: String) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}

/// Jokes layout: optional user and the most recent jokes.
#[utoipa::path(
    get,
    path = "/jokes",
    responses(
        (status = 200, description = "Jokes layout", body = JokesLayout),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["jokes"],
    operation_id = "listJokes"
)]
#[get("/jokes")]
pub async fn list_jokes(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<JokesLayout>> {
    let user = session.user(state.users.as_ref()).await?;
    let recent = state.jokes.recent().await?;
    Ok(web::Json(JokesLayout {
        user: user.as_ref().map(UserResponse::from),
        joke_list_items: recent.into_iter().map(JokeListItem::from).collect(),
    }))
}

/// A joke chosen uniformly at random.
#[utoipa::path(
    get,
    path = "/jokes/random",
    responses(
        (status = 200, description = "Random joke", body = RandomJokePage),
        (status = 404, description = "No jokes stored", body = ErrorSchema)
    ),
    tags = ["jokes"],
    operation_id = "randomJoke",
    security([])
)]
#[get("/jokes/random")]
pub async fn random_joke(state: web::Data<HttpState>) -> ApiResult<web::Json<RandomJokePage>> {
    let joke = state
        .jokes
        .random()
        .await?
        .ok_or_else(|| Error::not_found(NO_JOKES_MESSAGE))?;
    Ok(web::Json(RandomJokePage {
        random_joke: JokeResponse::from(&joke),
    }))
}

/// Empty create-joke form; anonymous callers are sent to login.
#[utoipa::path(
    get,
    path = "/jokes/new",
    responses(
        (status = 200, description = "Empty joke form", body = JokeFormPage),
        (status = 303, description = "Sign-in required")
    ),
    tags = ["jokes"],
    operation_id = "newJokeForm"
)]
#[get("/jokes/new")]
pub async fn new_joke_form(session: SessionContext) -> HttpResponse {
    match session.require_user_id() {
        Gate::Continue(_) => HttpResponse::Ok().json(JokeFormPage::default()),
        Gate::Interrupt(redirect) => redirect.into_response(),
    }
}

/// Create a joke owned by the signed-in user.
///
/// The body is read only after the auth gate, so anonymous callers are
/// redirected to login whatever they sent.
#[utoipa::path(
    post,
    path = "/jokes/new",
    request_body(content = JokeRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created; Location is the new joke, or login when signed out"),
        (status = 400, description = "Rejected or oversized submission", body = JokeFormPage),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["jokes"],
    operation_id = "createJoke"
)]
#[post("/jokes/new")]
pub async fn create_joke(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let user = match session.require_user(state.users.as_ref()).await? {
        Gate::Continue(user) => user,
        Gate::Interrupt(redirect) => return Ok(redirect.into_response()),
    };

    let JokeRequest { name, content } = read_form(payload).await?;
    let draft = match JokeDraft::validate(name.as_deref(), content.as_deref()) {
        Ok(draft) => draft,
        Err(JokeDraftRejection::Malformed) => {
            return Ok(HttpResponse::BadRequest().json(JokeFormPage {
                form_error: Some(FORM_SUBMITTED_INCORRECTLY.to_owned()),
                ..JokeFormPage::default()
            }));
        }
        Err(JokeDraftRejection::Invalid(errors)) => {
            return Ok(HttpResponse::BadRequest().json(JokeFormPage {
                field_errors: Some(JokeFieldErrorsBody::from(errors)),
                fields: Some(JokeFields {
                    name: name.unwrap_or_default(),
                    content: content.unwrap_or_default(),
                }),
                ..JokeFormPage::default()
            }));
        }
    };

    let joke = state.jokes_command.create(user.id(), draft).await?;
    Ok(see_other(format!("/jokes/{}", joke.id())))
}

/// A single joke and whether the caller may delete it.
#[utoipa::path(
    get,
    path = "/jokes/{jokeId}",
    params(("jokeId" = String, Path, description = "Joke identifier")),
    responses(
        (status = 200, description = "Joke", body = JokePage),
        (status = 404, description = "Unknown joke", body = ErrorSchema)
    ),
    tags = ["jokes"],
    operation_id = "getJoke"
)]
#[get("/jokes/{jokeId}")]
pub async fn get_joke(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<JokePage>> {
    let id = JokeId::new(path.as_str()).map_err(|_| Error::not_found(JOKE_NOT_FOUND_MESSAGE))?;
    let joke = state
        .jokes
        .find(&id)
        .await?
        .ok_or_else(|| Error::not_found(JOKE_NOT_FOUND_MESSAGE))?;
    let is_owner = session
        .user_id()
        .is_some_and(|user_id| joke.is_owned_by(user_id));
    Ok(web::Json(JokePage {
        joke: JokeResponse::from(&joke),
        is_owner,
    }))
}

/// Form-driven joke actions; only `_method=delete` is understood. The auth
/// gate runs before the body is read.
#[utoipa::path(
    post,
    path = "/jokes/{jokeId}",
    params(("jokeId" = String, Path, description = "Joke identifier")),
    request_body(content = JokeActionRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Deleted; Location is /jokes, or login when signed out"),
        (status = 400, description = "Unsupported action", body = ErrorSchema),
        (status = 401, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Unknown joke", body = ErrorSchema)
    ),
    tags = ["jokes"],
    operation_id = "jokeAction"
)]
#[post("/jokes/{jokeId}")]
pub async fn joke_action(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let user_id = match session.require_user_id() {
        Gate::Continue(user_id) => user_id,
        Gate::Interrupt(redirect) => return Ok(redirect.into_response()),
    };
    let action: JokeActionRequest = read_form(payload).await?;
    if action.method.as_deref() != Some("delete") {
        return Err(Error::invalid_request(UNSUPPORTED_METHOD_MESSAGE));
    }
    let id = JokeId::new(path.as_str()).map_err(|_| Error::not_found(DELETE_MISSING_MESSAGE))?;
    state.jokes_command.delete(&user_id, &id).await?;
    Ok(see_other("/jokes".to_owned()))
}
