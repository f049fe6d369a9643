//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every jokes route, the request/response documents,
//! the error schema wrappers and the session cookie security scheme. Swagger
//! UI serves it in debug builds.

use crate::inbound::http::dto::{
    JokeActionRequest, JokeFieldErrorsBody, JokeFields, JokeFormPage, JokeListItem, JokePage,
    JokeRequest, JokeResponse, JokesLayout, LandingPage, LoginFieldErrorsBody, LoginFields,
    LoginPage, LoginRequest, RandomJokePage, UserResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::session_codec::SESSION_COOKIE_NAME;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Signed session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the jokes API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Jokes API",
        description = "Cookie-session jokes board: sign in, post jokes, delete your own."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::landing,
        crate::inbound::http::users::login_form,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::logout_redirect,
        crate::inbound::http::jokes::list_jokes,
        crate::inbound::http::jokes::random_joke,
        crate::inbound::http::jokes::new_joke_form,
        crate::inbound::http::jokes::create_joke,
        crate::inbound::http::jokes::get_joke,
        crate::inbound::http::jokes::joke_action,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        JokeRequest,
        JokeActionRequest,
        UserResponse,
        JokeResponse,
        JokeListItem,
        LandingPage,
        JokesLayout,
        JokePage,
        RandomJokePage,
        JokeFieldErrorsBody,
        JokeFields,
        JokeFormPage,
        LoginFieldErrorsBody,
        LoginFields,
        LoginPage,
    )),
    tags(
        (name = "users", description = "Sign-in, registration and sessions"),
        (name = "jokes", description = "Reading, creating and deleting jokes"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
