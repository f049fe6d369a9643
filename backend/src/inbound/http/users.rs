//! Landing, login, registration and logout handlers.
//!
//! ```text
//! GET  /
//! GET  /login?redirectTo=/jokes/new
//! POST /login  loginType=login&username=kody&password=twixrox&redirectTo=/jokes
//! POST /logout
//! ```

use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use utoipa::IntoParams;

use super::ApiResult;
use super::schemas::ErrorSchema;
use super::dto::{
    LandingPage, LoginFieldErrorsBody, LoginFields, LoginPage, LoginRequest, UserResponse,
};
use super::session::{SessionContext, sanitize_redirect};
use super::state::HttpState;
use crate::domain::ports::RegistrationOutcome;
use crate::domain::{
    FORM_SUBMITTED_INCORRECTLY, LoginForm, LoginFormRejection, LoginType, ValidatedLogin,
};

/// Form error for a bad username/password pair.
pub const BAD_CREDENTIALS_MESSAGE: &str = "Username/Password combination is incorrect";
/// Form error for an unknown `loginType`.
pub const LOGIN_TYPE_INVALID_MESSAGE: &str = "Login type invalid";

/// Query string accepted by `GET /login`.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LoginQuery {
    /// Path to return to after signing in.
    pub redirect_to: Option<String>,
}

/// Landing document with the signed-in user, if any.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Landing document", body = LandingPage),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "landing"
)]
#[get("/")]
pub async fn landing(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<LandingPage>> {
    let user = session.user(state.users.as_ref()).await?;
    Ok(web::Json(LandingPage {
        user: user.as_ref().map(UserResponse::from),
    }))
}

/// Empty login form that remembers where to go next.
#[utoipa::path(
    get,
    path = "/login",
    params(LoginQuery),
    responses((status = 200, description = "Login form", body = LoginPage)),
    tags = ["users"],
    operation_id = "loginForm",
    security([])
)]
#[get("/login")]
pub async fn login_form(query: web::Query<LoginQuery>) -> web::Json<LoginPage> {
    web::Json(LoginPage {
        redirect_to: sanitize_redirect(query.redirect_to.as_deref()),
        ..LoginPage::default()
    })
}

/// Sign in or register, then start a session.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Signed in", headers(
            ("Location" = String, description = "Sanitised redirectTo"),
            ("Set-Cookie" = String, description = "Session cookie")
        )),
        (status = 400, description = "Rejected submission", body = LoginPage),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest {
        login_type,
        username,
        password,
        redirect_to,
    } = form.into_inner();
    let redirect_to = sanitize_redirect(redirect_to.as_deref());
    let submitted = LoginForm {
        login_type,
        username,
        password,
    };

    let validated = match submitted.validate() {
        Ok(validated) => validated,
        Err(LoginFormRejection::Malformed) => {
            return Ok(rejected(LoginPage {
                redirect_to,
                form_error: Some(FORM_SUBMITTED_INCORRECTLY.to_owned()),
                ..LoginPage::default()
            }));
        }
        Err(LoginFormRejection::Invalid(errors)) => {
            return Ok(rejected(LoginPage {
                redirect_to,
                field_errors: Some(LoginFieldErrorsBody::from(errors)),
                fields: Some(echo(&submitted)),
                ..LoginPage::default()
            }));
        }
    };

    let form_error = match LoginType::parse(&validated.login_type) {
        Some(LoginType::Login) => match state.login.login(&validated.credentials).await? {
            Some(user) => return session.create_session(user.id(), &redirect_to),
            None => BAD_CREDENTIALS_MESSAGE.to_owned(),
        },
        Some(LoginType::Register) => match state.login.register(&validated.credentials).await? {
            RegistrationOutcome::Registered(user) => {
                return session.create_session(user.id(), &redirect_to);
            }
            RegistrationOutcome::UsernameTaken => format!(
                "User with username {} already exists",
                validated.credentials.username()
            ),
        },
        None => LOGIN_TYPE_INVALID_MESSAGE.to_owned(),
    };

    Ok(rejected(LoginPage {
        redirect_to,
        form_error: Some(form_error),
        fields: Some(echo_validated(&validated)),
        ..LoginPage::default()
    }))
}

fn rejected(page: LoginPage) -> HttpResponse {
    HttpResponse::BadRequest().json(page)
}

fn echo(form: &LoginForm) -> LoginFields {
    LoginFields {
        login_type: form.login_type.clone().unwrap_or_default(),
        username: form.username.clone().unwrap_or_default(),
    }
}

fn echo_validated(validated: &ValidatedLogin) -> LoginFields {
    LoginFields {
        login_type: validated.login_type.clone(),
        username: validated.credentials.username().to_owned(),
    }
}

/// End the session.
#[utoipa::path(
    post,
    path = "/logout",
    responses((status = 303, description = "Signed out", headers(
        ("Location" = String, description = "Always /"),
        ("Set-Cookie" = String, description = "Removal cookie")
    ))),
    tags = ["users"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.logout()
}

/// Visiting `/logout` directly just goes home.
#[utoipa::path(
    get,
    path = "/logout",
    responses((status = 303, description = "Redirect home")),
    tags = ["users"],
    operation_id = "logoutRedirect",
    security([])
)]
#[get("/logout")]
pub async fn logout_redirect() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, "/"))
        .finish()
}
