//! HTTP inbound adapter exposing the jokes routes.

use actix_web::web;

pub mod dto;
pub mod error;
pub mod form;
pub mod health;
pub mod jokes;
pub mod schemas;
pub mod session;
pub mod session_codec;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;

/// Register every application route.
///
/// `/jokes/random` and `/jokes/new` come before `/jokes/{jokeId}` so the
/// literal segments win.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users::landing)
        .service(users::login_form)
        .service(users::login)
        .service(users::logout)
        .service(users::logout_redirect)
        .service(jokes::list_jokes)
        .service(jokes::random_joke)
        .service(jokes::new_joke_form)
        .service(jokes::create_joke)
        .service(jokes::get_joke)
        .service(jokes::joke_action);
}
