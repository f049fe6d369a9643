//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::cookie::{Cookie, Key};
use actix_web::{App, web};
use mockable::Clock;

use super::session_codec::SessionCodec;
use super::state::HttpState;
use crate::domain::ports::{MockJokesCommand, MockJokesQuery, MockLoginService, MockUsersQuery};
use crate::domain::{Joke, JokeDraft, JokeId, PasswordDigest, User, UserId, Username};
use crate::test_support::MutableClock;

pub const KODY_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
pub const OTHER_ID: &str = "9b2f3c1e-0d4a-4c8e-9f7a-2e6b5d1c0a93";
pub const JOKE_ID: &str = "5c0f8a7e-6b1d-4f3a-8e2c-7d9b4a1e6f20";

pub fn user_id(raw: &str) -> UserId {
    UserId::new(raw).expect("fixture user id")
}

pub fn kody() -> User {
    User::new(
        user_id(KODY_ID),
        Username::new("kody").expect("username"),
        PasswordDigest::new("$argon2id$fixture").expect("digest"),
    )
}

pub fn joke_owned_by(raw_user_id: &str) -> Joke {
    let draft = JokeDraft::validate(
        Some("Road worker"),
        Some("I never wanted to believe my Dad was stealing from his job."),
    )
    .expect("valid draft");
    Joke::new(
        JokeId::new(JOKE_ID).expect("fixture joke id"),
        draft,
        user_id(raw_user_id),
        MutableClock::at_fixture_time().utc(),
    )
}

/// Session codec with a fixed key, an insecure cookie and a pinned clock.
pub fn test_codec() -> SessionCodec {
    SessionCodec::new(
        Key::derive_from(&[42; 32]),
        Vec::new(),
        false,
        Arc::new(MutableClock::at_fixture_time()),
    )
}

pub fn session_cookie(codec: &SessionCodec, raw_user_id: &str) -> Cookie<'static> {
    codec.encode(&user_id(raw_user_id)).expect("encode session")
}

/// Driving-port doubles; tests set expectations before calling [`Ports::into_state`].
#[derive(Default)]
pub struct Ports {
    pub login: MockLoginService,
    pub users: MockUsersQuery,
    pub jokes: MockJokesQuery,
    pub jokes_command: MockJokesCommand,
}

impl Ports {
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            Arc::new(self.login),
            Arc::new(self.users),
            Arc::new(self.jokes),
            Arc::new(self.jokes_command),
        )
    }
}

/// Application with every jokes route registered.
pub fn test_app(
    state: HttpState,
    codec: SessionCodec,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(codec))
        .configure(super::configure)
}
