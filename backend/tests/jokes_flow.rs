//! End-to-end jokes flow against the in-memory store: register, post a joke,
//! read it back, and check that only the owner may delete it.

use std::sync::Arc;

use actix_web::cookie::{Cookie, Key};
use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{App, test as actix_test, web};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

use jokes::Trace;
use jokes::domain::{AuthService, JokeService, PasswordCost, PasswordVerifier};
use jokes::inbound::http::configure;
use jokes::inbound::http::dto::{JokePage, JokesLayout, RandomJokePage};
use jokes::inbound::http::session_codec::{SESSION_COOKIE_NAME, SessionCodec};
use jokes::inbound::http::state::HttpState;
use jokes::outbound::memory::{InMemoryJokeRepository, InMemoryUserRepository};

#[fixture]
fn state() -> HttpState {
    let passwords = PasswordVerifier::new(PasswordCost {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    })
    .expect("cheap argon2 params");
    let auth = Arc::new(AuthService::new(
        Arc::new(InMemoryUserRepository::new()),
        passwords,
    ));
    let jokes = Arc::new(JokeService::new(
        Arc::new(InMemoryJokeRepository::new()),
        Arc::new(DefaultClock),
    ));
    HttpState::new(auth.clone(), auth, jokes.clone(), jokes)
}

fn codec() -> SessionCodec {
    SessionCodec::new(
        Key::derive_from(&[7; 32]),
        Vec::new(),
        false,
        Arc::new(DefaultClock),
    )
}

fn session_from(response: &actix_web::dev::ServiceResponse) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
        .expect("session cookie issued")
}

fn location(response: &actix_web::dev::ServiceResponse) -> String {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header")
        .to_owned()
}

const ROAD_WORKER: &str = "I never wanted to believe my Dad was stealing from his job.\n\
    But when I got home, all the signs were there.";

fn joke_page(path: &str, cookie: Option<&Cookie<'static>>) -> actix_test::TestRequest {
    let req = actix_test::TestRequest::get().uri(path);
    match cookie {
        Some(cookie) => req.cookie(cookie.clone()),
        None => req,
    }
}

#[rstest]
#[actix_web::test]
async fn owner_lifecycle_over_in_memory_store(state: HttpState) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(web::Data::new(codec()))
            .wrap(Trace)
            .configure(configure),
    )
    .await;

    let register = |username: &'static str| {
        actix_test::TestRequest::post()
            .uri("/login")
            .set_form([
                ("loginType", "register"),
                ("username", username),
                ("password", "twixrox"),
                ("redirectTo", "/jokes/new"),
            ])
            .to_request()
    };

    let res = actix_test::call_service(&app, register("kody")).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/jokes/new");
    let kody = session_from(&res);

    let res = actix_test::call_service(&app, register("kody")).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/jokes/new")
            .cookie(kody.clone())
            .set_form([
                ("name", "Road worker"),
                ("content", ROAD_WORKER),
            ])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let joke_path = location(&res);
    assert!(joke_path.starts_with("/jokes/"));

    let req = joke_page(&joke_path, Some(&kody)).to_request();
    let page: JokePage = actix_test::call_and_read_body_json(&app, req).await;
    assert!(page.is_owner);
    assert_eq!(page.joke.name, "Road worker");
    assert_eq!(page.joke.content, ROAD_WORKER);

    let req = joke_page(&joke_path, None).to_request();
    let page: JokePage = actix_test::call_and_read_body_json(&app, req).await;
    assert!(!page.is_owner);
    assert_eq!(page.joke.content, ROAD_WORKER);

    let layout: JokesLayout = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/jokes").to_request(),
    )
    .await;
    assert!(layout.user.is_none());
    assert_eq!(layout.joke_list_items.len(), 1);

    let random: RandomJokePage = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/jokes/random").to_request(),
    )
    .await;
    assert_eq!(format!("/jokes/{}", random.random_joke.id), joke_path);

    let res = actix_test::call_service(&app, register("rowan")).await;
    let rowan = session_from(&res);

    let req = joke_page(&joke_path, Some(&rowan)).to_request();
    let page: JokePage = actix_test::call_and_read_body_json(&app, req).await;
    assert!(!page.is_owner);

    let delete_as = |cookie: Cookie<'static>| {
        actix_test::TestRequest::post()
            .uri(&joke_path)
            .cookie(cookie)
            .set_form([("_method", "delete")])
            .to_request()
    };

    let res = actix_test::call_service(&app, delete_as(rowan)).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = actix_test::call_service(&app, delete_as(kody.clone())).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/jokes");

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri(&joke_path).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn signing_in_with_the_wrong_password_is_rejected(state: HttpState) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(web::Data::new(codec()))
            .configure(configure),
    )
    .await;

    let sign_in = |login_type: &'static str, password: &'static str| {
        actix_test::TestRequest::post()
            .uri("/login")
            .set_form([
                ("loginType", login_type),
                ("username", "kody"),
                ("password", password),
                ("redirectTo", "/jokes"),
            ])
            .to_request()
    };

    let res = actix_test::call_service(&app, sign_in("register", "twixrox")).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let res = actix_test::call_service(&app, sign_in("login", "wrong-pass")).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = actix_test::call_service(&app, sign_in("login", "twixrox")).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/jokes");
    session_from(&res);
}
