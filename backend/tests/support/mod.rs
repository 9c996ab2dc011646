//! Shared in-process HTTP harness for integration tests.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::Value;
use tinylink::Trace;
use tinylink::domain::{Store, seed_example_data};
use tinylink::inbound::http::configure;
use tinylink::inbound::http::state::HttpState;
use tinylink::outbound::{Argon2Hasher, RandomAliasKeys};

pub const SESSION_COOKIE: &str = "session";

/// Argon2 with the smallest parameters the crate accepts.
pub fn cheap_hasher() -> Argon2Hasher {
    Argon2Hasher::with_cost(8, 1, 1).expect("cheap test parameters")
}

/// A store holding the demo users and aliases.
pub fn seeded_store() -> Arc<Store> {
    let store = Store::new();
    seed_example_data(&store, &cheap_hasher()).expect("seed demo data");
    Arc::new(store)
}

/// The full application over `store`, with a throwaway session key.
pub fn app(
    store: Arc<Store>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::from_store(store, Arc::new(cheap_hasher()), Arc::new(RandomAliasKeys));
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build();
    App::new()
        .app_data(web::Data::new(state))
        .wrap(session)
        .wrap(Trace)
        .configure(configure)
}

/// The session cookie set by `res`, if any.
pub fn session_cookie(res: &ServiceResponse) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
}

/// The `Location` header of `res`.
pub fn location(res: &ServiceResponse) -> Option<String> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// `POST {path}` with JSON credentials.
pub fn credentials_request(path: &str, email: &str, password: &str) -> TestRequest {
    TestRequest::post()
        .uri(path)
        .set_json(serde_json::json!({ "email": email, "password": password }))
}

/// `req` carrying `cookie` when one is given.
pub fn with_session(req: TestRequest, cookie: Option<&Cookie<'static>>) -> TestRequest {
    match cookie {
        Some(cookie) => req.cookie(cookie.clone()),
        None => req,
    }
}

/// Read the body of `res` as JSON.
pub async fn json_body(res: ServiceResponse) -> Value {
    test::read_body_json(res).await
}
