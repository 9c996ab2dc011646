//! Session helpers so handlers deal in user ids rather than cookies.
//!
//! The cookie carries one entry, the logged-in user's id. Anything unreadable
//! in it is treated as "not logged in" rather than as a server error.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Newtype wrapper exposing the session operations handlers need.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Record `user_id` as the logged-in user.
    ///
    /// The session id is renewed first so a pre-login cookie cannot be
    /// replayed as a logged-in one.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The user id stored in the session, if any.
    ///
    /// Numeric ids normalise to the same string form as [`UserId::from`].
    pub fn user_id(&self) -> Option<UserId> {
        let raw = match self.0.get::<String>(USER_ID_KEY) {
            Ok(raw) => raw?,
            Err(_) => return self.numeric_user_id(),
        };
        match UserId::new(raw) {
            Ok(id) => Some(id),
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                None
            }
        }
    }

    fn numeric_user_id(&self) -> Option<UserId> {
        match self.0.get::<u64>(USER_ID_KEY) {
            Ok(id) => id.map(UserId::from),
            Err(error) => {
                warn!(%error, "unreadable user id in session cookie");
                None
            }
        }
    }

    /// Drop every session entry and expire the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_session_middleware())
            .route(
                "/set",
                web::get().to(|session: SessionContext| async move {
                    session.persist_user(&UserId::from(7))?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .route(
                "/get",
                web::get().to(|session: SessionContext| async move {
                    match session.user_id() {
                        Some(id) => HttpResponse::Ok().body(id.to_string()),
                        None => HttpResponse::NoContent().finish(),
                    }
                }),
            )
            .route(
                "/clear",
                web::get().to(|session: SessionContext| async move {
                    session.clear();
                    HttpResponse::Ok()
                }),
            )
    }

    #[actix_web::test]
    async fn round_trips_user_id() {
        let app = test::init_service(session_test_app()).await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        let cookie = session_cookie(&set_res).expect("session cookie set");

        let get_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/get").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        assert_eq!(test::read_body(get_res).await, "7");
    }

    #[actix_web::test]
    async fn missing_session_has_no_user() {
        let app = test::init_service(session_test_app()).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/get").to_request()).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn clearing_expires_the_cookie() {
        let app = test::init_service(session_test_app()).await;
        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        let cookie = session_cookie(&set_res).expect("session cookie set");

        let clear_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/clear").cookie(cookie).to_request(),
        )
        .await;
        let removal = session_cookie(&clear_res).expect("removal cookie");
        assert_eq!(removal.value(), "");
    }

    async fn user_id_after_storing<T>(value: T) -> Option<String>
    where
        T: serde::Serialize + Clone + 'static,
    {
        let app = test::init_service(session_test_app().route(
            "/set-raw",
            web::get().to(move |session: actix_session::Session| {
                let value = value.clone();
                async move {
                    session.insert(USER_ID_KEY, value).expect("insert raw value");
                    HttpResponse::Ok()
                }
            }),
        ))
        .await;
        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set-raw").to_request()).await;
        let cookie = session_cookie(&set_res).expect("session cookie set");

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/get").cookie(cookie).to_request(),
        )
        .await;
        if res.status() == StatusCode::NO_CONTENT {
            return None;
        }
        let body = test::read_body(res).await;
        Some(String::from_utf8(body.to_vec()).expect("utf8 body"))
    }

    #[actix_web::test]
    async fn numeric_user_id_normalises_to_its_string_form() {
        assert_eq!(user_id_after_storing(42_u64).await.as_deref(), Some("42"));
    }

    #[actix_web::test]
    async fn unreadable_user_ids_read_as_anonymous() {
        assert!(user_id_after_storing(true).await.is_none());
        assert!(user_id_after_storing(-3_i64).await.is_none());
        assert!(user_id_after_storing(" 7").await.is_none());
    }
}
