//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use tinylink::Trace;
#[cfg(debug_assertions)]
use tinylink::doc::ApiDoc;
use tinylink::inbound::http::configure;
use tinylink::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

#[derive(Clone)]
struct SessionOptions {
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
    ttl: Duration,
}

fn session_middleware(options: SessionOptions) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), options.key)
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(options.cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(options.same_site)
        .session_lifecycle(PersistentSession::default().session_ttl(options.ttl))
        .build()
}

fn build_app(
    state: web::Data<HttpState>,
    session: SessionOptions,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(state)
        .wrap(session_middleware(session))
        .wrap(Trace);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    app.configure(configure)
}

/// Build the HTTP server over `state`.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(state: HttpState, config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        session_ttl,
        bind_addr,
    } = config;
    let state = web::Data::new(state);
    let session = SessionOptions {
        key,
        cookie_secure,
        same_site,
        ttl: session_ttl,
    };

    let server = HttpServer::new(move || build_app(state.clone(), session.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "listening");
    Ok(server)
}
