//! HTTP inbound adapter.
//!
//! Handlers answer with JSON or redirects. Request bodies are accepted as
//! either JSON or URL-encoded forms, so plain HTML forms keep working.

pub mod accounts;
pub mod error;
pub mod redirect;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod urls;

use actix_web::http::header;
use actix_web::{Either, HttpResponse, web};

pub use error::ApiResult;

/// A request body sent as JSON or as a URL-encoded form.
pub type Body<T> = Either<web::Json<T>, web::Form<T>>;

/// Unwrap a [`Body`] regardless of how it was encoded.
pub(crate) fn into_body<T>(body: Body<T>) -> T {
    match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    }
}

/// `303 See Other` pointing at `location`.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Register every route of the adapter.
///
/// Session and trace middleware are left to the caller so tests can supply
/// their own.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use std::sync::Arc;
/// use tinylink::domain::Store;
/// use tinylink::inbound::http::{configure, state::HttpState};
/// use tinylink::outbound::{Argon2Hasher, RandomAliasKeys};
///
/// let state = HttpState::from_store(
///     Arc::new(Store::new()),
///     Arc::new(Argon2Hasher::default()),
///     Arc::new(RandomAliasKeys),
/// );
/// let _app = App::new().app_data(web::Data::new(state)).configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(accounts::home)
        .service(accounts::login_page)
        .service(accounts::register_page)
        .service(accounts::login)
        .service(accounts::register)
        .service(accounts::logout)
        .service(web::scope("/api/v1").service(accounts::current_user))
        .service(urls::list_urls)
        .service(urls::new_url_page)
        .service(urls::create_url)
        .service(urls::show_url)
        .service(urls::update_url)
        .service(urls::delete_url)
        .service(redirect::follow_alias)
        .default_service(web::route().to(redirect::fallback));
}
