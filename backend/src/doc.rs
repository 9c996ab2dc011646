//! OpenAPI document for the HTTP surface.
//!
//! Served by Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{AliasRecord, Error, ErrorCode, UserProfile};
use crate::inbound::http::accounts::{AuthPage, CredentialsForm};
use crate::inbound::http::urls::{CreateUrlForm, NewUrlPage, UpdateUrlForm, UrlIndex, UrlView};

/// Adds the session cookie security scheme.
struct SessionCookieScheme;

impl Modify for SessionCookieScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login or POST /register.",
            ))),
        );
    }
}

/// OpenAPI document for the TinyLink API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SessionCookieScheme),
    info(
        title = "TinyLink API",
        description = "URL shortener with per-user aliases and public redirects."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::accounts::home,
        crate::inbound::http::accounts::login_page,
        crate::inbound::http::accounts::register_page,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::accounts::current_user,
        crate::inbound::http::urls::list_urls,
        crate::inbound::http::urls::new_url_page,
        crate::inbound::http::urls::create_url,
        crate::inbound::http::urls::show_url,
        crate::inbound::http::urls::update_url,
        crate::inbound::http::urls::delete_url,
        crate::inbound::http::redirect::follow_alias,
    ),
    components(schemas(
        Error,
        ErrorCode,
        UserProfile,
        AliasRecord,
        AuthPage,
        CredentialsForm,
        CreateUrlForm,
        UpdateUrlForm,
        UrlIndex,
        UrlView,
        NewUrlPage,
    )),
    tags(
        (name = "accounts", description = "Registration, login and sessions"),
        (name = "urls", description = "Alias management and resolution")
    )
)]
pub struct ApiDoc;
