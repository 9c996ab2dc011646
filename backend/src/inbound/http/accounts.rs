//! Account handlers: landing page, login, registration, logout and the
//! current-user endpoint.
//!
//! ```text
//! POST /login    {"email":"a@a.com","password":"pass"}
//! POST /register {"email":"c@c.com","password":"secret"}
//! POST /logout
//! GET  /api/v1/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{AccessError, Credentials, Error, UserProfile, ValidationFailure};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, Body, into_body, see_other};

/// Email and password as submitted by the login or registration form.
///
/// Both fields are trimmed before use; missing fields read as empty.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct CredentialsForm {
    /// Login email.
    #[schema(example = "a@a.com")]
    pub email: String,
    /// Plain-text password.
    #[schema(example = "pass")]
    pub password: String,
}

/// Body of the login and registration pages.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthPage {
    /// Always `null`: the page is only shown to anonymous visitors.
    pub user: Option<UserProfile>,
}

/// Landing page: send visitors to their aliases or to the login page.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 303, description = "Redirect to /urls or /login")),
    tags = ["accounts"],
    operation_id = "home"
)]
#[get("/")]
pub async fn home(state: web::Data<HttpState>, session: SessionContext) -> HttpResponse {
    if state.identify(&session).is_authenticated() {
        see_other("/urls")
    } else {
        see_other("/login")
    }
}

fn auth_page(state: &HttpState, session: &SessionContext) -> HttpResponse {
    if state.identify(session).is_authenticated() {
        return see_other("/urls");
    }
    HttpResponse::Ok().json(AuthPage { user: None })
}

/// Login page, or a redirect for visitors who are already logged in.
#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = 200, description = "Anonymous visitor", body = AuthPage),
        (status = 303, description = "Already logged in")
    ),
    tags = ["accounts"],
    operation_id = "loginPage"
)]
#[get("/login")]
pub async fn login_page(state: web::Data<HttpState>, session: SessionContext) -> HttpResponse {
    auth_page(&state, &session)
}

/// Registration page, gated like the login page.
#[utoipa::path(
    get,
    path = "/register",
    responses(
        (status = 200, description = "Anonymous visitor", body = AuthPage),
        (status = 303, description = "Already logged in")
    ),
    tags = ["accounts"],
    operation_id = "registerPage"
)]
#[get("/register")]
pub async fn register_page(state: web::Data<HttpState>, session: SessionContext) -> HttpResponse {
    auth_page(&state, &session)
}

/// Check credentials and start a session.
///
/// Blank fields are refused exactly like wrong ones.
#[utoipa::path(
    post,
    path = "/login",
    request_body = CredentialsForm,
    responses(
        (status = 303, description = "Logged in", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 403, description = "Email or password is incorrect", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Body<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let form = into_body(payload);
    let credentials = Credentials::try_from_parts(&form.email, &form.password)
        .map_err(|_| Error::from(ValidationFailure::InvalidCredentials))?;
    let user_id = state.accounts.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    Ok(see_other("/urls"))
}

/// Create an account and start a session for it.
#[utoipa::path(
    post,
    path = "/register",
    request_body = CredentialsForm,
    responses(
        (status = 303, description = "Registered and logged in", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Empty field or email already taken", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Body<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let form = into_body(payload);
    let credentials = Credentials::try_from_parts(&form.email, &form.password)?;
    let user_id = state.accounts.register(&credentials).await?;
    session.persist_user(&user_id)?;
    Ok(see_other("/urls"))
}

/// End the session. Always succeeds, logged in or not.
#[utoipa::path(
    post,
    path = "/logout",
    responses((status = 303, description = "Session cleared")),
    tags = ["accounts"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    if let Some(id) = session.user_id() {
        debug!(user_id = %id, "user logged out");
    }
    session.clear();
    see_other("/urls")
}

/// Profile of the logged-in user.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Current user", body = UserProfile),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "currentUser"
)]
#[get("/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserProfile>> {
    let identity = state.identify(&session);
    let user = identity
        .user()
        .ok_or_else(|| Error::from(AccessError::Unauthenticated))?;
    Ok(web::Json(user.profile()))
}
