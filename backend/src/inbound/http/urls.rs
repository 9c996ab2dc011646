//! Alias management handlers for logged-in users.
//!
//! ```text
//! GET  /urls
//! GET  /urls/new
//! POST /urls                      {"longURL":"https://example.com"}
//! GET  /urls/{shortURL}
//! POST /urls/{shortURL}           {"newURL":"https://example.org"}
//! POST /urls/{shortURL}/delete
//! ```

use std::collections::BTreeMap;

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AccessError, AliasKey, AliasRecord, Error, Identity, UserProfile};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, Body, into_body, see_other};

/// Body of `POST /urls`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct CreateUrlForm {
    /// URL to shorten. Stored as given.
    #[serde(rename = "longURL")]
    #[schema(example = "http://www.lighthouselabs.ca")]
    pub long_url: String,
}

/// Body of `POST /urls/{shortURL}`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct UpdateUrlForm {
    /// Replacement target URL.
    #[serde(rename = "newURL")]
    #[schema(example = "http://www.google.com")]
    pub new_url: String,
}

/// The caller's aliases.
#[derive(Debug, Serialize, ToSchema)]
pub struct UrlIndex {
    /// Logged-in user.
    pub user: UserProfile,
    /// Aliases keyed by short URL.
    #[schema(value_type = Object)]
    pub urls: BTreeMap<AliasKey, AliasRecord>,
}

/// One alias of the caller.
#[derive(Debug, Serialize, ToSchema)]
pub struct UrlView {
    /// Alias key.
    #[serde(rename = "shortURL")]
    #[schema(value_type = String, example = "b2xVn2")]
    pub short_url: AliasKey,
    /// Target URL.
    #[serde(rename = "longURL")]
    pub long_url: String,
    /// Logged-in user.
    pub user: UserProfile,
}

/// Body of the new-alias page.
#[derive(Debug, Serialize, ToSchema)]
pub struct NewUrlPage {
    /// Logged-in user.
    pub user: UserProfile,
}

fn alias_key(raw: String) -> Result<AliasKey, Error> {
    AliasKey::new(raw).map_err(|_| Error::from(AccessError::NotFound))
}

fn logged_in_profile(identity: &Identity) -> Result<UserProfile, Error> {
    identity
        .user()
        .map(|user| user.profile())
        .ok_or_else(|| AccessError::Unauthenticated.into())
}

/// List the caller's aliases.
#[utoipa::path(
    get,
    path = "/urls",
    responses(
        (status = 200, description = "Caller's aliases", body = UrlIndex),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["urls"],
    operation_id = "listUrls"
)]
#[get("/urls")]
pub async fn list_urls(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UrlIndex>> {
    let identity = state.identify(&session);
    let urls = state.aliases.list(&identity).await?;
    let user = logged_in_profile(&identity)?;
    Ok(web::Json(UrlIndex { user, urls }))
}

/// New-alias page. Anonymous visitors are sent to the login page.
#[utoipa::path(
    get,
    path = "/urls/new",
    responses(
        (status = 200, description = "Logged in", body = NewUrlPage),
        (status = 303, description = "Redirect to /login")
    ),
    tags = ["urls"],
    operation_id = "newUrlPage"
)]
#[get("/urls/new")]
pub async fn new_url_page(state: web::Data<HttpState>, session: SessionContext) -> HttpResponse {
    match logged_in_profile(&state.identify(&session)) {
        Ok(user) => HttpResponse::Ok().json(NewUrlPage { user }),
        Err(_) => see_other("/login"),
    }
}

/// Shorten a URL for the caller.
#[utoipa::path(
    post,
    path = "/urls",
    request_body = CreateUrlForm,
    responses(
        (status = 303, description = "Created; redirect to the new alias"),
        (status = 401, description = "Not logged in", body = Error),
        (status = 500, description = "No free alias key", body = Error)
    ),
    tags = ["urls"],
    operation_id = "createUrl"
)]
#[post("/urls")]
pub async fn create_url(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Body<CreateUrlForm>,
) -> ApiResult<HttpResponse> {
    let identity = state.identify(&session);
    let form = into_body(payload);
    let key = state.aliases.create(&identity, form.long_url).await?;
    Ok(see_other(&format!("/urls/{key}")))
}

/// Show one of the caller's aliases.
#[utoipa::path(
    get,
    path = "/urls/{shortURL}",
    params(("shortURL" = String, Path, description = "Alias key")),
    responses(
        (status = 200, description = "The alias", body = UrlView),
        (status = 401, description = "Not logged in", body = Error),
        (status = 403, description = "Owned by someone else", body = Error),
        (status = 404, description = "No such alias", body = Error)
    ),
    tags = ["urls"],
    operation_id = "showUrl"
)]
#[get("/urls/{short_url}")]
pub async fn show_url(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<UrlView>> {
    let identity = state.identify(&session);
    let key = alias_key(path.into_inner())?;
    let record = state.aliases.show(&identity, &key).await?;
    let user = logged_in_profile(&identity)?;
    Ok(web::Json(UrlView {
        short_url: key,
        long_url: record.target_url().to_owned(),
        user,
    }))
}

/// Point one of the caller's aliases somewhere else.
#[utoipa::path(
    post,
    path = "/urls/{shortURL}",
    params(("shortURL" = String, Path, description = "Alias key")),
    request_body = UpdateUrlForm,
    responses(
        (status = 303, description = "Updated; redirect to /urls"),
        (status = 401, description = "Not logged in", body = Error),
        (status = 403, description = "Owned by someone else", body = Error),
        (status = 404, description = "No such alias", body = Error)
    ),
    tags = ["urls"],
    operation_id = "updateUrl"
)]
#[post("/urls/{short_url}")]
pub async fn update_url(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: Body<UpdateUrlForm>,
) -> ApiResult<HttpResponse> {
    let identity = state.identify(&session);
    let key = alias_key(path.into_inner())?;
    let form = into_body(payload);
    state.aliases.update(&identity, &key, form.new_url).await?;
    Ok(see_other("/urls"))
}

/// Delete one of the caller's aliases.
#[utoipa::path(
    post,
    path = "/urls/{shortURL}/delete",
    params(("shortURL" = String, Path, description = "Alias key")),
    responses(
        (status = 303, description = "Deleted; redirect to /urls"),
        (status = 401, description = "Not logged in", body = Error),
        (status = 403, description = "Owned by someone else", body = Error),
        (status = 404, description = "No such alias", body = Error)
    ),
    tags = ["urls"],
    operation_id = "deleteUrl"
)]
#[post("/urls/{short_url}/delete")]
pub async fn delete_url(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let identity = state.identify(&session);
    let key = alias_key(path.into_inner())?;
    state.aliases.delete(&identity, &key).await?;
    Ok(see_other("/urls"))
}
