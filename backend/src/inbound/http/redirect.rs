//! Public alias resolution and the catch-all route.

use actix_web::http::header::{self, HeaderValue};
use actix_web::http::Method;
use actix_web::{HttpRequest, HttpResponse, get, web};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::domain::{AccessError, AliasKey, Error};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, see_other};

/// Bytes escaped before a stored target goes into `Location`: controls,
/// non-ASCII and the printable characters that may not appear in a URL.
const LOCATION_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// `Location` value for `target`. Existing `%XX` escapes pass through.
fn location_for(target: &str) -> Result<HeaderValue, Error> {
    let encoded = utf8_percent_encode(target, LOCATION_ENCODE_SET).to_string();
    HeaderValue::from_str(&encoded)
        .map_err(|err| Error::internal(format!("redirect target not encodable: {err}")))
}

/// Follow an alias to its target. No login needed.
#[utoipa::path(
    get,
    path = "/u/{shortURL}",
    params(("shortURL" = String, Path, description = "Alias key")),
    responses(
        (status = 302, description = "Redirect to the target URL"),
        (status = 404, description = "No such alias", body = Error)
    ),
    tags = ["urls"],
    operation_id = "followAlias",
    security([])
)]
#[get("/u/{short_url}")]
pub async fn follow_alias(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let key = AliasKey::new(path.into_inner()).map_err(|_| Error::from(AccessError::NotFound))?;
    let target = state.aliases.resolve(&key).await?;
    let location = location_for(&target)?;
    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish())
}

/// Unknown GET paths land on the alias list; anything else is not found.
pub async fn fallback(req: HttpRequest) -> ApiResult<HttpResponse> {
    if req.method() == Method::GET {
        return Ok(see_other("/urls"));
    }
    Err(AccessError::NotFound.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AliasDirectory, AliasRecord, Store, UserDirectory, UserId};
    use crate::outbound::{Argon2Hasher, RandomAliasKeys};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use std::sync::Arc;

    fn state() -> HttpState {
        let aliases: AliasDirectory = [(
            AliasKey::new("b2xVn2").expect("key"),
            AliasRecord::new(UserId::from(1), "http://www.lighthouselabs.ca"),
        )]
        .into_iter()
        .collect();
        HttpState::from_store(
            Arc::new(Store::from_parts(UserDirectory::new(), aliases)),
            Arc::new(Argon2Hasher::default()),
            Arc::new(RandomAliasKeys),
        )
    }

    #[actix_web::test]
    async fn existing_alias_redirects_anyone() {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .service(follow_alias),
        )
        .await;

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/u/b2xVn2").to_request()).await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(
            res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
            Some("http://www.lighthouselabs.ca")
        );
    }

    #[rstest]
    #[case("http://a.ca/x\ny", "http://a.ca/x%0Ay")]
    #[case("http://a.ca/caf\u{e9}", "http://a.ca/caf%C3%A9")]
    #[case("http://a.ca/a b?q=<1>", "http://a.ca/a%20b?q=%3C1%3E")]
    #[case("http://a.ca/already%20encoded", "http://a.ca/already%20encoded")]
    fn targets_are_escaped_for_the_location_header(#[case] target: &str, #[case] expected: &str) {
        let value = location_for(target).expect("encodable");
        assert_eq!(value.to_str().expect("visible ascii"), expected);
    }

    #[actix_web::test]
    async fn unknown_alias_is_not_found() {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .service(follow_alias),
        )
        .await;

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/u/zzzzzz").to_request()).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[case(Method::GET, StatusCode::SEE_OTHER)]
    #[case(Method::POST, StatusCode::NOT_FOUND)]
    #[actix_web::test]
    async fn fallback_only_redirects_reads(#[case] method: Method, #[case] expected: StatusCode) {
        let app =
            actix_test::init_service(App::new().default_service(web::route().to(fallback))).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::default()
                .method(method)
                .uri("/nowhere")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), expected);
    }
}
