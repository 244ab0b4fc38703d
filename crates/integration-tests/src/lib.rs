//! Shared helpers for Vendora integration tests.
//!
//! Tests drive the full router via `tower::ServiceExt::oneshot` against the
//! fixture client, carrying cookies between requests by hand the way a
//! browser would.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use tower::ServiceExt;

use vendora_client::{FixtureClient, MarketplaceApi};
use vendora_web::config::MarketplaceConfig;
use vendora_web::state::AppState;

/// Build the application router backed by a fresh fixture client, returning
/// the fixtures too so tests can assert on recorded backend calls.
#[must_use]
pub fn test_app() -> (Router, Arc<FixtureClient>) {
    let fixtures = Arc::new(FixtureClient::new());
    let api: Arc<dyn MarketplaceApi> = fixtures.clone();
    let state = AppState::with_api(MarketplaceConfig::for_tests(), api);
    (vendora_web::app(state), fixtures)
}

/// Issue one request against the router.
///
/// # Panics
///
/// Panics if the router fails to produce a response.
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone()
        .oneshot(request)
        .await
        .expect("router should produce a response")
}

/// GET `path`, optionally with a `Cookie` header.
pub async fn get(app: &Router, path: &str, cookies: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(cookies) = cookies {
        builder = builder.header(header::COOKIE, cookies);
    }
    send(
        app,
        builder.body(Body::empty()).expect("request builds"),
    )
    .await
}

/// POST a url-encoded form to `path`, optionally with a `Cookie` header.
pub async fn post_form(
    app: &Router,
    path: &str,
    form: &[(&str, &str)],
    cookies: Option<&str>,
) -> Response<Body> {
    let body = form
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookies) = cookies {
        builder = builder.header(header::COOKIE, cookies);
    }
    send(app, builder.body(Body::from(body)).expect("request builds")).await
}

/// Collect every `Set-Cookie` value from a response into a single `Cookie`
/// header value for the next request.
#[must_use]
pub fn cookies_from(response: &Response<Body>) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .collect::<Vec<_>>()
        .join("; ")
}

/// The `Location` header of a redirect response.
#[must_use]
pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

/// Read the full response body as a UTF-8 string.
///
/// # Panics
///
/// Panics if the body cannot be collected or is not UTF-8.
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collects");
    String::from_utf8(bytes.to_vec()).expect("body is UTF-8")
}

/// A `user` cookie value for driving the route guard directly.
#[must_use]
pub fn user_cookie_for_role(role: &str) -> String {
    let json = format!(r#"{{"id":9,"username":"probe","role":"{role}"}}"#);
    format!("user={}", urlencoding::encode(&json))
}
