//! The real HTTP client path through the web app, against a wiremock
//! backend: credential classification on the wire, bearer propagation
//! from the session, and backend error messages surfacing to the user.

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use wiremock::matchers::{bearer_token, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vendora_client::{MarketplaceApi, RestClient};
use vendora_integration_tests::{cookies_from, get, location, post_form};
use vendora_web::config::MarketplaceConfig;
use vendora_web::state::AppState;

fn app_with_backend(url: &str) -> Router {
    let api: Arc<dyn MarketplaceApi> = Arc::new(RestClient::new(url));
    vendora_web::app(AppState::with_api(MarketplaceConfig::for_tests(), api))
}

fn customer_body() -> serde_json::Value {
    serde_json::json!({
        "id": 1,
        "username": "shopper",
        "firstName": "Asha",
        "lastName": "Patel",
        "email": "shopper@example.com",
        "phoneNumber": "+91 9876543210",
        "role": "CUSTOMER"
    })
}

#[tokio::test]
async fn email_identifier_reaches_the_backend_under_the_email_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_partial_json(
            serde_json::json!({ "email": "shopper@example.com" }),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "wire-jwt",
            "user": customer_body()
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_with_backend(&server.uri());
    let response = post_form(
        &app,
        "/login",
        &[("identifier", "shopper@example.com"), ("password", "pw")],
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));
}

#[tokio::test]
async fn stored_bearer_token_is_attached_to_later_page_fetches() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_partial_json(serde_json::json!({ "username": "shopper" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "wire-jwt",
            "user": customer_body()
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cart"))
        .and(bearer_token("wire-jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [],
            "totalItems": 0,
            "subtotal": 0,
            "tax": 0,
            "shipping": 0,
            "total": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_with_backend(&server.uri());
    let login = post_form(
        &app,
        "/login",
        &[("identifier", "shopper"), ("password", "pw")],
        None,
    )
    .await;
    let cookies = cookies_from(&login);

    let cart = get(&app, "/cart", Some(&cookies)).await;
    assert_eq!(cart.status(), StatusCode::OK);
    // expect(1) on the cart mock verifies the bearer header on drop
}

#[tokio::test]
async fn backend_rejection_message_is_shown_to_the_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "message": "Account is locked"
        })))
        .mount(&server)
        .await;

    let app = app_with_backend(&server.uri());
    let response = post_form(
        &app,
        "/login",
        &[("identifier", "shopper"), ("password", "pw")],
        None,
    )
    .await;

    let target = location(&response).expect("redirect target");
    assert!(
        target.contains(&format!("error={}", urlencoding::encode("Account is locked"))),
        "got {target}"
    );
}
