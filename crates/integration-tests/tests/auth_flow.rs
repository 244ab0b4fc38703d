//! Login, logout, and registration flows end to end.

use axum::http::StatusCode;

use vendora_integration_tests::{
    body_string, cookies_from, get, location, post_form, test_app,
};

#[tokio::test]
async fn login_sets_session_and_mirror_cookie_together() {
    let (app, _) = test_app();

    let response = post_form(
        &app,
        "/login",
        &[("identifier", "vendor@example.com"), ("password", "password123")],
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/vendor/dashboard"));

    let cookies = cookies_from(&response);
    assert!(cookies.contains("vendora_session="), "session cookie set");
    assert!(cookies.contains("user="), "mirror cookie set");

    // The mirror cookie carries the same user record the session stores
    let user_value = cookies
        .split("; ")
        .find_map(|cookie| cookie.strip_prefix("user="))
        .expect("user cookie present");
    let decoded = urlencoding::decode(user_value).expect("percent-decoded");
    let user: serde_json::Value = serde_json::from_str(&decoded).expect("valid JSON");
    assert_eq!(user["username"], "vendor");
    assert_eq!(user["role"], "VENDOR");

    // The session works for a protected page
    let dashboard = get(&app, "/vendor/dashboard", Some(&cookies)).await;
    assert_eq!(dashboard.status(), StatusCode::OK);
    let html = body_string(dashboard).await;
    assert!(html.contains("ElectroHub"), "dashboard renders store data");
}

#[tokio::test]
async fn login_with_bad_credentials_redirects_back_with_message() {
    let (app, _) = test_app();

    let response = post_form(
        &app,
        "/login",
        &[("identifier", "customer"), ("password", "wrong")],
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let target = location(&response).expect("redirect target");
    assert!(target.starts_with("/login?error="), "got {target}");

    let cookies = cookies_from(&response);
    assert!(!cookies.contains("user="), "no mirror cookie on failure");
}

#[tokio::test]
async fn logout_clears_session_and_mirror_cookie() {
    let (app, _) = test_app();

    let login = post_form(
        &app,
        "/login",
        &[("identifier", "customer"), ("password", "password123")],
        None,
    )
    .await;
    let cookies = cookies_from(&login);

    let logout = post_form(&app, "/logout", &[], Some(&cookies)).await;
    assert_eq!(location(&logout), Some("/"));

    // The user cookie is expired in the response
    let cleared = logout
        .headers()
        .get_all(axum::http::header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.starts_with("user=") && value.contains("Max-Age=0"));
    assert!(cleared, "user cookie expired on logout");

    // Without cookies the protected section requires login again
    let after = get(&app, "/customer/dashboard", None).await;
    assert_eq!(location(&after), Some("/login"));
}

#[tokio::test]
async fn customer_registration_auto_authenticates() {
    let (app, _) = test_app();

    let response = post_form(
        &app,
        "/register",
        &[
            ("username", "newshopper"),
            ("first_name", "Nina"),
            ("last_name", "Shah"),
            ("email", "nina@example.com"),
            ("phone_number", "+91 9000000000"),
            ("password", "longenough1"),
            ("password_confirm", "longenough1"),
            ("role", "CUSTOMER"),
        ],
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));
    let cookies = cookies_from(&response);
    assert!(cookies.contains("user="), "auto-login sets the mirror cookie");
}

#[tokio::test]
async fn vendor_registration_lands_on_login_with_message() {
    let (app, _) = test_app();

    let response = post_form(
        &app,
        "/register",
        &[
            ("username", "newstore"),
            ("first_name", "Ravi"),
            ("last_name", "Kumar"),
            ("email", "ravi@example.com"),
            ("phone_number", "+91 9000000001"),
            ("password", "longenough1"),
            ("password_confirm", "longenough1"),
            ("role", "VENDOR"),
            ("store_name", "Ravi's Emporium"),
            ("store_description", "Everything under one roof"),
        ],
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let target = location(&response).expect("redirect target");
    assert!(target.starts_with("/login?success="), "got {target}");
}

#[tokio::test]
async fn registration_validation_failures_render_inline_without_network(
) {
    let (app, fixtures) = test_app();

    let response = post_form(
        &app,
        "/register",
        &[
            ("username", ""),
            ("first_name", "Nina"),
            ("last_name", "Shah"),
            ("email", "not-an-email"),
            ("phone_number", ""),
            ("password", "short"),
            ("password_confirm", "different"),
            ("role", "CUSTOMER"),
        ],
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Username is required"));
    assert!(html.contains("A valid email address is required"));
    assert!(html.contains("Passwords do not match"));

    // No registration call reached the backend
    assert!(
        !fixtures.calls().iter().any(|call| call == "POST /auth/register"),
        "no backend call on validation failure"
    );
}
