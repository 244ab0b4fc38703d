//! Route guard behavior across the full router.
//!
//! The guard decides purely from the `user` cookie and the path, before any
//! handler runs; these tests drive it through real HTTP requests.

use axum::http::StatusCode;

use vendora_integration_tests::{get, location, test_app, user_cookie_for_role};

#[tokio::test]
async fn anonymous_visitor_is_sent_to_login_from_protected_prefixes() {
    let (app, _) = test_app();

    for path in ["/vendor/dashboard", "/admin/vendors", "/customer/orders"] {
        let response = get(&app, path, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "path {path}");
        assert_eq!(location(&response), Some("/login"), "path {path}");
    }
}

#[tokio::test]
async fn anonymous_visitor_browses_public_pages() {
    let (app, _) = test_app();

    for path in ["/", "/products", "/categories", "/category/fashion", "/product/3", "/login"] {
        let response = get(&app, path, None).await;
        assert_eq!(response.status(), StatusCode::OK, "path {path}");
    }
}

#[tokio::test]
async fn vendor_is_redirected_off_customer_pages_to_their_dashboard() {
    let (app, _) = test_app();
    let cookie = user_cookie_for_role("VENDOR");

    for path in ["/", "/products", "/categories"] {
        let response = get(&app, path, Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "path {path}");
        assert_eq!(location(&response), Some("/vendor/dashboard"), "path {path}");
    }
}

#[tokio::test]
async fn admin_is_redirected_off_customer_pages_to_their_dashboard() {
    let (app, _) = test_app();
    let cookie = user_cookie_for_role("ADMIN");

    let response = get(&app, "/", Some(&cookie)).await;
    assert_eq!(location(&response), Some("/admin/dashboard"));
}

#[tokio::test]
async fn customer_is_redirected_home_from_vendor_and_admin_sections() {
    let (app, _) = test_app();
    let cookie = user_cookie_for_role("CUSTOMER");

    for path in ["/vendor/dashboard", "/vendor/products", "/admin/vendors"] {
        let response = get(&app, path, Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "path {path}");
        assert_eq!(location(&response), Some("/"), "path {path}");
    }
}

#[tokio::test]
async fn vendor_is_redirected_home_from_admin_section() {
    let (app, _) = test_app();
    let cookie = user_cookie_for_role("VENDOR");

    let response = get(&app, "/admin/dashboard", Some(&cookie)).await;
    assert_eq!(location(&response), Some("/"));
}

#[tokio::test]
async fn customer_browses_customer_pages_freely() {
    let (app, _) = test_app();
    let cookie = user_cookie_for_role("CUSTOMER");

    for path in ["/products", "/categories", "/category/electronics"] {
        let response = get(&app, path, Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::OK, "path {path}");
    }
}

#[tokio::test]
async fn corrupted_user_cookie_is_treated_as_anonymous() {
    let (app, _) = test_app();

    // Garbage cookie on a public page: allowed through
    let response = get(&app, "/products", Some("user=%7Bnot-json")).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Garbage cookie on a protected page: same as no session
    let response = get(&app, "/vendor/dashboard", Some("user=%7Bnot-json")).await;
    assert_eq!(location(&response), Some("/login"));
}
