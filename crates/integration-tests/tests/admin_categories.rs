//! Admin category management: inline validation, slug derivation, and the
//! vendor approval queue's reason requirement.

use axum::http::StatusCode;

use vendora_integration_tests::{
    body_string, cookies_from, get, location, post_form, test_app,
};

async fn admin_cookies(app: &axum::Router) -> String {
    let login = post_form(
        app,
        "/login",
        &[("identifier", "admin"), ("password", "password123")],
        None,
    )
    .await;
    assert_eq!(location(&login), Some("/admin/dashboard"));
    cookies_from(&login)
}

#[tokio::test]
async fn empty_description_shows_inline_error_and_issues_no_request() {
    let (app, fixtures) = test_app();
    let cookies = admin_cookies(&app).await;

    let before = fixtures.calls();
    let response = post_form(
        &app,
        "/admin/categories",
        &[("name", "Toys"), ("description", "")],
        Some(&cookies),
    )
    .await;

    // The form re-renders inline rather than redirecting
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Description is required"));
    assert!(html.contains("value=\"Toys\""), "entered name is preserved");

    // No category creation reached the backend
    assert_eq!(
        fixtures.calls(),
        before,
        "validation failure issued no network request"
    );
}

#[tokio::test]
async fn valid_category_is_created_with_derived_slug() {
    let (app, fixtures) = test_app();
    let cookies = admin_cookies(&app).await;

    let response = post_form(
        &app,
        "/admin/categories",
        &[
            ("name", "Men's & Boys' Wear!"),
            ("description", "Apparel for men and boys"),
            ("featured", "on"),
        ],
        Some(&cookies),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let target = location(&response).expect("redirect target");
    assert!(target.starts_with("/admin/categories?success="), "got {target}");
    assert!(
        fixtures
            .calls()
            .iter()
            .any(|call| call == "POST /admin/categories"),
        "creation reached the backend"
    );

    // The new category appears with the derived slug
    let list = get(&app, "/admin/categories", Some(&cookies)).await;
    let html = body_string(list).await;
    assert!(html.contains("mens-boys-wear"));
}

#[tokio::test]
async fn category_list_shows_subcategories_and_supports_adding_one() {
    let (app, _) = test_app();
    let cookies = admin_cookies(&app).await;

    let response = post_form(
        &app,
        "/admin/categories/1/subcategories",
        &[("name", "Wearables")],
        Some(&cookies),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let list = get(&app, "/admin/categories", Some(&cookies)).await;
    let html = body_string(list).await;
    assert!(html.contains("Wearables"));
}

#[tokio::test]
async fn vendor_rejection_requires_a_reason() {
    let (app, fixtures) = test_app();
    let cookies = admin_cookies(&app).await;

    let before = fixtures.calls();
    let response = post_form(
        &app,
        "/admin/vendors/2/reject",
        &[("reason", "  ")],
        Some(&cookies),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let target = location(&response).expect("redirect target");
    assert!(target.contains("error="), "got {target}");
    assert_eq!(fixtures.calls(), before, "no rejection call without a reason");
}

#[tokio::test]
async fn approve_and_reject_update_the_vendor_record() {
    let (app, _) = test_app();
    let cookies = admin_cookies(&app).await;

    post_form(&app, "/admin/vendors/2/approve", &[], Some(&cookies)).await;
    let detail = get(&app, "/admin/vendors/2", Some(&cookies)).await;
    let html = body_string(detail).await;
    assert!(html.contains("Approved"));

    post_form(
        &app,
        "/admin/vendors/2/reject",
        &[("reason", "Storefront photos missing")],
        Some(&cookies),
    )
    .await;
    let detail = get(&app, "/admin/vendors/2", Some(&cookies)).await;
    let html = body_string(detail).await;
    assert!(html.contains("Rejected"));
    assert!(html.contains("Storefront photos missing"));
}
