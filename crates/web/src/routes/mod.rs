//! HTTP route handlers for the marketplace front end.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page
//! GET  /health                  - Health check
//!
//! # Catalog (public)
//! GET  /products                - Product listing (search/sort/filter)
//! GET  /product/{id}            - Product detail
//! POST /product/{id}/reviews    - Submit a review (requires auth)
//! POST /reviews/{id}/helpful    - Mark review helpful (requires auth)
//! GET  /categories              - Category listing
//! GET  /category/{slug}         - Category detail with products
//!
//! # Auth
//! GET  /login                   - Login page
//! POST /login                   - Login action
//! GET  /register                - Registration page
//! POST /register                - Registration action
//! GET  /forgot-password         - Forgot password page
//! POST /forgot-password         - Forgot password action
//! POST /logout                  - Logout action
//!
//! # Cart & wishlist (requires auth)
//! GET  /cart                    - Cart page
//! POST /cart/items              - Add item
//! POST /cart/items/{id}/update  - Change quantity
//! POST /cart/items/{id}/remove  - Remove item
//! POST /cart/clear              - Clear cart
//! POST /cart/checkout           - Place order from cart
//! GET  /wishlist                - Wishlist page
//! POST /wishlist/add            - Add item
//! POST /wishlist/{id}/remove    - Remove item
//!
//! # Customer section (role-gated by the route guard)
//! GET  /customer/dashboard      - Profile + recent orders
//! GET  /customer/orders         - Order history
//! GET  /customer/orders/{id}    - Order detail
//! POST /customer/orders/{id}/cancel - Cancel order
//!
//! # Vendor section (role-gated by the route guard)
//! GET  /vendor/dashboard        - Aggregate dashboard
//! GET  /vendor/products         - Product management
//! GET  /vendor/products/add     - Add product form
//! POST /vendor/products         - Create product
//! GET  /vendor/products/{id}/edit - Edit product form
//! POST /vendor/products/{id}    - Update product
//! POST /vendor/products/{id}/delete - Delete product
//! GET  /vendor/profile          - Store profile form
//! POST /vendor/profile          - Update store profile
//!
//! # Admin section (role-gated by the route guard)
//! GET  /admin/dashboard         - Aggregate counters
//! GET  /admin/vendors           - Vendor approval queue
//! GET  /admin/vendors/{id}      - Vendor detail
//! POST /admin/vendors/{id}/approve - Approve vendor
//! POST /admin/vendors/{id}/reject  - Reject vendor (reason required)
//! GET  /admin/categories        - Category management
//! GET  /admin/categories/new    - New category form
//! POST /admin/categories        - Create category
//! GET  /admin/categories/{id}/edit - Edit category form
//! POST /admin/categories/{id}   - Update category
//! POST /admin/categories/{id}/delete - Delete category
//! POST /admin/categories/{id}/subcategories - Add subcategory
//! POST /admin/categories/{id}/subcategories/{sid}/delete - Remove subcategory
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod categories;
pub mod customer;
pub mod home;
pub mod products;
pub mod vendor;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use serde::Deserialize;

use crate::state::AppState;

/// Query parameters for transient error/success display after a redirect.
#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Redirect to `path` carrying a flash message as a query parameter.
pub(crate) fn flash_redirect(path: &str, kind: &str, message: &str) -> Redirect {
    Redirect::to(&format!("{path}?{kind}={}", urlencoding::encode(message)))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route(
            "/forgot-password",
            get(auth::forgot_password_page).post(auth::forgot_password),
        )
        .route("/logout", post(auth::logout))
}

/// Create the cart and wishlist routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(cart::show))
        .route("/cart/items", post(cart::add))
        .route("/cart/items/{id}/update", post(cart::update))
        .route("/cart/items/{id}/remove", post(cart::remove))
        .route("/cart/clear", post(cart::clear))
        .route("/cart/checkout", post(cart::checkout))
        .route("/wishlist", get(cart::wishlist))
        .route("/wishlist/add", post(cart::wishlist_add))
        .route("/wishlist/{id}/remove", post(cart::wishlist_remove))
}

/// Create the customer section router.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(customer::dashboard))
        .route("/orders", get(customer::orders))
        .route("/orders/{id}", get(customer::order_detail))
        .route("/orders/{id}/cancel", post(customer::cancel_order))
}

/// Create the vendor section router.
pub fn vendor_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(vendor::dashboard))
        .route("/products", get(vendor::products).post(vendor::create_product))
        .route("/products/add", get(vendor::add_product_form))
        .route("/products/{id}/edit", get(vendor::edit_product_form))
        .route("/products/{id}", post(vendor::update_product))
        .route("/products/{id}/delete", post(vendor::delete_product))
        .route("/profile", get(vendor::profile).post(vendor::update_profile))
}

/// Create the admin section router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(admin::dashboard))
        .route("/vendors", get(admin::vendors))
        .route("/vendors/{id}", get(admin::vendor_detail))
        .route("/vendors/{id}/approve", post(admin::approve_vendor))
        .route("/vendors/{id}/reject", post(admin::reject_vendor))
        .route("/categories", get(admin::categories).post(admin::create_category))
        .route("/categories/new", get(admin::new_category_form))
        .route("/categories/{id}/edit", get(admin::edit_category_form))
        .route("/categories/{id}", post(admin::update_category))
        .route("/categories/{id}/delete", post(admin::delete_category))
        .route(
            "/categories/{id}/subcategories",
            post(admin::add_subcategory),
        )
        .route(
            "/categories/{id}/subcategories/{sid}/delete",
            post(admin::delete_subcategory),
        )
}

/// Create all routes for the front end.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Catalog
        .route("/products", get(products::index))
        .route("/product/{id}", get(products::show))
        .route("/product/{id}/reviews", post(products::submit_review))
        .route("/reviews/{id}/helpful", post(products::mark_helpful))
        .route("/categories", get(categories::index))
        .route("/category/{slug}", get(categories::show))
        // Auth
        .merge(auth_routes())
        // Cart & wishlist
        .merge(cart_routes())
        // Role-gated sections
        .nest("/customer", customer_routes())
        .nest("/vendor", vendor_routes())
        .nest("/admin", admin_routes())
}
