//! Cart and wishlist route handlers.
//!
//! Every mutating action is a form POST that redirects back with a flash
//! message; the backend recomputes totals on every fetch.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use vendora_client::{ApiError, Cart, CartApi, OrdersApi, PlaceOrderRequest, WishlistItem};
use vendora_core::{CartItemId, ProductId};

use crate::filters;
use crate::middleware::RequireAuth;
use crate::routes::{MessageQuery, flash_redirect};
use crate::state::AppState;

// =============================================================================
// View Types
// =============================================================================

/// Cart line display data.
pub struct CartItemView {
    pub id: i64,
    pub product_id: i64,
    pub name: String,
    pub image: Option<String>,
    pub vendor: Option<String>,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
}

/// Wishlist entry display data.
pub struct WishlistItemView {
    pub product_id: i64,
    pub name: String,
    pub image: Option<String>,
    pub price: String,
    pub original_price: Option<String>,
    pub rating: Option<f64>,
}

impl WishlistItemView {
    fn from_item(item: &WishlistItem) -> Self {
        Self {
            product_id: item.product_id.as_i64(),
            name: item.product.name.clone(),
            image: item.product.image.clone(),
            price: filters::rupees(item.product.price),
            original_price: item.product.original_price.map(filters::rupees),
            rating: item.product.rating,
        }
    }
}

// =============================================================================
// Form Types
// =============================================================================

/// Add-to-cart form.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i64,
    #[serde(default)]
    pub quantity: Option<u32>,
    /// Page to return to; defaults to the cart.
    #[serde(default)]
    pub next: Option<String>,
}

/// Quantity update form.
#[derive(Debug, Deserialize)]
pub struct QuantityForm {
    pub quantity: u32,
}

/// Checkout form.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub payment_method: String,
}

/// Add-to-wishlist form.
#[derive(Debug, Deserialize)]
pub struct WishlistForm {
    pub product_id: i64,
    #[serde(default)]
    pub next: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/index.html")]
pub struct CartTemplate {
    pub items: Vec<CartItemView>,
    pub total_items: u32,
    pub subtotal: String,
    pub tax: String,
    pub shipping: String,
    pub total: String,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl CartTemplate {
    fn from_cart(cart: &Cart, message: MessageQuery) -> Self {
        Self {
            items: cart
                .items
                .iter()
                .map(|item| CartItemView {
                    id: item.id.as_i64(),
                    product_id: item.product.id.as_i64(),
                    name: item.product.name.clone(),
                    image: item.product.image.clone(),
                    vendor: item.product.vendor.as_ref().map(|v| v.name.clone()),
                    quantity: item.quantity,
                    price: filters::rupees(item.price),
                    line_total: filters::rupees(
                        item.price * rust_decimal::Decimal::from(item.quantity),
                    ),
                })
                .collect(),
            total_items: cart.total_items,
            subtotal: filters::rupees(cart.subtotal),
            tax: filters::rupees(cart.tax),
            shipping: filters::rupees(cart.shipping),
            total: filters::rupees(cart.total),
            error: message.error,
            success: message.success,
        }
    }
}

/// Wishlist page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/wishlist.html")]
pub struct WishlistTemplate {
    pub items: Vec<WishlistItemView>,
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Cart Handlers
// =============================================================================

/// Display the cart page.
pub async fn show(
    State(state): State<AppState>,
    auth: RequireAuth,
    Query(message): Query<MessageQuery>,
) -> CartTemplate {
    match state.api().cart(&auth.token).await {
        Ok(cart) => CartTemplate::from_cart(&cart, message),
        // No cart yet is an empty cart, not an error
        Err(ApiError::NotFound(_)) => CartTemplate::from_cart(&Cart::empty(), message),
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch cart");
            let mut template = CartTemplate::from_cart(&Cart::empty(), message);
            template.error = Some("Could not load your cart. Please try again.".to_owned());
            template
        }
    }
}

/// Add an item to the cart.
pub async fn add(
    State(state): State<AppState>,
    auth: RequireAuth,
    Form(form): Form<AddToCartForm>,
) -> Response {
    let next = form.next.as_deref().unwrap_or("/cart");
    let quantity = form.quantity.unwrap_or(1).max(1);

    match state
        .api()
        .add_cart_item(&auth.token, ProductId::new(form.product_id), quantity)
        .await
    {
        Ok(status) => flash_redirect(next, "success", &status.message).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "add to cart failed");
            flash_redirect(next, "error", &e.to_string()).into_response()
        }
    }
}

/// Change a cart line's quantity.
pub async fn update(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i64>,
    Form(form): Form<QuantityForm>,
) -> Response {
    if form.quantity == 0 {
        return flash_redirect("/cart", "error", "Quantity must be at least 1").into_response();
    }

    match state
        .api()
        .update_cart_item(&auth.token, CartItemId::new(id), form.quantity)
        .await
    {
        Ok(status) => flash_redirect("/cart", "success", &status.message).into_response(),
        Err(e) => flash_redirect("/cart", "error", &e.to_string()).into_response(),
    }
}

/// Remove a cart line.
pub async fn remove(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i64>,
) -> Response {
    match state
        .api()
        .remove_cart_item(&auth.token, CartItemId::new(id))
        .await
    {
        Ok(status) => flash_redirect("/cart", "success", &status.message).into_response(),
        Err(e) => flash_redirect("/cart", "error", &e.to_string()).into_response(),
    }
}

/// Clear the whole cart.
pub async fn clear(State(state): State<AppState>, auth: RequireAuth) -> Response {
    match state.api().clear_cart(&auth.token).await {
        Ok(status) => flash_redirect("/cart", "success", &status.message).into_response(),
        Err(e) => flash_redirect("/cart", "error", &e.to_string()).into_response(),
    }
}

/// Place an order from the current cart.
pub async fn checkout(
    State(state): State<AppState>,
    auth: RequireAuth,
    Form(form): Form<CheckoutForm>,
) -> Response {
    if form.payment_method.trim().is_empty() {
        return flash_redirect("/cart", "error", "Payment method is required").into_response();
    }

    let request = PlaceOrderRequest {
        payment_method: form.payment_method.trim().to_owned(),
        shipping_address: auth.user.address.clone(),
    };

    match state.api().place_order(&auth.token, &request).await {
        Ok(order) => flash_redirect(
            &format!("/customer/orders/{}", order.summary.id),
            "success",
            "Order placed successfully",
        )
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "checkout failed");
            flash_redirect("/cart", "error", &e.to_string()).into_response()
        }
    }
}

// =============================================================================
// Wishlist Handlers
// =============================================================================

/// Display the wishlist page.
pub async fn wishlist(
    State(state): State<AppState>,
    auth: RequireAuth,
    Query(message): Query<MessageQuery>,
) -> WishlistTemplate {
    match state.api().wishlist(&auth.token).await {
        Ok(items) => WishlistTemplate {
            items: items.iter().map(WishlistItemView::from_item).collect(),
            error: message.error,
            success: message.success,
        },
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch wishlist");
            WishlistTemplate {
                items: Vec::new(),
                error: Some("Could not load your wishlist. Please try again.".to_owned()),
                success: None,
            }
        }
    }
}

/// Add a product to the wishlist.
pub async fn wishlist_add(
    State(state): State<AppState>,
    auth: RequireAuth,
    Form(form): Form<WishlistForm>,
) -> Response {
    let next = form.next.as_deref().unwrap_or("/wishlist");
    match state
        .api()
        .add_to_wishlist(&auth.token, ProductId::new(form.product_id))
        .await
    {
        Ok(status) => flash_redirect(next, "success", &status.message).into_response(),
        Err(e) => flash_redirect(next, "error", &e.to_string()).into_response(),
    }
}

/// Remove a product from the wishlist.
pub async fn wishlist_remove(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i64>,
) -> Response {
    match state
        .api()
        .remove_from_wishlist(&auth.token, ProductId::new(id))
        .await
    {
        Ok(status) => flash_redirect("/wishlist", "success", &status.message).into_response(),
        Err(e) => flash_redirect("/wishlist", "error", &e.to_string()).into_response(),
    }
}
