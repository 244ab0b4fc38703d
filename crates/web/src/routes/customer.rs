//! Customer dashboard and order history handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use vendora_client::{CartApi, Order, OrderSummary, OrdersApi};
use vendora_core::OrderId;

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::routes::{MessageQuery, flash_redirect};
use crate::state::AppState;

const ORDERS_PAGE_SIZE: u32 = 10;

// =============================================================================
// View Types
// =============================================================================

/// Order row for history tables.
pub struct OrderRowView {
    pub id: i64,
    pub order_number: String,
    pub status: String,
    pub cancellable: bool,
    pub item_count: usize,
    pub total: String,
}

impl OrderRowView {
    fn from_summary(order: &OrderSummary) -> Self {
        Self {
            id: order.id.as_i64(),
            order_number: order.order_number.clone(),
            status: order.status.to_string(),
            cancellable: order.status.cancellable(),
            item_count: order.items.len(),
            total: filters::rupees(order.total),
        }
    }
}

/// Order line for the detail page.
pub struct OrderItemView {
    pub name: String,
    pub image: Option<String>,
    pub vendor: Option<String>,
    pub quantity: u32,
    pub price: String,
}

/// Full order display data.
pub struct OrderDetailView {
    pub id: i64,
    pub order_number: String,
    pub status: String,
    pub cancellable: bool,
    pub items: Vec<OrderItemView>,
    pub subtotal: String,
    pub tax: String,
    pub shipping: String,
    pub total: String,
    pub payment_method: Option<String>,
    pub payment_status: Option<String>,
    pub shipping_address: Option<String>,
}

impl OrderDetailView {
    fn from_order(order: &Order) -> Self {
        Self {
            id: order.summary.id.as_i64(),
            order_number: order.summary.order_number.clone(),
            status: order.summary.status.to_string(),
            cancellable: order.summary.status.cancellable(),
            items: order
                .summary
                .items
                .iter()
                .map(|item| OrderItemView {
                    name: item.product_name.clone(),
                    image: item.product_image.clone(),
                    vendor: item.vendor_name.clone(),
                    quantity: item.quantity,
                    price: filters::rupees(item.price),
                })
                .collect(),
            subtotal: filters::rupees(order.summary.subtotal),
            tax: filters::rupees(order.summary.tax),
            shipping: filters::rupees(order.summary.shipping),
            total: filters::rupees(order.summary.total),
            payment_method: order.payment_method.clone(),
            payment_status: order.payment_status.map(|s| s.to_string()),
            shipping_address: order.shipping_address.as_ref().map(|a| {
                format!(
                    "{}, {}, {} {}, {}",
                    a.street, a.city, a.state, a.zip_code, a.country
                )
            }),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Customer dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "customer/dashboard.html")]
pub struct CustomerDashboardTemplate {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub recent_orders: Vec<OrderRowView>,
    pub wishlist_count: usize,
    pub error: Option<String>,
}

/// Order history template.
#[derive(Template, WebTemplate)]
#[template(path = "customer/orders.html")]
pub struct OrdersTemplate {
    pub orders: Vec<OrderRowView>,
    pub current_page: u32,
    pub total_pages: u32,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Order detail template.
#[derive(Template, WebTemplate)]
#[template(path = "customer/order_detail.html")]
pub struct OrderDetailTemplate {
    pub order: OrderDetailView,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Pagination query.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the customer dashboard: profile plus recent activity.
pub async fn dashboard(State(state): State<AppState>, auth: RequireAuth) -> impl IntoResponse {
    let recent = state.api().orders(&auth.token, 0, 5).await;
    let wishlist = state.api().wishlist(&auth.token).await;

    let error = if recent.is_err() {
        Some("Could not load your recent orders.".to_owned())
    } else {
        None
    };
    if let Err(e) = &recent {
        tracing::warn!(error = %e, "failed to fetch recent orders");
    }

    let user = &auth.user;
    CustomerDashboardTemplate {
        name: user.display_name(),
        username: user.username.clone(),
        email: user.email.to_string(),
        phone_number: user.phone_number.clone(),
        address: user.address.as_ref().map(|a| {
            format!(
                "{}, {}, {} {}, {}",
                a.street, a.city, a.state, a.zip_code, a.country
            )
        }),
        recent_orders: recent
            .map(|page| page.content.iter().map(OrderRowView::from_summary).collect())
            .unwrap_or_default(),
        wishlist_count: wishlist.map(|w| w.len()).unwrap_or_default(),
        error,
    }
}

/// Display paginated order history.
pub async fn orders(
    State(state): State<AppState>,
    auth: RequireAuth,
    Query(page_query): Query<PageQuery>,
    Query(message): Query<MessageQuery>,
) -> OrdersTemplate {
    let current_page = page_query.page.unwrap_or(1).max(1);

    match state
        .api()
        .orders(&auth.token, current_page - 1, ORDERS_PAGE_SIZE)
        .await
    {
        Ok(page) => OrdersTemplate {
            orders: page.content.iter().map(OrderRowView::from_summary).collect(),
            current_page,
            total_pages: page.total_pages,
            prev_page: (current_page > 1).then(|| current_page - 1),
            next_page: (current_page < page.total_pages).then(|| current_page + 1),
            error: message.error,
            success: message.success,
        },
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch orders");
            OrdersTemplate {
                orders: Vec::new(),
                current_page,
                total_pages: 0,
                prev_page: None,
                next_page: None,
                error: Some("Could not load your orders. Please try again.".to_owned()),
                success: None,
            }
        }
    }
}

/// Display one order.
pub async fn order_detail(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i64>,
    Query(message): Query<MessageQuery>,
) -> Result<OrderDetailTemplate, AppError> {
    let order = state
        .api()
        .order(&auth.token, OrderId::new(id))
        .await
        .map_err(|e| match e {
            vendora_client::ApiError::NotFound(_) => AppError::NotFound(format!("order {id}")),
            other => AppError::Api(other),
        })?;

    Ok(OrderDetailTemplate {
        order: OrderDetailView::from_order(&order),
        error: message.error,
        success: message.success,
    })
}

/// Cancel an order.
pub async fn cancel_order(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i64>,
) -> Response {
    let page = format!("/customer/orders/{id}");
    match state.api().cancel_order(&auth.token, OrderId::new(id)).await {
        Ok(status) => flash_redirect(&page, "success", &status.message).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "order cancellation failed");
            flash_redirect(&page, "error", &e.to_string()).into_response()
        }
    }
}
