//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use vendora_client::CatalogApi;
use vendora_client::listing::{self, SortKey};
use vendora_client::{NewReview, ProductQuery, ProductSummary, Review};
use vendora_core::{ProductId, ReviewId};

use crate::error::AppError;
use crate::filters;
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::routes::{MessageQuery, flash_redirect};
use crate::state::AppState;

/// Products per listing page.
const PAGE_SIZE: u32 = 12;

// =============================================================================
// View Types
// =============================================================================

/// Product display data for listing cards.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub original_price: Option<String>,
    pub discount_percentage: Option<u32>,
    pub image: Option<String>,
    pub rating: f64,
    pub review_count: u32,
    pub vendor: Option<String>,
}

impl ProductCardView {
    /// Build the card view from a fetched product row.
    #[must_use]
    pub fn from_summary(product: &ProductSummary) -> Self {
        Self {
            id: product.id.as_i64(),
            name: product.name.clone(),
            price: filters::rupees(product.price),
            original_price: product
                .is_on_sale()
                .then(|| product.original_price.map(filters::rupees))
                .flatten(),
            discount_percentage: product.discount_percentage(),
            image: product.primary_image().map(str::to_owned),
            rating: product.rating,
            review_count: product.review_count,
            vendor: product.vendor.as_ref().map(|v| v.name.clone()),
        }
    }
}

/// Product display data for the detail page.
pub struct ProductDetailView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: String,
    pub original_price: Option<String>,
    pub discount_percentage: Option<u32>,
    pub images: Vec<String>,
    pub category: Option<String>,
    pub vendor: Option<String>,
    pub rating: f64,
    pub review_count: u32,
    pub inventory: i64,
    pub available: bool,
    pub specifications: Vec<SpecView>,
}

/// Specification row for the detail page.
pub struct SpecView {
    pub name: String,
    pub value: String,
}

/// Review display data.
pub struct ReviewView {
    pub author: String,
    pub rating: u8,
    pub title: Option<String>,
    pub comment: String,
    pub verified: bool,
    pub helpful_count: u32,
    pub id: i64,
}

impl ReviewView {
    fn from_review(review: &Review) -> Self {
        Self {
            author: review
                .user
                .as_ref()
                .and_then(|u| u.name.clone().or_else(|| u.username.clone()))
                .unwrap_or_else(|| "Anonymous".to_owned()),
            rating: review.rating,
            title: review.title.clone(),
            comment: review.comment.clone(),
            verified: review.verified,
            helpful_count: review.helpful_count,
            id: review.id.as_i64(),
        }
    }
}

// =============================================================================
// Query & Form Types
// =============================================================================

/// Listing page query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    /// One-based page number.
    pub page: Option<u32>,
    pub sort: Option<String>,
    pub q: Option<String>,
    pub category: Option<String>,
}

/// Review submission form.
#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    pub rating: u8,
    pub title: Option<String>,
    pub comment: String,
}

/// Helpful-vote form (carries the product page to return to).
#[derive(Debug, Deserialize)]
pub struct HelpfulForm {
    pub next: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductCardView>,
    pub category_options: Vec<CategoryOption>,
    pub current_page: u32,
    pub total_pages: u32,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
    pub sort: String,
    pub q: String,
    pub category: String,
    pub error: Option<String>,
}

/// Category filter option for the listing sidebar.
pub struct CategoryOption {
    pub name: String,
    pub slug: String,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
    pub reviews: Vec<ReviewView>,
    pub logged_in: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the product listing page.
///
/// Pagination is passed through to the backend; search and sort are applied
/// client-side over the fetched snapshot, leaving the snapshot untouched.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> ProductsIndexTemplate {
    let current_page = query.page.unwrap_or(1).max(1);
    let sort = query.sort.clone().unwrap_or_default();
    let q = query.q.clone().unwrap_or_default();
    let category = query.category.clone().unwrap_or_default();

    // Soft-fail the filter rail: a missing category list never blanks the page
    let category_options = match state.api().categories().await {
        Ok(categories) => categories
            .into_iter()
            .map(|c| CategoryOption {
                name: c.name,
                slug: c.slug,
            })
            .collect(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch categories for listing");
            Vec::new()
        }
    };

    let product_query = ProductQuery {
        page: Some(current_page - 1),
        size: Some(PAGE_SIZE),
        sort: None,
        category: (!category.is_empty()).then(|| category.clone()),
        q: None,
    };

    match state.api().products(&product_query).await {
        Ok(page) => {
            // Derived views recompute from the snapshot; the snapshot itself
            // is never mutated
            let snapshot = page.content;
            let filtered = if q.is_empty() {
                snapshot
            } else {
                listing::search(&snapshot, &q)
            };
            let sorted = listing::sort(&filtered, SortKey::parse(&sort));

            ProductsIndexTemplate {
                products: sorted.iter().map(ProductCardView::from_summary).collect(),
                category_options,
                current_page,
                total_pages: page.total_pages,
                prev_page: (current_page > 1).then(|| current_page - 1),
                next_page: (current_page < page.total_pages).then(|| current_page + 1),
                sort,
                q,
                category,
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch products");
            ProductsIndexTemplate {
                products: Vec::new(),
                category_options,
                current_page,
                total_pages: 0,
                prev_page: None,
                next_page: None,
                sort,
                q,
                category,
                error: Some("Could not load products. Please try again.".to_owned()),
            }
        }
    }
}

/// Display the product detail page.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    OptionalAuth(user): OptionalAuth,
    Query(message): Query<MessageQuery>,
) -> Result<ProductShowTemplate, AppError> {
    let product = state
        .api()
        .product(ProductId::new(id))
        .await
        .map_err(|e| match e {
            vendora_client::ApiError::NotFound(_) => {
                AppError::NotFound(format!("product {id}"))
            }
            other => AppError::Api(other),
        })?;

    let reviews = product.reviews.iter().map(ReviewView::from_review).collect();
    let summary = &product.summary;

    Ok(ProductShowTemplate {
        product: ProductDetailView {
            id: summary.id.as_i64(),
            name: summary.name.clone(),
            description: summary.description.clone().unwrap_or_default(),
            price: filters::rupees(summary.price),
            original_price: summary
                .is_on_sale()
                .then(|| summary.original_price.map(filters::rupees))
                .flatten(),
            discount_percentage: summary.discount_percentage(),
            images: summary.images.clone(),
            category: summary.category.as_ref().map(|c| c.name.clone()),
            vendor: summary.vendor.as_ref().map(|v| v.name.clone()),
            rating: summary.rating,
            review_count: summary.review_count,
            inventory: summary.inventory,
            available: product.available(),
            specifications: product
                .specifications
                .iter()
                .map(|s| SpecView {
                    name: s.name.clone(),
                    value: s.value.clone(),
                })
                .collect(),
        },
        reviews,
        logged_in: user.is_some(),
        error: message.error,
        success: message.success,
    })
}

/// Handle review form submission.
pub async fn submit_review(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    auth: RequireAuth,
    axum::Form(form): axum::Form<ReviewForm>,
) -> Response {
    let page = format!("/product/{id}");

    // Local validation never reaches the backend
    if !(1..=5).contains(&form.rating) {
        return flash_redirect(&page, "error", "Rating must be between 1 and 5").into_response();
    }
    if form.comment.trim().is_empty() {
        return flash_redirect(&page, "error", "Review comment is required").into_response();
    }

    let review = NewReview {
        rating: form.rating,
        title: form
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_owned),
        comment: form.comment.trim().to_owned(),
    };

    match state
        .api()
        .submit_review(&auth.token, ProductId::new(id), &review)
        .await
    {
        Ok(_) => flash_redirect(&page, "success", "Review submitted").into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "review submission failed");
            flash_redirect(&page, "error", &e.to_string()).into_response()
        }
    }
}

/// Handle a helpful vote on a review.
pub async fn mark_helpful(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    auth: RequireAuth,
    axum::Form(form): axum::Form<HelpfulForm>,
) -> Response {
    match state
        .api()
        .mark_review_helpful(&auth.token, ReviewId::new(id))
        .await
    {
        Ok(_) => flash_redirect(&form.next, "success", "Thanks for your feedback").into_response(),
        Err(e) => flash_redirect(&form.next, "error", &e.to_string()).into_response(),
    }
}
