//! Category route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use vendora_client::{CatalogApi, Category, ProductQuery};

use crate::error::AppError;
use crate::filters;
use crate::routes::products::ProductCardView;
use crate::state::AppState;

const PAGE_SIZE: u32 = 12;

// =============================================================================
// View Types
// =============================================================================

/// Category display data for grids and the home page.
#[derive(Clone)]
pub struct CategoryCardView {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub product_count: u32,
    pub subcategories: Vec<String>,
}

impl CategoryCardView {
    /// Build the card view from a fetched category.
    #[must_use]
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            slug: category.slug.clone(),
            description: category.description.clone(),
            image: category.image.clone(),
            product_count: category.product_count,
            subcategories: category
                .subcategories
                .iter()
                .map(|s| s.name.clone())
                .collect(),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Category listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/index.html")]
pub struct CategoriesIndexTemplate {
    pub categories: Vec<CategoryCardView>,
    pub error: Option<String>,
}

/// Category detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/show.html")]
pub struct CategoryShowTemplate {
    pub category: CategoryCardView,
    pub products: Vec<ProductCardView>,
    pub current_page: u32,
    pub total_pages: u32,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
    pub error: Option<String>,
}

/// Pagination query for the category detail page.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryPageQuery {
    pub page: Option<u32>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the category listing page.
pub async fn index(State(state): State<AppState>) -> CategoriesIndexTemplate {
    match state.api().categories().await {
        Ok(categories) => CategoriesIndexTemplate {
            categories: categories.iter().map(CategoryCardView::from_category).collect(),
            error: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch categories");
            CategoriesIndexTemplate {
                categories: Vec::new(),
                error: Some("Could not load categories. Please try again.".to_owned()),
            }
        }
    }
}

/// Display one category with its products.
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<CategoryPageQuery>,
) -> Result<CategoryShowTemplate, AppError> {
    let category = state.api().category(&slug).await.map_err(|e| match e {
        vendora_client::ApiError::NotFound(_) => AppError::NotFound(format!("category {slug}")),
        other => AppError::Api(other),
    })?;

    let current_page = query.page.unwrap_or(1).max(1);
    let product_query = ProductQuery {
        page: Some(current_page - 1),
        size: Some(PAGE_SIZE),
        ..ProductQuery::default()
    };

    // Product fetch failures degrade to an inline message under the header
    let (products, total_pages, error) = match state
        .api()
        .products_by_category(category.id, &product_query)
        .await
    {
        Ok(page) => (
            page.content
                .iter()
                .map(ProductCardView::from_summary)
                .collect(),
            page.total_pages,
            None,
        ),
        Err(e) => {
            tracing::warn!(error = %e, slug, "failed to fetch category products");
            (
                Vec::new(),
                0,
                Some("Could not load products for this category.".to_owned()),
            )
        }
    };

    Ok(CategoryShowTemplate {
        category: CategoryCardView::from_category(&category),
        products,
        current_page,
        total_pages,
        prev_page: (current_page > 1).then(|| current_page - 1),
        next_page: (current_page < total_pages).then(|| current_page + 1),
        error,
    })
}
