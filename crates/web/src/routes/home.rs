//! Home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use vendora_client::CatalogApi;

use crate::filters;
use crate::routes::categories::CategoryCardView;
use crate::routes::products::ProductCardView;
use crate::state::AppState;

/// Home page template: hero, featured categories, trending products.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub featured: Vec<CategoryCardView>,
    pub trending: Vec<ProductCardView>,
    pub error: Option<String>,
}

/// Display the home page.
///
/// Either fetch failing degrades to an inline message; the page itself
/// always renders.
pub async fn home(State(state): State<AppState>) -> HomeTemplate {
    let featured = state.api().featured_categories().await;
    let trending = state.api().trending_products().await;

    let error = if featured.is_err() || trending.is_err() {
        Some("Some content could not be loaded. Please try again.".to_owned())
    } else {
        None
    };

    if let Err(e) = &featured {
        tracing::warn!(error = %e, "failed to fetch featured categories");
    }
    if let Err(e) = &trending {
        tracing::warn!(error = %e, "failed to fetch trending products");
    }

    HomeTemplate {
        featured: featured
            .unwrap_or_default()
            .iter()
            .map(CategoryCardView::from_category)
            .collect(),
        trending: trending
            .unwrap_or_default()
            .iter()
            .map(ProductCardView::from_summary)
            .collect(),
        error,
    }
}
