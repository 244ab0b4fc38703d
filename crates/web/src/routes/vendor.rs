//! Vendor section handlers: dashboard, product management, store profile.
//!
//! Product management is gated on the store's approval status; pending and
//! rejected stores see the gate notice instead of the management UI.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;

use vendora_client::{
    CatalogApi, ProductInput, ProductSummary, VendorApi, VendorProfile, VendorProfileUpdate,
};
use vendora_core::{CategoryId, ProductId};

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::routes::{MessageQuery, flash_redirect};
use crate::services::auth;
use crate::state::AppState;

const PRODUCTS_PAGE_SIZE: u32 = 8;

// =============================================================================
// View Types
// =============================================================================

/// Approval gate shown on management pages.
pub struct ApprovalGate {
    pub approved: bool,
    pub status: String,
    pub rejection_reason: Option<String>,
}

impl ApprovalGate {
    fn from_profile(profile: &VendorProfile) -> Self {
        Self {
            approved: profile.approval_status.can_manage_products(),
            status: profile.approval_status.to_string(),
            rejection_reason: profile.rejection_reason.clone(),
        }
    }

    /// Gate for when the profile itself could not be fetched: keep the
    /// management UI disabled.
    fn unavailable() -> Self {
        Self {
            approved: false,
            status: "Unknown".to_owned(),
            rejection_reason: None,
        }
    }
}

/// Product row in the vendor's management table.
pub struct VendorProductRow {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub inventory: i64,
    pub category: Option<String>,
}

impl VendorProductRow {
    fn from_summary(product: &ProductSummary) -> Self {
        Self {
            id: product.id.as_i64(),
            name: product.name.clone(),
            price: filters::rupees(product.price),
            inventory: product.inventory,
            category: product.category.as_ref().map(|c| c.name.clone()),
        }
    }
}

/// Dashboard display data.
pub struct DashboardView {
    pub store_name: String,
    pub gate: ApprovalGate,
    pub product_count: u32,
    pub order_count: u32,
    pub total_revenue: String,
    pub monthly_revenue: String,
    pub previous_month_revenue: String,
    pub recent_products: Vec<VendorProductRow>,
    pub recent_orders: Vec<RecentOrderView>,
}

/// Recent order row on the dashboard.
pub struct RecentOrderView {
    pub order_number: String,
    pub status: String,
    pub total: String,
    pub item_count: u32,
}

// =============================================================================
// Form Types
// =============================================================================

/// Product create/update form. Numeric fields arrive as raw strings so a
/// blank select or typo becomes a field error, not a rejected request.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    #[serde(default)]
    pub original_price: String,
    #[serde(default)]
    pub category_id: String,
    pub inventory: String,
    #[serde(default)]
    pub image_url: String,
}

/// Per-field validation errors for the product form.
#[derive(Debug, Default)]
pub struct ProductFormErrors {
    pub name: Option<&'static str>,
    pub description: Option<&'static str>,
    pub price: Option<&'static str>,
    pub category: Option<&'static str>,
    pub inventory: Option<&'static str>,
}

impl ProductFormErrors {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.inventory.is_none()
    }
}

/// Validate the form; on success return the backend payload.
fn validate_product_form(form: &ProductForm) -> Result<ProductInput, ProductFormErrors> {
    let mut errors = ProductFormErrors::default();

    if form.name.trim().is_empty() {
        errors.name = Some("Name is required");
    }
    if form.description.trim().is_empty() {
        errors.description = Some("Description is required");
    }

    let price = form.price.trim().parse::<Decimal>().ok();
    if !price.is_some_and(|p| p > Decimal::ZERO) {
        errors.price = Some("Price must be a positive number");
    }

    let original_price = if form.original_price.trim().is_empty() {
        None
    } else {
        match form.original_price.trim().parse::<Decimal>() {
            Ok(p) if p > Decimal::ZERO => Some(p),
            _ => {
                errors.price = Some("Original price must be a positive number");
                None
            }
        }
    };

    let category_id = form.category_id.trim().parse::<i64>().ok();
    if category_id.is_none() {
        errors.category = Some("Category is required");
    }

    let inventory = form.inventory.trim().parse::<i64>().ok();
    if !inventory.is_some_and(|i| i >= 0) {
        errors.inventory = Some("Inventory must be zero or more");
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ProductInput {
        name: form.name.trim().to_owned(),
        description: form.description.trim().to_owned(),
        price: price.unwrap_or_default(),
        original_price,
        category_id: CategoryId::new(category_id.unwrap_or_default()),
        subcategory_id: None,
        inventory: inventory.unwrap_or_default(),
        images: (!form.image_url.trim().is_empty())
            .then(|| vec![form.image_url.trim().to_owned()])
            .unwrap_or_default(),
    })
}

/// Store profile form.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileForm {
    pub store_name: String,
    pub store_description: String,
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Vendor dashboard template. `dashboard` is `None` when the aggregate
/// fetch failed; the template then shows a retry affordance.
#[derive(Template, WebTemplate)]
#[template(path = "vendor/dashboard.html")]
pub struct VendorDashboardTemplate {
    pub dashboard: Option<DashboardView>,
}

/// Vendor products page template.
#[derive(Template, WebTemplate)]
#[template(path = "vendor/products.html")]
pub struct VendorProductsTemplate {
    pub gate: ApprovalGate,
    pub products: Vec<VendorProductRow>,
    pub current_page: u32,
    pub total_pages: u32,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Category choice in the product form. The id is kept as a string to
/// compare against the raw form value when re-rendering.
pub struct CategoryChoice {
    pub id: String,
    pub name: String,
}

/// Product add/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "vendor/product_form.html")]
pub struct ProductFormTemplate {
    /// Form action URL; distinguishes create from update.
    pub action: String,
    pub heading: String,
    pub form: ProductForm,
    pub errors: ProductFormErrors,
    pub categories: Vec<CategoryChoice>,
    pub error: Option<String>,
}

/// Store profile template.
#[derive(Template, WebTemplate)]
#[template(path = "vendor/profile.html")]
pub struct VendorProfileTemplate {
    pub form: ProfileForm,
    pub gate: ApprovalGate,
    pub rating: f64,
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

/// Display the vendor dashboard.
///
/// The aggregate comes from the auth service, which returns `None` on any
/// failure; the page then renders the retry affordance instead of data.
pub async fn dashboard(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let dashboard = auth::vendor_dashboard(state.api(), &session)
        .await
        .map(|d| DashboardView {
            store_name: d.vendor_profile.store_name.clone(),
            gate: ApprovalGate::from_profile(&d.vendor_profile),
            product_count: d.product_count,
            order_count: d.order_count,
            total_revenue: filters::rupees(d.total_revenue),
            monthly_revenue: filters::rupees(d.monthly_revenue),
            previous_month_revenue: filters::rupees(d.previous_month_revenue),
            recent_products: d
                .recent_products
                .iter()
                .map(|p| VendorProductRow {
                    id: p.id.as_i64(),
                    name: p.name.clone(),
                    price: filters::rupees(p.price),
                    inventory: p.inventory,
                    category: p.category.as_ref().map(|c| c.name.clone()),
                })
                .collect(),
            recent_orders: d
                .recent_orders
                .iter()
                .map(|o| RecentOrderView {
                    order_number: o.order_number.clone(),
                    status: o.status.to_string(),
                    total: filters::rupees(o.total),
                    item_count: o.item_count,
                })
                .collect(),
        });

    VendorDashboardTemplate { dashboard }
}

/// Display the vendor's products with the approval gate.
pub async fn products(
    State(state): State<AppState>,
    auth: RequireAuth,
    Query(page_query): Query<PageQuery>,
    Query(message): Query<MessageQuery>,
) -> VendorProductsTemplate {
    let current_page = page_query.page.unwrap_or(1).max(1);

    let gate = match state.api().vendor_profile(&auth.token).await {
        Ok(profile) => ApprovalGate::from_profile(&profile),
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch vendor profile");
            ApprovalGate::unavailable()
        }
    };

    if !gate.approved {
        return VendorProductsTemplate {
            gate,
            products: Vec::new(),
            current_page: 1,
            total_pages: 0,
            prev_page: None,
            next_page: None,
            error: message.error,
            success: message.success,
        };
    }

    match state
        .api()
        .vendor_products(&auth.token, current_page - 1, PRODUCTS_PAGE_SIZE)
        .await
    {
        Ok(page) => VendorProductsTemplate {
            gate,
            products: page.content.iter().map(VendorProductRow::from_summary).collect(),
            current_page,
            total_pages: page.total_pages,
            prev_page: (current_page > 1).then(|| current_page - 1),
            next_page: (current_page < page.total_pages).then(|| current_page + 1),
            error: message.error,
            success: message.success,
        },
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch vendor products");
            VendorProductsTemplate {
                gate,
                products: Vec::new(),
                current_page,
                total_pages: 0,
                prev_page: None,
                next_page: None,
                error: Some("Could not load your products. Please try again.".to_owned()),
                success: None,
            }
        }
    }
}

/// Fetch category choices for the product form; failures degrade to an
/// empty list with an inline message.
async fn category_choices(state: &AppState) -> (Vec<CategoryChoice>, Option<String>) {
    match state.api().categories().await {
        Ok(categories) => (
            categories
                .into_iter()
                .map(|c| CategoryChoice {
                    id: c.id.to_string(),
                    name: c.name,
                })
                .collect(),
            None,
        ),
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch categories for product form");
            (
                Vec::new(),
                Some("Could not load categories; try reloading the form.".to_owned()),
            )
        }
    }
}

/// Display the add-product form.
pub async fn add_product_form(
    State(state): State<AppState>,
    _auth: RequireAuth,
) -> ProductFormTemplate {
    let (categories, error) = category_choices(&state).await;
    ProductFormTemplate {
        action: "/vendor/products".to_owned(),
        heading: "Add Product".to_owned(),
        form: ProductForm::default(),
        errors: ProductFormErrors::default(),
        categories,
        error,
    }
}

/// Handle product creation.
pub async fn create_product(
    State(state): State<AppState>,
    auth: RequireAuth,
    Form(form): Form<ProductForm>,
) -> Response {
    let input = match validate_product_form(&form) {
        Ok(input) => input,
        Err(errors) => {
            // Validation failures re-render the form with no backend call
            let (categories, error) = category_choices(&state).await;
            return ProductFormTemplate {
                action: "/vendor/products".to_owned(),
                heading: "Add Product".to_owned(),
                form,
                errors,
                categories,
                error,
            }
            .into_response();
        }
    };

    match state.api().add_vendor_product(&auth.token, &input).await {
        Ok(_) => {
            flash_redirect("/vendor/products", "success", "Product added").into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "product creation failed");
            let (categories, _) = category_choices(&state).await;
            ProductFormTemplate {
                action: "/vendor/products".to_owned(),
                heading: "Add Product".to_owned(),
                form,
                errors: ProductFormErrors::default(),
                categories,
                error: Some(e.to_string()),
            }
            .into_response()
        }
    }
}

/// Display the edit-product form, prefilled from the backend.
pub async fn edit_product_form(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Path(id): Path<i64>,
) -> Result<ProductFormTemplate, AppError> {
    let product = state
        .api()
        .product(ProductId::new(id))
        .await
        .map_err(|e| match e {
            vendora_client::ApiError::NotFound(_) => AppError::NotFound(format!("product {id}")),
            other => AppError::Api(other),
        })?;

    let (categories, error) = category_choices(&state).await;
    let summary = &product.summary;

    Ok(ProductFormTemplate {
        action: format!("/vendor/products/{id}"),
        heading: "Edit Product".to_owned(),
        form: ProductForm {
            name: summary.name.clone(),
            description: summary.description.clone().unwrap_or_default(),
            price: summary.price.to_string(),
            original_price: summary
                .original_price
                .map(|p| p.to_string())
                .unwrap_or_default(),
            category_id: summary
                .category
                .as_ref()
                .map(|c| c.id.to_string())
                .unwrap_or_default(),
            inventory: summary.inventory.to_string(),
            image_url: summary.primary_image().map(str::to_owned).unwrap_or_default(),
        },
        errors: ProductFormErrors::default(),
        categories,
        error,
    })
}

/// Handle product update.
pub async fn update_product(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i64>,
    Form(form): Form<ProductForm>,
) -> Response {
    let input = match validate_product_form(&form) {
        Ok(input) => input,
        Err(errors) => {
            let (categories, error) = category_choices(&state).await;
            return ProductFormTemplate {
                action: format!("/vendor/products/{id}"),
                heading: "Edit Product".to_owned(),
                form,
                errors,
                categories,
                error,
            }
            .into_response();
        }
    };

    match state
        .api()
        .update_vendor_product(&auth.token, ProductId::new(id), &input)
        .await
    {
        Ok(_) => {
            flash_redirect("/vendor/products", "success", "Product updated").into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "product update failed");
            flash_redirect("/vendor/products", "error", &e.to_string()).into_response()
        }
    }
}

/// Handle product deletion.
pub async fn delete_product(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i64>,
) -> Response {
    match state
        .api()
        .delete_vendor_product(&auth.token, ProductId::new(id))
        .await
    {
        Ok(status) => {
            flash_redirect("/vendor/products", "success", &status.message).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "product deletion failed");
            flash_redirect("/vendor/products", "error", &e.to_string()).into_response()
        }
    }
}

/// Display the store profile form.
pub async fn profile(
    State(state): State<AppState>,
    auth: RequireAuth,
    Query(message): Query<MessageQuery>,
) -> VendorProfileTemplate {
    match state.api().vendor_profile(&auth.token).await {
        Ok(profile) => VendorProfileTemplate {
            form: ProfileForm {
                store_name: profile.store_name.clone(),
                store_description: profile.store_description.clone().unwrap_or_default(),
                specialty: profile.specialty.clone().unwrap_or_default(),
                contact_email: profile.contact_email.clone().unwrap_or_default(),
                contact_phone: profile.contact_phone.clone().unwrap_or_default(),
            },
            rating: profile.rating,
            gate: ApprovalGate::from_profile(&profile),
            error: message.error,
            success: message.success,
        },
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch vendor profile");
            VendorProfileTemplate {
                form: ProfileForm::default(),
                gate: ApprovalGate::unavailable(),
                rating: 0.0,
                error: Some("Could not load your store profile. Please try again.".to_owned()),
                success: None,
            }
        }
    }
}

/// Handle store profile update.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: RequireAuth,
    Form(form): Form<ProfileForm>,
) -> Response {
    if form.store_name.trim().is_empty() || form.store_description.trim().is_empty() {
        return flash_redirect(
            "/vendor/profile",
            "error",
            "Store name and description are required",
        )
        .into_response();
    }

    let update = VendorProfileUpdate {
        store_name: form.store_name.trim().to_owned(),
        store_description: form.store_description.trim().to_owned(),
        specialty: (!form.specialty.trim().is_empty()).then(|| form.specialty.trim().to_owned()),
        contact_email: (!form.contact_email.trim().is_empty())
            .then(|| form.contact_email.trim().to_owned()),
        contact_phone: (!form.contact_phone.trim().is_empty())
            .then(|| form.contact_phone.trim().to_owned()),
    };

    match state.api().update_vendor_profile(&auth.token, &update).await {
        Ok(_) => flash_redirect("/vendor/profile", "success", "Store profile updated")
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "profile update failed");
            flash_redirect("/vendor/profile", "error", &e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ProductForm {
        ProductForm {
            name: "Widget".to_owned(),
            description: "A fine widget".to_owned(),
            price: "1999".to_owned(),
            original_price: String::new(),
            category_id: "1".to_owned(),
            inventory: "10".to_owned(),
            image_url: String::new(),
        }
    }

    #[test]
    fn test_valid_form_builds_payload() {
        let input = validate_product_form(&valid_form()).expect("valid");
        assert_eq!(input.name, "Widget");
        assert_eq!(input.inventory, 10);
        assert!(input.original_price.is_none());
    }

    #[test]
    fn test_missing_fields_are_reported_per_field() {
        let mut form = valid_form();
        form.name = "  ".to_owned();
        form.description = String::new();
        form.price = "free".to_owned();
        form.category_id = String::new();
        let errors = validate_product_form(&form).expect_err("invalid");
        assert_eq!(errors.name, Some("Name is required"));
        assert_eq!(errors.description, Some("Description is required"));
        assert!(errors.price.is_some());
        assert!(errors.category.is_some());
    }

    #[test]
    fn test_negative_inventory_rejected() {
        let mut form = valid_form();
        form.inventory = "-3".to_owned();
        let errors = validate_product_form(&form).expect_err("invalid");
        assert!(errors.inventory.is_some());
    }
}
