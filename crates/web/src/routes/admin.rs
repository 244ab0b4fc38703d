//! Admin section handlers: dashboard, vendor approval, category management.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use vendora_client::{AdminApi, Category, CategoryInput, SubcategoryInput, VendorProfile};
use vendora_core::{ApprovalStatus, CategoryId, SubcategoryId, VendorId, slug::slugify};

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::routes::{MessageQuery, flash_redirect};
use crate::state::AppState;

const VENDORS_PAGE_SIZE: u32 = 10;

// =============================================================================
// View Types
// =============================================================================

/// Vendor row in the approval queue.
pub struct VendorRowView {
    pub id: i64,
    pub store_name: String,
    pub specialty: Option<String>,
    pub status: String,
    pub pending: bool,
    pub rating: f64,
    pub product_count: u32,
}

impl VendorRowView {
    fn from_profile(profile: &VendorProfile) -> Self {
        Self {
            id: profile.id.as_i64(),
            store_name: profile.store_name.clone(),
            specialty: profile.specialty.clone(),
            status: profile.approval_status.to_string(),
            pending: profile.approval_status == ApprovalStatus::Pending,
            rating: profile.rating,
            product_count: profile.product_count,
        }
    }
}

/// Full vendor display data for the detail page.
pub struct VendorDetailView {
    pub id: i64,
    pub store_name: String,
    pub store_description: Option<String>,
    pub store_address: Option<String>,
    pub specialty: Option<String>,
    pub status: String,
    pub pending: bool,
    pub rejected: bool,
    pub rejection_reason: Option<String>,
    pub rating: f64,
    pub product_count: u32,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

impl VendorDetailView {
    fn from_profile(profile: &VendorProfile) -> Self {
        Self {
            id: profile.id.as_i64(),
            store_name: profile.store_name.clone(),
            store_description: profile.store_description.clone(),
            store_address: profile.store_address.as_ref().map(|a| {
                format!(
                    "{}, {}, {} {}, {}",
                    a.street, a.city, a.state, a.zip_code, a.country
                )
            }),
            specialty: profile.specialty.clone(),
            status: profile.approval_status.to_string(),
            pending: profile.approval_status == ApprovalStatus::Pending,
            rejected: profile.approval_status == ApprovalStatus::Rejected,
            rejection_reason: profile.rejection_reason.clone(),
            rating: profile.rating,
            product_count: profile.product_count,
            contact_email: profile.contact_email.clone(),
            contact_phone: profile.contact_phone.clone(),
        }
    }
}

/// Category row in the management table.
pub struct CategoryRowView {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub featured: bool,
    pub product_count: u32,
    pub subcategories: Vec<SubcategoryRowView>,
}

/// Subcategory row nested under a category.
pub struct SubcategoryRowView {
    pub id: i64,
    pub name: String,
}

impl CategoryRowView {
    fn from_category(category: &Category) -> Self {
        Self {
            id: category.id.as_i64(),
            name: category.name.clone(),
            slug: category.slug.clone(),
            featured: category.featured,
            product_count: category.product_count,
            subcategories: category
                .subcategories
                .iter()
                .map(|s| SubcategoryRowView {
                    id: s.id.as_i64(),
                    name: s.name.clone(),
                })
                .collect(),
        }
    }
}

// =============================================================================
// Form Types
// =============================================================================

/// Vendor rejection form.
#[derive(Debug, Deserialize)]
pub struct RejectForm {
    #[serde(default)]
    pub reason: String,
}

/// Category create/update form.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub featured: Option<String>,
}

/// Per-field validation errors for the category form.
#[derive(Debug, Default)]
pub struct CategoryFormErrors {
    pub name: Option<&'static str>,
    pub description: Option<&'static str>,
}

impl CategoryFormErrors {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

/// Validate the category form; on success return the backend payload.
/// The slug is derived from the name when left blank.
fn validate_category_form(form: &CategoryForm) -> Result<CategoryInput, CategoryFormErrors> {
    let mut errors = CategoryFormErrors::default();

    if form.name.trim().is_empty() {
        errors.name = Some("Name is required");
    }
    if form.description.trim().is_empty() {
        errors.description = Some("Description is required");
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    let slug = if form.slug.trim().is_empty() {
        slugify(form.name.trim())
    } else {
        slugify(form.slug.trim())
    };

    Ok(CategoryInput {
        name: form.name.trim().to_owned(),
        slug,
        description: form.description.trim().to_owned(),
        image: (!form.image.trim().is_empty()).then(|| form.image.trim().to_owned()),
        featured: form.featured.is_some(),
    })
}

/// Subcategory add form.
#[derive(Debug, Deserialize)]
pub struct SubcategoryForm {
    #[serde(default)]
    pub name: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Admin dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct AdminDashboardTemplate {
    pub total_vendors: u32,
    pub pending_vendors: u32,
    pub total_customers: u64,
    pub total_products: u64,
    pub total_orders: u64,
    pub total_revenue: Option<String>,
    pub pending_preview: Vec<VendorRowView>,
    pub error: Option<String>,
}

/// Vendor approval queue template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/vendors.html")]
pub struct AdminVendorsTemplate {
    pub vendors: Vec<VendorRowView>,
    pub status: String,
    pub current_page: u32,
    pub total_pages: u32,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Vendor detail template with approve/reject forms.
#[derive(Template, WebTemplate)]
#[template(path = "admin/vendor_detail.html")]
pub struct AdminVendorDetailTemplate {
    pub vendor: VendorDetailView,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Category management template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/categories.html")]
pub struct AdminCategoriesTemplate {
    pub categories: Vec<CategoryRowView>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Category create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/category_form.html")]
pub struct CategoryFormTemplate {
    /// Form action URL; distinguishes create from update.
    pub action: String,
    pub heading: String,
    pub form: CategoryForm,
    pub errors: CategoryFormErrors,
    pub error: Option<String>,
}

/// Vendor queue query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct VendorsQuery {
    pub page: Option<u32>,
    pub status: Option<String>,
}

// =============================================================================
// Dashboard
// =============================================================================

/// Display the admin dashboard.
pub async fn dashboard(State(state): State<AppState>, auth: RequireAuth) -> impl IntoResponse {
    let stats = state.api().admin_dashboard(&auth.token).await;
    let pending = state.api().admin_vendors(&auth.token, 0, 5).await;

    let error = if stats.is_err() || pending.is_err() {
        Some("Some dashboard data could not be loaded.".to_owned())
    } else {
        None
    };
    if let Err(e) = &stats {
        tracing::warn!(error = %e, "failed to fetch admin dashboard");
    }

    let stats = stats.ok();
    AdminDashboardTemplate {
        total_vendors: stats.as_ref().map_or(0, |s| s.total_vendors),
        pending_vendors: stats.as_ref().map_or(0, |s| s.pending_vendors),
        total_customers: stats.as_ref().map_or(0, |s| s.total_customers),
        total_products: stats.as_ref().map_or(0, |s| s.total_products),
        total_orders: stats.as_ref().map_or(0, |s| s.total_orders),
        total_revenue: stats
            .as_ref()
            .and_then(|s| s.total_revenue)
            .map(filters::rupees),
        pending_preview: pending
            .map(|page| {
                page.content
                    .iter()
                    .filter(|v| v.approval_status == ApprovalStatus::Pending)
                    .map(VendorRowView::from_profile)
                    .collect()
            })
            .unwrap_or_default(),
        error,
    }
}

// =============================================================================
// Vendor Approval
// =============================================================================

/// Display the vendor approval queue.
///
/// The status filter is applied client-side to the fetched page snapshot.
pub async fn vendors(
    State(state): State<AppState>,
    auth: RequireAuth,
    Query(query): Query<VendorsQuery>,
    Query(message): Query<MessageQuery>,
) -> AdminVendorsTemplate {
    let current_page = query.page.unwrap_or(1).max(1);
    let status = query.status.clone().unwrap_or_default();

    match state
        .api()
        .admin_vendors(&auth.token, current_page - 1, VENDORS_PAGE_SIZE)
        .await
    {
        Ok(page) => {
            let vendors = page
                .content
                .iter()
                .filter(|v| match status.as_str() {
                    "PENDING" => v.approval_status == ApprovalStatus::Pending,
                    "APPROVED" => v.approval_status == ApprovalStatus::Approved,
                    "REJECTED" => v.approval_status == ApprovalStatus::Rejected,
                    _ => true,
                })
                .map(VendorRowView::from_profile)
                .collect();

            AdminVendorsTemplate {
                vendors,
                status,
                current_page,
                total_pages: page.total_pages,
                prev_page: (current_page > 1).then(|| current_page - 1),
                next_page: (current_page < page.total_pages).then(|| current_page + 1),
                error: message.error,
                success: message.success,
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch vendors");
            AdminVendorsTemplate {
                vendors: Vec::new(),
                status,
                current_page,
                total_pages: 0,
                prev_page: None,
                next_page: None,
                error: Some("Could not load vendors. Please try again.".to_owned()),
                success: None,
            }
        }
    }
}

/// Display one vendor with approval actions.
pub async fn vendor_detail(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i64>,
    Query(message): Query<MessageQuery>,
) -> Result<AdminVendorDetailTemplate, AppError> {
    let vendor = state
        .api()
        .admin_vendor(&auth.token, VendorId::new(id))
        .await
        .map_err(|e| match e {
            vendora_client::ApiError::NotFound(_) => AppError::NotFound(format!("vendor {id}")),
            other => AppError::Api(other),
        })?;

    Ok(AdminVendorDetailTemplate {
        vendor: VendorDetailView::from_profile(&vendor),
        error: message.error,
        success: message.success,
    })
}

/// Approve a vendor application.
pub async fn approve_vendor(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i64>,
) -> Response {
    let page = format!("/admin/vendors/{id}");
    match state.api().approve_vendor(&auth.token, VendorId::new(id)).await {
        Ok(status) => flash_redirect(&page, "success", &status.message).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "vendor approval failed");
            flash_redirect(&page, "error", &e.to_string()).into_response()
        }
    }
}

/// Reject a vendor application. The reason is mandatory and checked before
/// any network call.
pub async fn reject_vendor(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i64>,
    Form(form): Form<RejectForm>,
) -> Response {
    let page = format!("/admin/vendors/{id}");
    let reason = form.reason.trim();
    if reason.is_empty() {
        return flash_redirect(&page, "error", "Rejection reason is required").into_response();
    }

    match state
        .api()
        .reject_vendor(&auth.token, VendorId::new(id), reason)
        .await
    {
        Ok(status) => flash_redirect(&page, "success", &status.message).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "vendor rejection failed");
            flash_redirect(&page, "error", &e.to_string()).into_response()
        }
    }
}

// =============================================================================
// Category Management
// =============================================================================

/// Display the category management table.
pub async fn categories(
    State(state): State<AppState>,
    auth: RequireAuth,
    Query(message): Query<MessageQuery>,
) -> AdminCategoriesTemplate {
    match state.api().admin_categories(&auth.token).await {
        Ok(categories) => AdminCategoriesTemplate {
            categories: categories.iter().map(CategoryRowView::from_category).collect(),
            error: message.error,
            success: message.success,
        },
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch admin categories");
            AdminCategoriesTemplate {
                categories: Vec::new(),
                error: Some("Could not load categories. Please try again.".to_owned()),
                success: None,
            }
        }
    }
}

/// Display the new-category form.
pub async fn new_category_form(_auth: RequireAuth) -> CategoryFormTemplate {
    CategoryFormTemplate {
        action: "/admin/categories".to_owned(),
        heading: "New Category".to_owned(),
        form: CategoryForm::default(),
        errors: CategoryFormErrors::default(),
        error: None,
    }
}

/// Handle category creation.
///
/// Validation failures re-render the form inline and issue no network
/// request at all.
pub async fn create_category(
    State(state): State<AppState>,
    auth: RequireAuth,
    Form(form): Form<CategoryForm>,
) -> Response {
    let input = match validate_category_form(&form) {
        Ok(input) => input,
        Err(errors) => {
            return CategoryFormTemplate {
                action: "/admin/categories".to_owned(),
                heading: "New Category".to_owned(),
                form,
                errors,
                error: None,
            }
            .into_response();
        }
    };

    match state.api().create_category(&auth.token, &input).await {
        Ok(category) => flash_redirect(
            "/admin/categories",
            "success",
            &format!("Category \"{}\" created", category.name),
        )
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "category creation failed");
            CategoryFormTemplate {
                action: "/admin/categories".to_owned(),
                heading: "New Category".to_owned(),
                form,
                errors: CategoryFormErrors::default(),
                error: Some(e.to_string()),
            }
            .into_response()
        }
    }
}

/// Display the edit-category form, prefilled from the backend.
pub async fn edit_category_form(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i64>,
) -> Result<CategoryFormTemplate, AppError> {
    // The admin list endpoint carries full records; find the one to edit
    let category = state
        .api()
        .admin_categories(&auth.token)
        .await?
        .into_iter()
        .find(|c| c.id.as_i64() == id)
        .ok_or_else(|| AppError::NotFound(format!("category {id}")))?;

    Ok(CategoryFormTemplate {
        action: format!("/admin/categories/{id}"),
        heading: "Edit Category".to_owned(),
        form: CategoryForm {
            name: category.name,
            description: category.description.unwrap_or_default(),
            slug: category.slug,
            image: category.image.unwrap_or_default(),
            featured: category.featured.then(|| "on".to_owned()),
        },
        errors: CategoryFormErrors::default(),
        error: None,
    })
}

/// Handle category update.
pub async fn update_category(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i64>,
    Form(form): Form<CategoryForm>,
) -> Response {
    let input = match validate_category_form(&form) {
        Ok(input) => input,
        Err(errors) => {
            return CategoryFormTemplate {
                action: format!("/admin/categories/{id}"),
                heading: "Edit Category".to_owned(),
                form,
                errors,
                error: None,
            }
            .into_response();
        }
    };

    match state
        .api()
        .update_category(&auth.token, CategoryId::new(id), &input)
        .await
    {
        Ok(_) => {
            flash_redirect("/admin/categories", "success", "Category updated").into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "category update failed");
            flash_redirect("/admin/categories", "error", &e.to_string()).into_response()
        }
    }
}

/// Handle category deletion.
pub async fn delete_category(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i64>,
) -> Response {
    match state
        .api()
        .delete_category(&auth.token, CategoryId::new(id))
        .await
    {
        Ok(status) => {
            flash_redirect("/admin/categories", "success", &status.message).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "category deletion failed");
            flash_redirect("/admin/categories", "error", &e.to_string()).into_response()
        }
    }
}

/// Add a subcategory to a category.
pub async fn add_subcategory(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<i64>,
    Form(form): Form<SubcategoryForm>,
) -> Response {
    let name = form.name.trim();
    if name.is_empty() {
        return flash_redirect("/admin/categories", "error", "Subcategory name is required")
            .into_response();
    }

    let input = SubcategoryInput {
        name: name.to_owned(),
        slug: slugify(name),
    };

    match state
        .api()
        .add_subcategory(&auth.token, CategoryId::new(id), &input)
        .await
    {
        Ok(_) => {
            flash_redirect("/admin/categories", "success", "Subcategory added").into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "subcategory creation failed");
            flash_redirect("/admin/categories", "error", &e.to_string()).into_response()
        }
    }
}

/// Remove a subcategory.
pub async fn delete_subcategory(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path((id, sid)): Path<(i64, i64)>,
) -> Response {
    match state
        .api()
        .delete_subcategory(
            &auth.token,
            CategoryId::new(id),
            SubcategoryId::new(sid),
        )
        .await
    {
        Ok(status) => {
            flash_redirect("/admin/categories", "success", &status.message).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "subcategory deletion failed");
            flash_redirect("/admin/categories", "error", &e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_description_is_rejected_before_any_call() {
        let form = CategoryForm {
            name: "Toys".to_owned(),
            description: String::new(),
            ..CategoryForm::default()
        };
        let errors = validate_category_form(&form).expect_err("invalid");
        assert_eq!(errors.description, Some("Description is required"));
        assert!(errors.name.is_none());
    }

    #[test]
    fn test_slug_derived_from_name_when_blank() {
        let form = CategoryForm {
            name: "Men's & Boys' Wear!".to_owned(),
            description: "Apparel".to_owned(),
            ..CategoryForm::default()
        };
        let input = validate_category_form(&form).expect("valid");
        assert_eq!(input.slug, "mens-boys-wear");
    }

    #[test]
    fn test_explicit_slug_is_normalized() {
        let form = CategoryForm {
            name: "Toys".to_owned(),
            description: "Playthings".to_owned(),
            slug: "Cool Toys!".to_owned(),
            ..CategoryForm::default()
        };
        let input = validate_category_form(&form).expect("valid");
        assert_eq!(input.slug, "cool-toys");
    }
}
