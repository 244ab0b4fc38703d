//! Domain API traits, one per backend resource.
//!
//! Each trait is a flat set of operations mapping one-to-one onto backend
//! endpoints; no business logic lives here beyond parameter translation.
//! [`MarketplaceApi`] bundles them so application state can hold a single
//! `Arc<dyn MarketplaceApi>` and swap the real client for fixtures at
//! composition time.

use async_trait::async_trait;

use vendora_core::{CartItemId, CategoryId, OrderId, Page, ProductId, ReviewId, SubcategoryId, VendorId};

use crate::error::ApiError;
use crate::types::{
    AdminDashboard, AuthResponse, BearerToken, Cart, Category, CategoryInput, LoginRequest,
    NewReview, Order, OrderSummary, PlaceOrderRequest, Product, ProductInput, ProductQuery,
    ProductSummary, RegisterRequest, RegisterResponse, Review, StatusMessage, SubcategoryInput,
    VendorDashboard, VendorProfile, VendorProfileUpdate, WishlistItem,
};

/// Result alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Auth
// =============================================================================

/// `/auth/*` operations.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/login`
    async fn login(&self, credentials: &LoginRequest) -> ApiResult<AuthResponse>;

    /// `POST /auth/register`
    async fn register(&self, payload: &RegisterRequest) -> ApiResult<RegisterResponse>;

    /// `POST /auth/forgot-password`
    async fn forgot_password(&self, email: &str) -> ApiResult<StatusMessage>;
}

// =============================================================================
// Catalog
// =============================================================================

/// Category, product, and review reads plus review submission.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /categories`
    async fn categories(&self) -> ApiResult<Vec<Category>>;

    /// `GET /categories/featured`
    async fn featured_categories(&self) -> ApiResult<Vec<Category>>;

    /// `GET /categories/{idOrSlug}`
    async fn category(&self, id_or_slug: &str) -> ApiResult<Category>;

    /// `GET /categories/{id}/products`
    async fn products_by_category(
        &self,
        category_id: CategoryId,
        query: &ProductQuery,
    ) -> ApiResult<Page<ProductSummary>>;

    /// `GET /products`
    async fn products(&self, query: &ProductQuery) -> ApiResult<Page<ProductSummary>>;

    /// `GET /products/{id}`
    async fn product(&self, id: ProductId) -> ApiResult<Product>;

    /// `GET /products/trending`
    async fn trending_products(&self) -> ApiResult<Vec<ProductSummary>>;

    /// `GET /products/{id}/reviews`
    async fn product_reviews(&self, id: ProductId) -> ApiResult<Vec<Review>>;

    /// `POST /products/{id}/reviews`
    async fn submit_review(
        &self,
        token: &BearerToken,
        id: ProductId,
        review: &NewReview,
    ) -> ApiResult<Review>;

    /// `POST /reviews/{id}/helpful`
    async fn mark_review_helpful(
        &self,
        token: &BearerToken,
        id: ReviewId,
    ) -> ApiResult<StatusMessage>;
}

// =============================================================================
// Cart & wishlist
// =============================================================================

/// `/cart` and `/users/wishlist` operations. All authenticated.
#[async_trait]
pub trait CartApi: Send + Sync {
    /// `GET /cart`
    async fn cart(&self, token: &BearerToken) -> ApiResult<Cart>;

    /// `POST /cart/items`
    async fn add_cart_item(
        &self,
        token: &BearerToken,
        product_id: ProductId,
        quantity: u32,
    ) -> ApiResult<StatusMessage>;

    /// `PUT /cart/items/{id}`
    async fn update_cart_item(
        &self,
        token: &BearerToken,
        item_id: CartItemId,
        quantity: u32,
    ) -> ApiResult<StatusMessage>;

    /// `DELETE /cart/items/{id}`
    async fn remove_cart_item(
        &self,
        token: &BearerToken,
        item_id: CartItemId,
    ) -> ApiResult<StatusMessage>;

    /// `DELETE /cart`
    async fn clear_cart(&self, token: &BearerToken) -> ApiResult<StatusMessage>;

    /// `GET /users/wishlist`
    async fn wishlist(&self, token: &BearerToken) -> ApiResult<Vec<WishlistItem>>;

    /// `POST /users/wishlist`
    async fn add_to_wishlist(
        &self,
        token: &BearerToken,
        product_id: ProductId,
    ) -> ApiResult<StatusMessage>;

    /// `DELETE /users/wishlist/{productId}`
    async fn remove_from_wishlist(
        &self,
        token: &BearerToken,
        product_id: ProductId,
    ) -> ApiResult<StatusMessage>;
}

// =============================================================================
// Orders
// =============================================================================

/// `/orders` operations. All authenticated.
#[async_trait]
pub trait OrdersApi: Send + Sync {
    /// `GET /orders?page=&size=`
    async fn orders(
        &self,
        token: &BearerToken,
        page: u32,
        size: u32,
    ) -> ApiResult<Page<OrderSummary>>;

    /// `GET /orders/{id}`
    async fn order(&self, token: &BearerToken, id: OrderId) -> ApiResult<Order>;

    /// `POST /orders`
    async fn place_order(
        &self,
        token: &BearerToken,
        request: &PlaceOrderRequest,
    ) -> ApiResult<Order>;

    /// `POST /orders/{id}/cancel`
    async fn cancel_order(&self, token: &BearerToken, id: OrderId) -> ApiResult<StatusMessage>;
}

// =============================================================================
// Vendor
// =============================================================================

/// `/vendors/*` operations for the logged-in vendor. All authenticated.
#[async_trait]
pub trait VendorApi: Send + Sync {
    /// `GET /vendors/profile`
    async fn vendor_profile(&self, token: &BearerToken) -> ApiResult<VendorProfile>;

    /// `PUT /vendors/profile`
    async fn update_vendor_profile(
        &self,
        token: &BearerToken,
        update: &VendorProfileUpdate,
    ) -> ApiResult<VendorProfile>;

    /// `GET /vendors/products?page=&size=`
    async fn vendor_products(
        &self,
        token: &BearerToken,
        page: u32,
        size: u32,
    ) -> ApiResult<Page<ProductSummary>>;

    /// `POST /vendors/products`
    async fn add_vendor_product(
        &self,
        token: &BearerToken,
        product: &ProductInput,
    ) -> ApiResult<Product>;

    /// `PUT /vendors/products/{id}`
    async fn update_vendor_product(
        &self,
        token: &BearerToken,
        id: ProductId,
        product: &ProductInput,
    ) -> ApiResult<Product>;

    /// `DELETE /vendors/products/{id}`
    async fn delete_vendor_product(
        &self,
        token: &BearerToken,
        id: ProductId,
    ) -> ApiResult<StatusMessage>;

    /// `GET /vendors/dashboard`
    async fn vendor_dashboard(&self, token: &BearerToken) -> ApiResult<VendorDashboard>;
}

// =============================================================================
// Admin
// =============================================================================

/// `/admin/*` operations. All authenticated, admin role required.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// `GET /admin/vendors?page=&size=`
    async fn admin_vendors(
        &self,
        token: &BearerToken,
        page: u32,
        size: u32,
    ) -> ApiResult<Page<VendorProfile>>;

    /// `GET /admin/vendors/{id}`
    async fn admin_vendor(&self, token: &BearerToken, id: VendorId) -> ApiResult<VendorProfile>;

    /// `POST /admin/vendors/{id}/approve`
    async fn approve_vendor(&self, token: &BearerToken, id: VendorId) -> ApiResult<StatusMessage>;

    /// `POST /admin/vendors/{id}/reject`
    async fn reject_vendor(
        &self,
        token: &BearerToken,
        id: VendorId,
        reason: &str,
    ) -> ApiResult<StatusMessage>;

    /// `GET /admin/categories`
    async fn admin_categories(&self, token: &BearerToken) -> ApiResult<Vec<Category>>;

    /// `POST /admin/categories`
    async fn create_category(
        &self,
        token: &BearerToken,
        input: &CategoryInput,
    ) -> ApiResult<Category>;

    /// `PUT /admin/categories/{id}`
    async fn update_category(
        &self,
        token: &BearerToken,
        id: CategoryId,
        input: &CategoryInput,
    ) -> ApiResult<Category>;

    /// `DELETE /admin/categories/{id}`
    async fn delete_category(
        &self,
        token: &BearerToken,
        id: CategoryId,
    ) -> ApiResult<StatusMessage>;

    /// `POST /admin/categories/{id}/subcategories`
    async fn add_subcategory(
        &self,
        token: &BearerToken,
        category_id: CategoryId,
        input: &SubcategoryInput,
    ) -> ApiResult<Category>;

    /// `DELETE /admin/categories/{id}/subcategories/{subId}`
    async fn delete_subcategory(
        &self,
        token: &BearerToken,
        category_id: CategoryId,
        subcategory_id: SubcategoryId,
    ) -> ApiResult<StatusMessage>;

    /// `GET /admin/dashboard`
    async fn admin_dashboard(&self, token: &BearerToken) -> ApiResult<AdminDashboard>;
}

/// The full backend surface, for composition-time injection.
pub trait MarketplaceApi:
    AuthApi + CatalogApi + CartApi + OrdersApi + VendorApi + AdminApi
{
}

impl<T> MarketplaceApi for T where
    T: AuthApi + CatalogApi + CartApi + OrdersApi + VendorApi + AdminApi
{
}
