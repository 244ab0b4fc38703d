//! Real HTTP implementation of the marketplace API.
//!
//! Builds JSON requests against the backend's REST surface, attaches the
//! caller's bearer token on authenticated operations, and normalizes error
//! responses via [`ApiError::from_status`]. Catalog reads are cached with
//! `moka` (5-minute TTL); admin catalog mutations invalidate the cache.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use vendora_core::{CartItemId, CategoryId, OrderId, Page, ProductId, ReviewId, SubcategoryId, VendorId};

use crate::api::{AdminApi, ApiResult, AuthApi, CartApi, CatalogApi, OrdersApi, VendorApi};
use crate::error::ApiError;
use crate::types::{
    AdminDashboard, AuthResponse, BearerToken, Cart, Category, CategoryInput, LoginRequest,
    NewReview, Order, OrderSummary, PlaceOrderRequest, Product, ProductInput, ProductQuery,
    ProductSummary, RegisterRequest, RegisterResponse, RejectVendorRequest, Review, StatusMessage,
    SubcategoryInput, VendorDashboard, VendorProfile, VendorProfileUpdate, WishlistItem,
};

/// Cache TTL for catalog reads.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Cached response values.
#[derive(Clone)]
enum CacheValue {
    Categories(Vec<Category>),
    Products(Page<ProductSummary>),
}

// =============================================================================
// RestClient
// =============================================================================

/// HTTP client for the marketplace backend.
///
/// Cheaply cloneable via `Arc`; one instance is shared across all request
/// handlers.
#[derive(Clone)]
pub struct RestClient {
    inner: Arc<RestClientInner>,
}

struct RestClientInner {
    http: reqwest::Client,
    base_url: String,
    cache: Cache<String, CacheValue>,
}

impl RestClient {
    /// Create a new client for the given backend base URL
    /// (e.g. `http://localhost:8080/api`).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(RestClientInner {
                http: reqwest::Client::new(),
                base_url: base_url.trim_end_matches('/').to_owned(),
                cache,
            }),
        }
    }

    /// Issue a request and decode the JSON response.
    async fn send<T, B>(
        &self,
        method: Method,
        path: &str,
        token: Option<&BearerToken>,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        let url = format!("{}{path}", self.inner.base_url);

        let mut request = self
            .inner
            .http
            .request(method, &url)
            .header("Accept", "application/json");

        if !query.is_empty() {
            request = request.query(query);
        }

        if let Some(token) = token {
            request = request.bearer_auth(token.as_str());
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        // Read the body as text first for better error diagnostics
        let text = response.text().await?;

        if !status.is_success() {
            debug!(
                status = %status,
                path,
                body = %text.chars().take(200).collect::<String>(),
                "backend returned non-success status"
            );
            return Err(ApiError::from_status(status.as_u16(), path, &text));
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                path,
                body = %text.chars().take(500).collect::<String>(),
                "failed to parse backend response"
            );
            ApiError::Parse(e)
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, token: Option<&BearerToken>) -> ApiResult<T> {
        self.send::<T, ()>(Method::GET, path, token, &[], None).await
    }

    async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&BearerToken>,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        self.send::<T, ()>(Method::GET, path, token, query, None).await
    }

    async fn post<T, B>(&self, path: &str, token: Option<&BearerToken>, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        self.send(Method::POST, path, token, &[], Some(body)).await
    }

    async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&BearerToken>,
    ) -> ApiResult<T> {
        self.send::<T, ()>(Method::POST, path, token, &[], None).await
    }

    async fn put<T, B>(&self, path: &str, token: Option<&BearerToken>, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        self.send(Method::PUT, path, token, &[], Some(body)).await
    }

    async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&BearerToken>,
    ) -> ApiResult<T> {
        self.send::<T, ()>(Method::DELETE, path, token, &[], None).await
    }

    /// Drop every cached catalog read. Called after admin catalog mutations.
    async fn invalidate_catalog_cache(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

// =============================================================================
// Auth
// =============================================================================

#[async_trait]
impl AuthApi for RestClient {
    #[instrument(skip(self, credentials))]
    async fn login(&self, credentials: &LoginRequest) -> ApiResult<AuthResponse> {
        self.post("/auth/login", None, credentials).await
    }

    #[instrument(skip(self, payload))]
    async fn register(&self, payload: &RegisterRequest) -> ApiResult<RegisterResponse> {
        self.post("/auth/register", None, payload).await
    }

    #[instrument(skip(self, email))]
    async fn forgot_password(&self, email: &str) -> ApiResult<StatusMessage> {
        self.post("/auth/forgot-password", None, &serde_json::json!({ "email": email }))
            .await
    }
}

// =============================================================================
// Catalog
// =============================================================================

#[async_trait]
impl CatalogApi for RestClient {
    #[instrument(skip(self))]
    async fn categories(&self) -> ApiResult<Vec<Category>> {
        let cache_key = "categories".to_owned();

        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(&cache_key).await {
            debug!("cache hit for categories");
            return Ok(categories);
        }

        let categories: Vec<Category> = self.get("/categories", None).await?;
        self.inner
            .cache
            .insert(cache_key, CacheValue::Categories(categories.clone()))
            .await;
        Ok(categories)
    }

    #[instrument(skip(self))]
    async fn featured_categories(&self) -> ApiResult<Vec<Category>> {
        let cache_key = "categories:featured".to_owned();

        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(&cache_key).await {
            debug!("cache hit for featured categories");
            return Ok(categories);
        }

        let categories: Vec<Category> = self.get("/categories/featured", None).await?;
        self.inner
            .cache
            .insert(cache_key, CacheValue::Categories(categories.clone()))
            .await;
        Ok(categories)
    }

    #[instrument(skip(self), fields(id_or_slug = %id_or_slug))]
    async fn category(&self, id_or_slug: &str) -> ApiResult<Category> {
        self.get(&format!("/categories/{id_or_slug}"), None).await
    }

    #[instrument(skip(self, query), fields(category_id = %category_id))]
    async fn products_by_category(
        &self,
        category_id: CategoryId,
        query: &ProductQuery,
    ) -> ApiResult<Page<ProductSummary>> {
        self.get_query(
            &format!("/categories/{category_id}/products"),
            None,
            &query.to_pairs(),
        )
        .await
    }

    #[instrument(skip(self, query))]
    async fn products(&self, query: &ProductQuery) -> ApiResult<Page<ProductSummary>> {
        let pairs = query.to_pairs();
        let cache_key = format!(
            "products:{}",
            pairs
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("&")
        );

        // Search results are not cached
        if query.cacheable()
            && let Some(CacheValue::Products(page)) = self.inner.cache.get(&cache_key).await
        {
            debug!("cache hit for products");
            return Ok(page);
        }

        let page: Page<ProductSummary> = self.get_query("/products", None, &pairs).await?;

        if query.cacheable() {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Products(page.clone()))
                .await;
        }

        Ok(page)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn product(&self, id: ProductId) -> ApiResult<Product> {
        self.get(&format!("/products/{id}"), None).await
    }

    #[instrument(skip(self))]
    async fn trending_products(&self) -> ApiResult<Vec<ProductSummary>> {
        self.get("/products/trending", None).await
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn product_reviews(&self, id: ProductId) -> ApiResult<Vec<Review>> {
        self.get(&format!("/products/{id}/reviews"), None).await
    }

    #[instrument(skip(self, token, review), fields(id = %id))]
    async fn submit_review(
        &self,
        token: &BearerToken,
        id: ProductId,
        review: &NewReview,
    ) -> ApiResult<Review> {
        self.post(&format!("/products/{id}/reviews"), Some(token), review)
            .await
    }

    #[instrument(skip(self, token), fields(id = %id))]
    async fn mark_review_helpful(
        &self,
        token: &BearerToken,
        id: ReviewId,
    ) -> ApiResult<StatusMessage> {
        self.post_empty(&format!("/reviews/{id}/helpful"), Some(token))
            .await
    }
}

// =============================================================================
// Cart & wishlist (not cached - per-user mutable state)
// =============================================================================

#[async_trait]
impl CartApi for RestClient {
    #[instrument(skip(self, token))]
    async fn cart(&self, token: &BearerToken) -> ApiResult<Cart> {
        self.get("/cart", Some(token)).await
    }

    #[instrument(skip(self, token), fields(product_id = %product_id))]
    async fn add_cart_item(
        &self,
        token: &BearerToken,
        product_id: ProductId,
        quantity: u32,
    ) -> ApiResult<StatusMessage> {
        self.post(
            "/cart/items",
            Some(token),
            &serde_json::json!({ "productId": product_id, "quantity": quantity }),
        )
        .await
    }

    #[instrument(skip(self, token), fields(item_id = %item_id))]
    async fn update_cart_item(
        &self,
        token: &BearerToken,
        item_id: CartItemId,
        quantity: u32,
    ) -> ApiResult<StatusMessage> {
        self.put(
            &format!("/cart/items/{item_id}"),
            Some(token),
            &serde_json::json!({ "quantity": quantity }),
        )
        .await
    }

    #[instrument(skip(self, token), fields(item_id = %item_id))]
    async fn remove_cart_item(
        &self,
        token: &BearerToken,
        item_id: CartItemId,
    ) -> ApiResult<StatusMessage> {
        self.delete(&format!("/cart/items/{item_id}"), Some(token)).await
    }

    #[instrument(skip(self, token))]
    async fn clear_cart(&self, token: &BearerToken) -> ApiResult<StatusMessage> {
        self.delete("/cart", Some(token)).await
    }

    #[instrument(skip(self, token))]
    async fn wishlist(&self, token: &BearerToken) -> ApiResult<Vec<WishlistItem>> {
        self.get("/users/wishlist", Some(token)).await
    }

    #[instrument(skip(self, token), fields(product_id = %product_id))]
    async fn add_to_wishlist(
        &self,
        token: &BearerToken,
        product_id: ProductId,
    ) -> ApiResult<StatusMessage> {
        self.post(
            "/users/wishlist",
            Some(token),
            &serde_json::json!({ "productId": product_id }),
        )
        .await
    }

    #[instrument(skip(self, token), fields(product_id = %product_id))]
    async fn remove_from_wishlist(
        &self,
        token: &BearerToken,
        product_id: ProductId,
    ) -> ApiResult<StatusMessage> {
        self.delete(&format!("/users/wishlist/{product_id}"), Some(token))
            .await
    }
}

// =============================================================================
// Orders
// =============================================================================

#[async_trait]
impl OrdersApi for RestClient {
    #[instrument(skip(self, token))]
    async fn orders(
        &self,
        token: &BearerToken,
        page: u32,
        size: u32,
    ) -> ApiResult<Page<OrderSummary>> {
        self.get_query(
            "/orders",
            Some(token),
            &[("page", page.to_string()), ("size", size.to_string())],
        )
        .await
    }

    #[instrument(skip(self, token), fields(id = %id))]
    async fn order(&self, token: &BearerToken, id: OrderId) -> ApiResult<Order> {
        self.get(&format!("/orders/{id}"), Some(token)).await
    }

    #[instrument(skip(self, token, request))]
    async fn place_order(
        &self,
        token: &BearerToken,
        request: &PlaceOrderRequest,
    ) -> ApiResult<Order> {
        self.post("/orders", Some(token), request).await
    }

    #[instrument(skip(self, token), fields(id = %id))]
    async fn cancel_order(&self, token: &BearerToken, id: OrderId) -> ApiResult<StatusMessage> {
        self.post_empty(&format!("/orders/{id}/cancel"), Some(token)).await
    }
}

// =============================================================================
// Vendor
// =============================================================================

#[async_trait]
impl VendorApi for RestClient {
    #[instrument(skip(self, token))]
    async fn vendor_profile(&self, token: &BearerToken) -> ApiResult<VendorProfile> {
        self.get("/vendors/profile", Some(token)).await
    }

    #[instrument(skip(self, token, update))]
    async fn update_vendor_profile(
        &self,
        token: &BearerToken,
        update: &VendorProfileUpdate,
    ) -> ApiResult<VendorProfile> {
        self.put("/vendors/profile", Some(token), update).await
    }

    #[instrument(skip(self, token))]
    async fn vendor_products(
        &self,
        token: &BearerToken,
        page: u32,
        size: u32,
    ) -> ApiResult<Page<ProductSummary>> {
        self.get_query(
            "/vendors/products",
            Some(token),
            &[("page", page.to_string()), ("size", size.to_string())],
        )
        .await
    }

    #[instrument(skip(self, token, product))]
    async fn add_vendor_product(
        &self,
        token: &BearerToken,
        product: &ProductInput,
    ) -> ApiResult<Product> {
        let created = self.post("/vendors/products", Some(token), product).await?;
        self.invalidate_catalog_cache().await;
        Ok(created)
    }

    #[instrument(skip(self, token, product), fields(id = %id))]
    async fn update_vendor_product(
        &self,
        token: &BearerToken,
        id: ProductId,
        product: &ProductInput,
    ) -> ApiResult<Product> {
        let updated = self
            .put(&format!("/vendors/products/{id}"), Some(token), product)
            .await?;
        self.invalidate_catalog_cache().await;
        Ok(updated)
    }

    #[instrument(skip(self, token), fields(id = %id))]
    async fn delete_vendor_product(
        &self,
        token: &BearerToken,
        id: ProductId,
    ) -> ApiResult<StatusMessage> {
        let status = self
            .delete(&format!("/vendors/products/{id}"), Some(token))
            .await?;
        self.invalidate_catalog_cache().await;
        Ok(status)
    }

    #[instrument(skip(self, token))]
    async fn vendor_dashboard(&self, token: &BearerToken) -> ApiResult<VendorDashboard> {
        self.get("/vendors/dashboard", Some(token)).await
    }
}

// =============================================================================
// Admin
// =============================================================================

#[async_trait]
impl AdminApi for RestClient {
    #[instrument(skip(self, token))]
    async fn admin_vendors(
        &self,
        token: &BearerToken,
        page: u32,
        size: u32,
    ) -> ApiResult<Page<VendorProfile>> {
        self.get_query(
            "/admin/vendors",
            Some(token),
            &[("page", page.to_string()), ("size", size.to_string())],
        )
        .await
    }

    #[instrument(skip(self, token), fields(id = %id))]
    async fn admin_vendor(&self, token: &BearerToken, id: VendorId) -> ApiResult<VendorProfile> {
        self.get(&format!("/admin/vendors/{id}"), Some(token)).await
    }

    #[instrument(skip(self, token), fields(id = %id))]
    async fn approve_vendor(&self, token: &BearerToken, id: VendorId) -> ApiResult<StatusMessage> {
        self.post_empty(&format!("/admin/vendors/{id}/approve"), Some(token))
            .await
    }

    #[instrument(skip(self, token, reason), fields(id = %id))]
    async fn reject_vendor(
        &self,
        token: &BearerToken,
        id: VendorId,
        reason: &str,
    ) -> ApiResult<StatusMessage> {
        self.post(
            &format!("/admin/vendors/{id}/reject"),
            Some(token),
            &RejectVendorRequest {
                reason: reason.to_owned(),
            },
        )
        .await
    }

    #[instrument(skip(self, token))]
    async fn admin_categories(&self, token: &BearerToken) -> ApiResult<Vec<Category>> {
        self.get("/admin/categories", Some(token)).await
    }

    #[instrument(skip(self, token, input))]
    async fn create_category(
        &self,
        token: &BearerToken,
        input: &CategoryInput,
    ) -> ApiResult<Category> {
        let created = self.post("/admin/categories", Some(token), input).await?;
        self.invalidate_catalog_cache().await;
        Ok(created)
    }

    #[instrument(skip(self, token, input), fields(id = %id))]
    async fn update_category(
        &self,
        token: &BearerToken,
        id: CategoryId,
        input: &CategoryInput,
    ) -> ApiResult<Category> {
        let updated = self
            .put(&format!("/admin/categories/{id}"), Some(token), input)
            .await?;
        self.invalidate_catalog_cache().await;
        Ok(updated)
    }

    #[instrument(skip(self, token), fields(id = %id))]
    async fn delete_category(
        &self,
        token: &BearerToken,
        id: CategoryId,
    ) -> ApiResult<StatusMessage> {
        let status = self
            .delete(&format!("/admin/categories/{id}"), Some(token))
            .await?;
        self.invalidate_catalog_cache().await;
        Ok(status)
    }

    #[instrument(skip(self, token, input), fields(category_id = %category_id))]
    async fn add_subcategory(
        &self,
        token: &BearerToken,
        category_id: CategoryId,
        input: &SubcategoryInput,
    ) -> ApiResult<Category> {
        let updated = self
            .post(
                &format!("/admin/categories/{category_id}/subcategories"),
                Some(token),
                input,
            )
            .await?;
        self.invalidate_catalog_cache().await;
        Ok(updated)
    }

    #[instrument(skip(self, token), fields(category_id = %category_id, subcategory_id = %subcategory_id))]
    async fn delete_subcategory(
        &self,
        token: &BearerToken,
        category_id: CategoryId,
        subcategory_id: SubcategoryId,
    ) -> ApiResult<StatusMessage> {
        let status = self
            .delete(
                &format!("/admin/categories/{category_id}/subcategories/{subcategory_id}"),
                Some(token),
            )
            .await?;
        self.invalidate_catalog_cache().await;
        Ok(status)
    }

    #[instrument(skip(self, token))]
    async fn admin_dashboard(&self, token: &BearerToken) -> ApiResult<AdminDashboard> {
        self.get("/admin/dashboard", Some(token)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, bearer_token, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn user_body() -> serde_json::Value {
        serde_json::json!({
            "id": 1,
            "username": "shopper",
            "firstName": "Asha",
            "lastName": "Patel",
            "email": "shopper@example.com",
            "phoneNumber": "+91 9876543210",
            "role": "CUSTOMER"
        })
    }

    #[tokio::test]
    async fn login_sends_email_key_for_email_identifier() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_partial_json(
                serde_json::json!({ "email": "shopper@example.com" }),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "jwt-123",
                "user": user_body()
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = RestClient::new(&server.uri());
        let credentials = LoginRequest::classify("shopper@example.com", "pw");
        let response = client.login(&credentials).await.expect("login");
        assert_eq!(response.token.as_str(), "jwt-123");
    }

    #[tokio::test]
    async fn login_sends_username_key_for_plain_identifier() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_partial_json(
                serde_json::json!({ "username": "shopper" }),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "jwt-456",
                "user": user_body()
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = RestClient::new(&server.uri());
        let credentials = LoginRequest::classify("shopper", "pw");
        client.login(&credentials).await.expect("login");
    }

    #[tokio::test]
    async fn backend_message_surfaces_in_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "message": "Invalid username or password"
            })))
            .mount(&server)
            .await;

        let client = RestClient::new(&server.uri());
        let credentials = LoginRequest::classify("shopper", "wrong");
        let err = client.login(&credentials).await.expect_err("should fail");
        assert_eq!(err.to_string(), "Invalid username or password");
    }

    #[tokio::test]
    async fn bearer_token_attached_to_authenticated_calls() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/vendors/products"))
            .and(bearer_token("vendor-jwt"))
            .and(query_param("page", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [],
                "totalPages": 0,
                "totalElements": 0,
                "size": 8,
                "number": 0
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = RestClient::new(&server.uri());
        let token = BearerToken::new("vendor-jwt".to_owned());
        let page = client.vendor_products(&token, 0, 8).await.expect("fetch");
        assert!(page.content.is_empty());
    }

    #[tokio::test]
    async fn categories_are_cached_between_calls() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": 1, "name": "Electronics", "slug": "electronics" }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = RestClient::new(&server.uri());
        let first = client.categories().await.expect("first fetch");
        let second = client.categories().await.expect("second fetch");
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        // expect(1) on the mock asserts the second call was served from cache
    }

    #[tokio::test]
    async fn unauthorized_maps_to_dedicated_variant() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cart"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = RestClient::new(&server.uri());
        let token = BearerToken::new("expired".to_owned());
        let err = client.cart(&token).await.expect_err("should fail");
        assert!(matches!(err, ApiError::Unauthorized));
    }
}
