//! In-memory fixture implementation of the marketplace API.
//!
//! Stands in for the real backend during local development and in tests,
//! selected at composition time (never by branching inside call sites).
//! All data is deterministic; mutable state (cart, wishlist, vendor
//! approval) lives behind a lock. Every call is recorded so tests can
//! assert which operations were (or were not) issued.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use vendora_core::{
    ApprovalStatus, CartItemId, CategoryId, Email, OrderId, OrderStatus, Page, PaymentStatus,
    ProductId, ReviewId, Role, SubcategoryId, UserId, VendorId,
};

use crate::api::{AdminApi, ApiResult, AuthApi, CartApi, CatalogApi, OrdersApi, VendorApi};
use crate::error::ApiError;
use crate::types::{
    AdminDashboard, Address, AuthResponse, BearerToken, Cart, CartItem, Category, CategoryInput,
    CategoryRef, LoginRequest, NewReview, Order, OrderDigest, OrderItem, OrderSummary,
    PlaceOrderRequest, Product, ProductBrief, ProductDigest, ProductInput, ProductQuery,
    ProductSummary, RegisterRequest, RegisterResponse, Review, ReviewAuthor, StatusMessage,
    Subcategory, SubcategoryInput, VendorDashboard, VendorProfile, VendorProfileUpdate, VendorRef,
    WishlistItem,
};

/// Password shared by every fixture account.
pub const FIXTURE_PASSWORD: &str = "password123";

/// Fixture usernames, one per role.
pub const CUSTOMER_USERNAME: &str = "customer";
pub const VENDOR_USERNAME: &str = "vendor";
pub const VENDOR_EMAIL: &str = "vendor@example.com";
pub const ADMIN_USERNAME: &str = "admin";

const CUSTOMER_TOKEN: &str = "fixture-token-customer";
const VENDOR_TOKEN: &str = "fixture-token-vendor";
const ADMIN_TOKEN: &str = "fixture-token-admin";

const PRODUCT_COUNT: i64 = 24;

/// Deterministic in-memory API implementation.
#[derive(Clone)]
pub struct FixtureClient {
    state: Arc<Mutex<FixtureState>>,
}

struct FixtureState {
    categories: Vec<Category>,
    vendors: Vec<VendorProfile>,
    cart: Vec<CartItem>,
    wishlist: Vec<WishlistItem>,
    orders: Vec<Order>,
    next_id: i64,
    calls: Vec<String>,
}

impl Default for FixtureClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureClient {
    /// Create a fixture client with the canned catalog and vendor data.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FixtureState {
                categories: seed_categories(),
                vendors: seed_vendors(),
                cart: Vec::new(),
                wishlist: Vec::new(),
                orders: seed_orders(),
                next_id: 1000,
                calls: Vec::new(),
            })),
        }
    }

    /// Every call issued so far, in order, as `"METHOD /path"` strings.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    fn state(&self) -> MutexGuard<'_, FixtureState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: &str) {
        self.state().calls.push(call.to_owned());
    }

    fn next_id(&self) -> i64 {
        let mut state = self.state();
        state.next_id += 1;
        state.next_id
    }

    fn require_role(token: &BearerToken, role: Role) -> ApiResult<()> {
        match Self::role_for(token) {
            Some(actual) if actual == role => Ok(()),
            Some(_) | None => Err(ApiError::Unauthorized),
        }
    }

    fn require_any(token: &BearerToken) -> ApiResult<Role> {
        Self::role_for(token).ok_or(ApiError::Unauthorized)
    }

    fn role_for(token: &BearerToken) -> Option<Role> {
        match token.as_str() {
            CUSTOMER_TOKEN => Some(Role::Customer),
            VENDOR_TOKEN => Some(Role::Vendor),
            ADMIN_TOKEN => Some(Role::Admin),
            _ => None,
        }
    }
}

// =============================================================================
// Seed data
// =============================================================================

fn fixture_address(street: &str, city: &str, state: &str, zip: &str) -> Address {
    Address {
        country: "India".to_owned(),
        state: state.to_owned(),
        city: city.to_owned(),
        zip_code: zip.to_owned(),
        street: street.to_owned(),
        is_default: Some(true),
    }
}

fn fixture_user(role: Role) -> crate::types::User {
    let (id, username, first, last, email) = match role {
        Role::Customer => (1, CUSTOMER_USERNAME, "Asha", "Patel", "customer@example.com"),
        Role::Vendor => (2, VENDOR_USERNAME, "Vikram", "Rao", VENDOR_EMAIL),
        Role::Admin => (3, ADMIN_USERNAME, "Meera", "Iyer", "admin@example.com"),
    };
    crate::types::User {
        id: UserId::new(id),
        username: username.to_owned(),
        first_name: first.to_owned(),
        last_name: last.to_owned(),
        email: Email::parse(email).unwrap_or_else(|_| unreachable!("fixture emails are valid")),
        phone_number: Some("+91 9876543210".to_owned()),
        role,
        address: Some(fixture_address("123 Main St", "Mumbai", "Maharashtra", "400001")),
    }
}

fn token_for(role: Role) -> BearerToken {
    BearerToken::new(
        match role {
            Role::Customer => CUSTOMER_TOKEN,
            Role::Vendor => VENDOR_TOKEN,
            Role::Admin => ADMIN_TOKEN,
        }
        .to_owned(),
    )
}

fn seed_categories() -> Vec<Category> {
    let subcategory = |id: i64, name: &str, slug: &str, count: u32| Subcategory {
        id: SubcategoryId::new(id),
        name: name.to_owned(),
        slug: slug.to_owned(),
        product_count: count,
    };

    vec![
        Category {
            id: CategoryId::new(1),
            name: "Electronics".to_owned(),
            slug: "electronics".to_owned(),
            description: Some("Latest gadgets and electronic items".to_owned()),
            image: Some("/images/categories/electronics.jpg".to_owned()),
            featured: true,
            product_count: 5240,
            subcategories: vec![
                subcategory(1, "Smartphones", "smartphones", 1250),
                subcategory(2, "Laptops", "laptops", 980),
                subcategory(3, "Audio", "audio", 1540),
                subcategory(4, "Cameras", "cameras", 760),
            ],
        },
        Category {
            id: CategoryId::new(2),
            name: "Fashion".to_owned(),
            slug: "fashion".to_owned(),
            description: Some("Trendy clothing and accessories".to_owned()),
            image: Some("/images/categories/fashion.jpg".to_owned()),
            featured: true,
            product_count: 8760,
            subcategories: vec![
                subcategory(5, "Men's Clothing", "mens-clothing", 2340),
                subcategory(6, "Women's Clothing", "womens-clothing", 3120),
                subcategory(7, "Footwear", "footwear", 1850),
            ],
        },
        Category {
            id: CategoryId::new(3),
            name: "Home & Kitchen".to_owned(),
            slug: "home-kitchen".to_owned(),
            description: Some("Everything for your home".to_owned()),
            image: Some("/images/categories/home-kitchen.jpg".to_owned()),
            featured: false,
            product_count: 3980,
            subcategories: vec![
                subcategory(8, "Furniture", "furniture", 1240),
                subcategory(9, "Appliances", "appliances", 980),
                subcategory(10, "Decor", "decor", 1120),
            ],
        },
    ]
}

fn seed_vendors() -> Vec<VendorProfile> {
    vec![
        VendorProfile {
            id: VendorId::new(1),
            user_id: UserId::new(2),
            store_name: "ElectroHub".to_owned(),
            store_description: Some("Best electronics store in town".to_owned()),
            store_address: Some(fixture_address("456 Market St", "Mumbai", "Maharashtra", "400001")),
            approval_status: ApprovalStatus::Approved,
            rejection_reason: None,
            rating: 4.8,
            product_count: 24,
            specialty: Some("Electronics".to_owned()),
            joined_date: Utc.with_ymd_and_hms(2025, 5, 8, 10, 0, 0).single(),
            contact_email: Some("store@electrohub.example".to_owned()),
            contact_phone: Some("+91 9876543210".to_owned()),
        },
        VendorProfile {
            id: VendorId::new(2),
            user_id: UserId::new(4),
            store_name: "FashionFiesta".to_owned(),
            store_description: Some("Trendy fashion for all".to_owned()),
            store_address: Some(fixture_address("789 Fashion St", "New Delhi", "Delhi", "110001")),
            approval_status: ApprovalStatus::Pending,
            rejection_reason: None,
            rating: 0.0,
            product_count: 0,
            specialty: Some("Fashion".to_owned()),
            joined_date: Utc.with_ymd_and_hms(2026, 7, 30, 9, 30, 0).single(),
            contact_email: Some("store@fashionfiesta.example".to_owned()),
            contact_phone: Some("+91 9876543211".to_owned()),
        },
    ]
}

/// Deterministic product for index `i` (1-based).
fn fixture_product(i: i64) -> Product {
    let categories = seed_categories();
    #[allow(clippy::indexing_slicing)] // index is taken modulo len
    let category = &categories[usize::try_from((i - 1).rem_euclid(3)).unwrap_or(0)];
    let on_sale = i % 2 == 0;
    let price = Decimal::from(999 + i * 250);
    let original_price = on_sale.then(|| price + price * Decimal::new(3, 1)); // +30%

    let summary = ProductSummary {
        id: ProductId::new(i),
        name: format!("Premium Product {i}"),
        description: Some(format!(
            "High-quality product {i} with excellent features and a one-year warranty."
        )),
        price,
        original_price,
        images: vec![
            format!("/images/products/{i}-main.jpg"),
            format!("/images/products/{i}-side.jpg"),
        ],
        category: Some(CategoryRef {
            id: category.id,
            name: category.name.clone(),
            slug: Some(category.slug.clone()),
        }),
        subcategory: None,
        vendor: Some(VendorRef {
            id: VendorId::new(1),
            name: "ElectroHub".to_owned(),
            rating: Some(4.8),
        }),
        #[allow(clippy::cast_precision_loss)] // small fixture indexes
        rating: 3.5 + ((i % 15) as f64) * 0.1,
        review_count: u32::try_from(50 + i * 7).unwrap_or(50),
        inventory: 10 + i % 40,
        created_at: Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).single().map(|base| {
            base + chrono::Duration::days(i)
        }),
    };

    Product {
        summary,
        specifications: vec![
            crate::types::Specification {
                name: "Weight".to_owned(),
                value: "250g".to_owned(),
            },
            crate::types::Specification {
                name: "Warranty".to_owned(),
                value: "1 Year".to_owned(),
            },
        ],
        tags: vec!["premium".to_owned(), "bestseller".to_owned()],
        reviews: fixture_reviews(i),
        in_stock: Some(true),
    }
}

fn fixture_reviews(product: i64) -> Vec<Review> {
    (1..=3)
        .map(|i| Review {
            id: ReviewId::new(product * 100 + i),
            user: Some(ReviewAuthor {
                id: UserId::new(100 + i),
                name: Some(format!("Reviewer {i}")),
                username: Some(format!("reviewer{i}")),
            }),
            rating: u8::try_from(3 + (product + i) % 3).unwrap_or(4),
            title: Some("Great product, highly recommend!".to_owned()),
            comment: "Exceeded my expectations. Would definitely buy again.".to_owned(),
            verified: i % 2 == 1,
            helpful_count: u32::try_from(i * 4).unwrap_or(0),
            created_at: Utc.with_ymd_and_hms(2026, 7, 1, 8, 0, 0).single(),
        })
        .collect()
}

fn fixture_brief(i: i64) -> ProductBrief {
    let product = fixture_product(i);
    ProductBrief {
        id: product.summary.id,
        name: product.summary.name.clone(),
        image: product.summary.primary_image().map(str::to_owned),
        price: product.summary.price,
        original_price: product.summary.original_price,
        rating: Some(product.summary.rating),
        vendor: product.summary.vendor,
    }
}

fn seed_orders() -> Vec<Order> {
    (1..=5)
        .map(|i| {
            let statuses = [
                OrderStatus::Pending,
                OrderStatus::Processing,
                OrderStatus::Shipped,
                OrderStatus::Delivered,
                OrderStatus::Cancelled,
            ];
            let subtotal = Decimal::from(1999 * i);
            let tax = subtotal * Decimal::new(18, 2); // 18% GST
            let shipping = Decimal::from(100);
            Order {
                summary: OrderSummary {
                    id: OrderId::new(i),
                    order_number: format!("ORD-{}", 10000 + i),
                    #[allow(clippy::indexing_slicing)] // index is taken modulo len
                    status: statuses[usize::try_from((i - 1).rem_euclid(5)).unwrap_or(0)],
                    items: vec![OrderItem {
                        id: i,
                        product_id: ProductId::new(i),
                        product_name: format!("Premium Product {i}"),
                        product_image: Some(format!("/images/products/{i}-main.jpg")),
                        quantity: 1,
                        price: Decimal::from(1999 * i),
                        vendor_id: Some(VendorId::new(1)),
                        vendor_name: Some("ElectroHub".to_owned()),
                    }],
                    subtotal,
                    tax,
                    shipping,
                    discount: Some(Decimal::ZERO),
                    total: subtotal + tax + shipping,
                    created_at: Utc.with_ymd_and_hms(2026, 7, 1, 10, 0, 0).single().map(|base| {
                        base + chrono::Duration::days(i)
                    }),
                },
                user_id: Some(UserId::new(1)),
                shipping_address: Some(fixture_address("123 Main St", "Mumbai", "Maharashtra", "400001")),
                billing_address: None,
                payment_method: Some("Credit Card".to_owned()),
                payment_status: Some(PaymentStatus::Paid),
                notes: None,
            }
        })
        .collect()
}

fn paginate<T: Clone>(items: &[T], page: u32, size: u32) -> Page<T> {
    let size = size.max(1);
    let total_elements = items.len() as u64;
    let total_pages = u32::try_from(total_elements.div_ceil(u64::from(size))).unwrap_or(0);
    let start = usize::try_from(page * size).unwrap_or(usize::MAX);
    let content = items
        .iter()
        .skip(start)
        .take(size as usize)
        .cloned()
        .collect();
    Page {
        content,
        total_pages,
        total_elements,
        size,
        number: page,
    }
}

fn ok_message(message: &str) -> StatusMessage {
    StatusMessage {
        success: true,
        message: message.to_owned(),
    }
}

// =============================================================================
// Trait implementations
// =============================================================================

#[async_trait]
impl AuthApi for FixtureClient {
    async fn login(&self, credentials: &LoginRequest) -> ApiResult<AuthResponse> {
        self.record("POST /auth/login");

        if credentials.password != FIXTURE_PASSWORD {
            return Err(ApiError::Backend {
                status: 401,
                message: "Invalid username or password".to_owned(),
            });
        }

        let identifier = credentials
            .username
            .as_deref()
            .or(credentials.email.as_deref())
            .unwrap_or_default();

        let role = match identifier {
            CUSTOMER_USERNAME | "customer@example.com" => Role::Customer,
            VENDOR_USERNAME | VENDOR_EMAIL => Role::Vendor,
            ADMIN_USERNAME | "admin@example.com" => Role::Admin,
            _ => {
                return Err(ApiError::Backend {
                    status: 401,
                    message: "Invalid username or password".to_owned(),
                });
            }
        };

        Ok(AuthResponse {
            token: token_for(role),
            user: fixture_user(role),
        })
    }

    async fn register(&self, payload: &RegisterRequest) -> ApiResult<RegisterResponse> {
        self.record("POST /auth/register");

        if payload.username.is_empty() || payload.email.is_empty() || payload.password.is_empty() {
            return Err(ApiError::Backend {
                status: 400,
                message: "Missing required fields for registration".to_owned(),
            });
        }

        // Vendors await approval and must log in separately; customers are
        // auto-authenticated, mirroring the backend's behavior.
        if payload.role == Role::Vendor {
            return Ok(RegisterResponse {
                success: true,
                message: "Vendor registration successful. Your store is pending approval."
                    .to_owned(),
                token: None,
                user: None,
            });
        }

        Ok(RegisterResponse {
            success: true,
            message: "Registration successful".to_owned(),
            token: Some(token_for(Role::Customer)),
            user: Some(fixture_user(Role::Customer)),
        })
    }

    async fn forgot_password(&self, _email: &str) -> ApiResult<StatusMessage> {
        self.record("POST /auth/forgot-password");
        Ok(ok_message("Password reset email sent"))
    }
}

#[async_trait]
impl CatalogApi for FixtureClient {
    async fn categories(&self) -> ApiResult<Vec<Category>> {
        self.record("GET /categories");
        Ok(self.state().categories.clone())
    }

    async fn featured_categories(&self) -> ApiResult<Vec<Category>> {
        self.record("GET /categories/featured");
        Ok(self
            .state()
            .categories
            .iter()
            .filter(|c| c.featured)
            .cloned()
            .collect())
    }

    async fn category(&self, id_or_slug: &str) -> ApiResult<Category> {
        self.record("GET /categories/{idOrSlug}");
        self.state()
            .categories
            .iter()
            .find(|c| c.slug == id_or_slug || c.id.to_string() == id_or_slug)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("/categories/{id_or_slug}")))
    }

    async fn products_by_category(
        &self,
        category_id: CategoryId,
        query: &ProductQuery,
    ) -> ApiResult<Page<ProductSummary>> {
        self.record("GET /categories/{id}/products");
        let all: Vec<ProductSummary> = (1..=PRODUCT_COUNT)
            .map(|i| fixture_product(i).summary)
            .filter(|p| p.category.as_ref().is_some_and(|c| c.id == category_id))
            .collect();
        Ok(paginate(
            &all,
            query.page.unwrap_or(0),
            query.size.unwrap_or(12),
        ))
    }

    async fn products(&self, query: &ProductQuery) -> ApiResult<Page<ProductSummary>> {
        self.record("GET /products");
        let mut all: Vec<ProductSummary> =
            (1..=PRODUCT_COUNT).map(|i| fixture_product(i).summary).collect();
        if let Some(category) = &query.category {
            all.retain(|p| {
                p.category
                    .as_ref()
                    .is_some_and(|c| c.slug.as_deref() == Some(category.as_str()))
            });
        }
        Ok(paginate(
            &all,
            query.page.unwrap_or(0),
            query.size.unwrap_or(12),
        ))
    }

    async fn product(&self, id: ProductId) -> ApiResult<Product> {
        self.record("GET /products/{id}");
        if id.as_i64() < 1 || id.as_i64() > PRODUCT_COUNT {
            return Err(ApiError::NotFound(format!("/products/{id}")));
        }
        Ok(fixture_product(id.as_i64()))
    }

    async fn trending_products(&self) -> ApiResult<Vec<ProductSummary>> {
        self.record("GET /products/trending");
        Ok((1..=8).map(|i| fixture_product(i).summary).collect())
    }

    async fn product_reviews(&self, id: ProductId) -> ApiResult<Vec<Review>> {
        self.record("GET /products/{id}/reviews");
        Ok(fixture_reviews(id.as_i64()))
    }

    async fn submit_review(
        &self,
        token: &BearerToken,
        id: ProductId,
        review: &NewReview,
    ) -> ApiResult<Review> {
        Self::require_any(token)?;
        self.record("POST /products/{id}/reviews");
        Ok(Review {
            id: ReviewId::new(self.next_id()),
            user: Some(ReviewAuthor {
                id: UserId::new(1),
                name: Some("Asha Patel".to_owned()),
                username: Some(CUSTOMER_USERNAME.to_owned()),
            }),
            rating: review.rating,
            title: review.title.clone(),
            comment: review.comment.clone(),
            verified: false,
            helpful_count: 0,
            created_at: fixture_product(id.as_i64()).summary.created_at,
        })
    }

    async fn mark_review_helpful(
        &self,
        token: &BearerToken,
        _id: ReviewId,
    ) -> ApiResult<StatusMessage> {
        Self::require_any(token)?;
        self.record("POST /reviews/{id}/helpful");
        Ok(ok_message("Review marked as helpful"))
    }
}

#[async_trait]
impl CartApi for FixtureClient {
    async fn cart(&self, token: &BearerToken) -> ApiResult<Cart> {
        Self::require_any(token)?;
        self.record("GET /cart");

        let items = self.state().cart.clone();
        let subtotal: Decimal = items
            .iter()
            .map(|item| item.price * Decimal::from(item.quantity))
            .sum();
        let tax = subtotal * Decimal::new(18, 2);
        let shipping = if items.is_empty() {
            Decimal::ZERO
        } else {
            Decimal::from(100)
        };
        Ok(Cart {
            total_items: items.iter().map(|i| i.quantity).sum(),
            subtotal,
            tax,
            shipping,
            total: subtotal + tax + shipping,
            coupon_code: None,
            coupon_discount: None,
            items,
        })
    }

    async fn add_cart_item(
        &self,
        token: &BearerToken,
        product_id: ProductId,
        quantity: u32,
    ) -> ApiResult<StatusMessage> {
        Self::require_any(token)?;
        self.record("POST /cart/items");

        let brief = fixture_brief(product_id.as_i64());
        let id = self.next_id();
        let mut state = self.state();
        if let Some(existing) = state
            .cart
            .iter_mut()
            .find(|item| item.product.id == product_id)
        {
            existing.quantity += quantity;
        } else {
            state.cart.push(CartItem {
                id: CartItemId::new(id),
                price: brief.price,
                product: brief,
                quantity,
            });
        }
        Ok(ok_message("Item added to cart"))
    }

    async fn update_cart_item(
        &self,
        token: &BearerToken,
        item_id: CartItemId,
        quantity: u32,
    ) -> ApiResult<StatusMessage> {
        Self::require_any(token)?;
        self.record("PUT /cart/items/{id}");

        let mut state = self.state();
        match state.cart.iter_mut().find(|item| item.id == item_id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(ok_message("Cart item updated"))
            }
            None => Err(ApiError::NotFound(format!("/cart/items/{item_id}"))),
        }
    }

    async fn remove_cart_item(
        &self,
        token: &BearerToken,
        item_id: CartItemId,
    ) -> ApiResult<StatusMessage> {
        Self::require_any(token)?;
        self.record("DELETE /cart/items/{id}");
        self.state().cart.retain(|item| item.id != item_id);
        Ok(ok_message("Item removed from cart"))
    }

    async fn clear_cart(&self, token: &BearerToken) -> ApiResult<StatusMessage> {
        Self::require_any(token)?;
        self.record("DELETE /cart");
        self.state().cart.clear();
        Ok(ok_message("Cart cleared successfully"))
    }

    async fn wishlist(&self, token: &BearerToken) -> ApiResult<Vec<WishlistItem>> {
        Self::require_any(token)?;
        self.record("GET /users/wishlist");
        Ok(self.state().wishlist.clone())
    }

    async fn add_to_wishlist(
        &self,
        token: &BearerToken,
        product_id: ProductId,
    ) -> ApiResult<StatusMessage> {
        Self::require_any(token)?;
        self.record("POST /users/wishlist");

        let brief = fixture_brief(product_id.as_i64());
        let id = self.next_id();
        let mut state = self.state();
        if !state.wishlist.iter().any(|w| w.product_id == product_id) {
            state.wishlist.push(WishlistItem {
                id,
                product_id,
                product: brief,
                added_at: None,
            });
        }
        Ok(ok_message("Item added to wishlist"))
    }

    async fn remove_from_wishlist(
        &self,
        token: &BearerToken,
        product_id: ProductId,
    ) -> ApiResult<StatusMessage> {
        Self::require_any(token)?;
        self.record("DELETE /users/wishlist/{productId}");
        self.state().wishlist.retain(|w| w.product_id != product_id);
        Ok(ok_message("Item removed from wishlist"))
    }
}

#[async_trait]
impl OrdersApi for FixtureClient {
    async fn orders(
        &self,
        token: &BearerToken,
        page: u32,
        size: u32,
    ) -> ApiResult<Page<OrderSummary>> {
        Self::require_any(token)?;
        self.record("GET /orders");
        let summaries: Vec<OrderSummary> =
            self.state().orders.iter().map(|o| o.summary.clone()).collect();
        Ok(paginate(&summaries, page, size))
    }

    async fn order(&self, token: &BearerToken, id: OrderId) -> ApiResult<Order> {
        Self::require_any(token)?;
        self.record("GET /orders/{id}");
        self.state()
            .orders
            .iter()
            .find(|o| o.summary.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("/orders/{id}")))
    }

    async fn place_order(
        &self,
        token: &BearerToken,
        request: &PlaceOrderRequest,
    ) -> ApiResult<Order> {
        Self::require_any(token)?;
        self.record("POST /orders");

        let id = self.next_id();
        let mut state = self.state();
        if state.cart.is_empty() {
            return Err(ApiError::Backend {
                status: 400,
                message: "Cannot place an order with an empty cart".to_owned(),
            });
        }

        let items: Vec<OrderItem> = state
            .cart
            .iter()
            .map(|item| OrderItem {
                id: item.id.as_i64(),
                product_id: item.product.id,
                product_name: item.product.name.clone(),
                product_image: item.product.image.clone(),
                quantity: item.quantity,
                price: item.price,
                vendor_id: item.product.vendor.as_ref().map(|v| v.id),
                vendor_name: item.product.vendor.as_ref().map(|v| v.name.clone()),
            })
            .collect();
        let subtotal: Decimal = items
            .iter()
            .map(|item| item.price * Decimal::from(item.quantity))
            .sum();
        let tax = subtotal * Decimal::new(18, 2);
        let shipping = Decimal::from(100);

        let order = Order {
            summary: OrderSummary {
                id: OrderId::new(id),
                order_number: format!("ORD-{}", 10000 + id),
                status: OrderStatus::Pending,
                items,
                subtotal,
                tax,
                shipping,
                discount: Some(Decimal::ZERO),
                total: subtotal + tax + shipping,
                created_at: None,
            },
            user_id: Some(UserId::new(1)),
            shipping_address: request.shipping_address.clone(),
            billing_address: None,
            payment_method: Some(request.payment_method.clone()),
            payment_status: Some(PaymentStatus::Pending),
            notes: None,
        };
        state.cart.clear();
        state.orders.insert(0, order.clone());
        Ok(order)
    }

    async fn cancel_order(&self, token: &BearerToken, id: OrderId) -> ApiResult<StatusMessage> {
        Self::require_any(token)?;
        self.record("POST /orders/{id}/cancel");

        let mut state = self.state();
        match state.orders.iter_mut().find(|o| o.summary.id == id) {
            Some(order) if order.summary.status.cancellable() => {
                order.summary.status = OrderStatus::Cancelled;
                Ok(ok_message("Order cancelled successfully"))
            }
            Some(_) => Err(ApiError::Backend {
                status: 409,
                message: "Order can no longer be cancelled".to_owned(),
            }),
            None => Err(ApiError::NotFound(format!("/orders/{id}"))),
        }
    }
}

#[async_trait]
impl VendorApi for FixtureClient {
    async fn vendor_profile(&self, token: &BearerToken) -> ApiResult<VendorProfile> {
        Self::require_role(token, Role::Vendor)?;
        self.record("GET /vendors/profile");
        self.state()
            .vendors
            .first()
            .cloned()
            .ok_or_else(|| ApiError::NotFound("/vendors/profile".to_owned()))
    }

    async fn update_vendor_profile(
        &self,
        token: &BearerToken,
        update: &VendorProfileUpdate,
    ) -> ApiResult<VendorProfile> {
        Self::require_role(token, Role::Vendor)?;
        self.record("PUT /vendors/profile");

        let mut state = self.state();
        let profile = state
            .vendors
            .first_mut()
            .ok_or_else(|| ApiError::NotFound("/vendors/profile".to_owned()))?;
        profile.store_name = update.store_name.clone();
        profile.store_description = Some(update.store_description.clone());
        profile.specialty = update.specialty.clone();
        if update.contact_email.is_some() {
            profile.contact_email = update.contact_email.clone();
        }
        if update.contact_phone.is_some() {
            profile.contact_phone = update.contact_phone.clone();
        }
        Ok(profile.clone())
    }

    async fn vendor_products(
        &self,
        token: &BearerToken,
        page: u32,
        size: u32,
    ) -> ApiResult<Page<ProductSummary>> {
        Self::require_role(token, Role::Vendor)?;
        self.record("GET /vendors/products");
        let all: Vec<ProductSummary> =
            (1..=PRODUCT_COUNT).map(|i| fixture_product(i).summary).collect();
        Ok(paginate(&all, page, size))
    }

    async fn add_vendor_product(
        &self,
        token: &BearerToken,
        product: &ProductInput,
    ) -> ApiResult<Product> {
        Self::require_role(token, Role::Vendor)?;
        self.record("POST /vendors/products");

        let mut created = fixture_product(1);
        created.summary.id = ProductId::new(self.next_id());
        created.summary.name = product.name.clone();
        created.summary.description = Some(product.description.clone());
        created.summary.price = product.price;
        created.summary.original_price = product.original_price;
        created.summary.inventory = product.inventory;
        created.summary.images = product.images.clone();
        created.reviews = Vec::new();
        Ok(created)
    }

    async fn update_vendor_product(
        &self,
        token: &BearerToken,
        id: ProductId,
        product: &ProductInput,
    ) -> ApiResult<Product> {
        Self::require_role(token, Role::Vendor)?;
        self.record("PUT /vendors/products/{id}");

        let mut updated = fixture_product(id.as_i64().clamp(1, PRODUCT_COUNT));
        updated.summary.id = id;
        updated.summary.name = product.name.clone();
        updated.summary.description = Some(product.description.clone());
        updated.summary.price = product.price;
        updated.summary.original_price = product.original_price;
        updated.summary.inventory = product.inventory;
        Ok(updated)
    }

    async fn delete_vendor_product(
        &self,
        token: &BearerToken,
        _id: ProductId,
    ) -> ApiResult<StatusMessage> {
        Self::require_role(token, Role::Vendor)?;
        self.record("DELETE /vendors/products/{id}");
        Ok(ok_message("Product deleted successfully"))
    }

    async fn vendor_dashboard(&self, token: &BearerToken) -> ApiResult<VendorDashboard> {
        Self::require_role(token, Role::Vendor)?;
        self.record("GET /vendors/dashboard");

        let profile = self
            .state()
            .vendors
            .first()
            .cloned()
            .ok_or_else(|| ApiError::NotFound("/vendors/dashboard".to_owned()))?;
        let recent_products: Vec<ProductDigest> = (1..=5)
            .map(|i| {
                let product = fixture_product(i);
                ProductDigest {
                    id: product.summary.id,
                    name: product.summary.name,
                    price: product.summary.price,
                    inventory: product.summary.inventory,
                    category: product.summary.category,
                    created_at: product.summary.created_at,
                }
            })
            .collect();
        let recent_orders: Vec<OrderDigest> = seed_orders()
            .into_iter()
            .take(5)
            .map(|order| OrderDigest {
                id: order.summary.id,
                order_number: order.summary.order_number,
                created_at: order.summary.created_at,
                status: order.summary.status,
                total: order.summary.total,
                item_count: u32::try_from(order.summary.items.len()).unwrap_or(0),
            })
            .collect();

        Ok(VendorDashboard {
            product_count: profile.product_count,
            recent_products,
            order_count: 8,
            recent_orders,
            total_revenue: Decimal::from(284_500),
            monthly_revenue: Decimal::from(42_300),
            previous_month_revenue: Decimal::from(38_900),
            vendor_profile: profile,
        })
    }
}

#[async_trait]
impl AdminApi for FixtureClient {
    async fn admin_vendors(
        &self,
        token: &BearerToken,
        page: u32,
        size: u32,
    ) -> ApiResult<Page<VendorProfile>> {
        Self::require_role(token, Role::Admin)?;
        self.record("GET /admin/vendors");
        let vendors = self.state().vendors.clone();
        Ok(paginate(&vendors, page, size))
    }

    async fn admin_vendor(&self, token: &BearerToken, id: VendorId) -> ApiResult<VendorProfile> {
        Self::require_role(token, Role::Admin)?;
        self.record("GET /admin/vendors/{id}");
        self.state()
            .vendors
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("/admin/vendors/{id}")))
    }

    async fn approve_vendor(&self, token: &BearerToken, id: VendorId) -> ApiResult<StatusMessage> {
        Self::require_role(token, Role::Admin)?;
        self.record("POST /admin/vendors/{id}/approve");

        let mut state = self.state();
        match state.vendors.iter_mut().find(|v| v.id == id) {
            Some(vendor) => {
                vendor.approval_status = ApprovalStatus::Approved;
                vendor.rejection_reason = None;
                Ok(ok_message("Vendor approved successfully"))
            }
            None => Err(ApiError::NotFound(format!("/admin/vendors/{id}"))),
        }
    }

    async fn reject_vendor(
        &self,
        token: &BearerToken,
        id: VendorId,
        reason: &str,
    ) -> ApiResult<StatusMessage> {
        Self::require_role(token, Role::Admin)?;
        self.record("POST /admin/vendors/{id}/reject");

        let mut state = self.state();
        match state.vendors.iter_mut().find(|v| v.id == id) {
            Some(vendor) => {
                vendor.approval_status = ApprovalStatus::Rejected;
                vendor.rejection_reason = Some(reason.to_owned());
                Ok(ok_message("Vendor rejected successfully"))
            }
            None => Err(ApiError::NotFound(format!("/admin/vendors/{id}"))),
        }
    }

    async fn admin_categories(&self, token: &BearerToken) -> ApiResult<Vec<Category>> {
        Self::require_role(token, Role::Admin)?;
        self.record("GET /admin/categories");
        Ok(self.state().categories.clone())
    }

    async fn create_category(
        &self,
        token: &BearerToken,
        input: &CategoryInput,
    ) -> ApiResult<Category> {
        Self::require_role(token, Role::Admin)?;
        self.record("POST /admin/categories");

        let id = self.next_id();
        let category = Category {
            id: CategoryId::new(id),
            name: input.name.clone(),
            slug: input.slug.clone(),
            description: Some(input.description.clone()),
            image: input.image.clone(),
            featured: input.featured,
            product_count: 0,
            subcategories: Vec::new(),
        };
        self.state().categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        token: &BearerToken,
        id: CategoryId,
        input: &CategoryInput,
    ) -> ApiResult<Category> {
        Self::require_role(token, Role::Admin)?;
        self.record("PUT /admin/categories/{id}");

        let mut state = self.state();
        let category = state
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("/admin/categories/{id}")))?;
        category.name = input.name.clone();
        category.slug = input.slug.clone();
        category.description = Some(input.description.clone());
        category.image = input.image.clone();
        category.featured = input.featured;
        Ok(category.clone())
    }

    async fn delete_category(
        &self,
        token: &BearerToken,
        id: CategoryId,
    ) -> ApiResult<StatusMessage> {
        Self::require_role(token, Role::Admin)?;
        self.record("DELETE /admin/categories/{id}");
        self.state().categories.retain(|c| c.id != id);
        Ok(ok_message("Category deleted successfully"))
    }

    async fn add_subcategory(
        &self,
        token: &BearerToken,
        category_id: CategoryId,
        input: &SubcategoryInput,
    ) -> ApiResult<Category> {
        Self::require_role(token, Role::Admin)?;
        self.record("POST /admin/categories/{id}/subcategories");

        let id = self.next_id();
        let mut state = self.state();
        let category = state
            .categories
            .iter_mut()
            .find(|c| c.id == category_id)
            .ok_or_else(|| ApiError::NotFound(format!("/admin/categories/{category_id}")))?;
        category.subcategories.push(Subcategory {
            id: SubcategoryId::new(id),
            name: input.name.clone(),
            slug: input.slug.clone(),
            product_count: 0,
        });
        Ok(category.clone())
    }

    async fn delete_subcategory(
        &self,
        token: &BearerToken,
        category_id: CategoryId,
        subcategory_id: SubcategoryId,
    ) -> ApiResult<StatusMessage> {
        Self::require_role(token, Role::Admin)?;
        self.record("DELETE /admin/categories/{id}/subcategories/{subId}");

        let mut state = self.state();
        if let Some(category) = state.categories.iter_mut().find(|c| c.id == category_id) {
            category.subcategories.retain(|s| s.id != subcategory_id);
        }
        Ok(ok_message("Subcategory deleted successfully"))
    }

    async fn admin_dashboard(&self, token: &BearerToken) -> ApiResult<AdminDashboard> {
        Self::require_role(token, Role::Admin)?;
        self.record("GET /admin/dashboard");

        let state = self.state();
        Ok(AdminDashboard {
            total_vendors: u32::try_from(state.vendors.len()).unwrap_or(0),
            pending_vendors: u32::try_from(
                state
                    .vendors
                    .iter()
                    .filter(|v| v.approval_status == ApprovalStatus::Pending)
                    .count(),
            )
            .unwrap_or(0),
            total_customers: 1280,
            total_products: u64::try_from(PRODUCT_COUNT).unwrap_or(0),
            total_orders: u64::try_from(state.orders.len()).unwrap_or(0),
            total_revenue: Some(Decimal::from(1_845_200)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer_token() -> BearerToken {
        token_for(Role::Customer)
    }

    #[tokio::test]
    async fn login_accepts_fixture_accounts() {
        let client = FixtureClient::new();
        let response = client
            .login(&LoginRequest::classify(VENDOR_EMAIL, FIXTURE_PASSWORD))
            .await
            .expect("login");
        assert_eq!(response.user.role, Role::Vendor);
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let client = FixtureClient::new();
        let err = client
            .login(&LoginRequest::classify(CUSTOMER_USERNAME, "nope"))
            .await
            .expect_err("should fail");
        assert!(matches!(err, ApiError::Backend { status: 401, .. }));
    }

    #[tokio::test]
    async fn cart_mutations_round_trip() {
        let client = FixtureClient::new();
        let token = customer_token();

        client
            .add_cart_item(&token, ProductId::new(3), 2)
            .await
            .expect("add");
        let cart = client.cart(&token).await.expect("fetch");
        assert_eq!(cart.total_items, 2);

        let item_id = cart.items.first().map(|i| i.id).expect("one item");
        client
            .update_cart_item(&token, item_id, 1)
            .await
            .expect("update");
        client
            .remove_cart_item(&token, item_id)
            .await
            .expect("remove");
        assert!(client.cart(&token).await.expect("fetch").is_empty());
    }

    #[tokio::test]
    async fn admin_approval_flips_vendor_status() {
        let client = FixtureClient::new();
        let admin = token_for(Role::Admin);

        let pending = VendorId::new(2);
        client.approve_vendor(&admin, pending).await.expect("approve");
        let vendor = client.admin_vendor(&admin, pending).await.expect("fetch");
        assert_eq!(vendor.approval_status, ApprovalStatus::Approved);

        client
            .reject_vendor(&admin, pending, "Incomplete documents")
            .await
            .expect("reject");
        let vendor = client.admin_vendor(&admin, pending).await.expect("fetch");
        assert_eq!(vendor.approval_status, ApprovalStatus::Rejected);
        assert_eq!(
            vendor.rejection_reason.as_deref(),
            Some("Incomplete documents")
        );
    }

    #[tokio::test]
    async fn vendor_endpoints_reject_customer_tokens() {
        let client = FixtureClient::new();
        let err = client
            .vendor_dashboard(&customer_token())
            .await
            .expect_err("should fail");
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[tokio::test]
    async fn calls_are_recorded() {
        let client = FixtureClient::new();
        let _ = client.categories().await;
        let _ = client.trending_products().await;
        assert_eq!(
            client.calls(),
            vec!["GET /categories", "GET /products/trending"]
        );
    }

    #[tokio::test]
    async fn place_order_empties_cart() {
        let client = FixtureClient::new();
        let token = customer_token();
        client
            .add_cart_item(&token, ProductId::new(1), 1)
            .await
            .expect("add");
        let order = client
            .place_order(
                &token,
                &PlaceOrderRequest {
                    payment_method: "Credit Card".to_owned(),
                    shipping_address: None,
                },
            )
            .await
            .expect("place");
        assert_eq!(order.summary.status, OrderStatus::Pending);
        assert!(client.cart(&token).await.expect("fetch").is_empty());
    }
}
