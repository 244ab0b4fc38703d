//! Catalog types: categories, products, reviews.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use vendora_core::{CategoryId, ProductId, ReviewId, SubcategoryId, UserId, VendorId};

/// A top-level catalog category with its subcategories.
///
/// The tree is exactly two levels deep: category and subcategory. The
/// backend enforces this; nothing here recurses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub product_count: u32,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

/// Second-level catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub product_count: u32,
}

/// Category reference embedded in product records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Subcategory reference embedded in product records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryRef {
    pub id: SubcategoryId,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Vendor reference embedded in product records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorRef {
    pub id: VendorId,
    pub name: String,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// Product row as it appears in listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub original_price: Option<Decimal>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub subcategory: Option<SubcategoryRef>,
    #[serde(default)]
    pub vendor: Option<VendorRef>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub inventory: i64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ProductSummary {
    /// Whether the product is discounted. Derived, never stored.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.original_price.is_some_and(|original| original > self.price)
    }

    /// Discount as a whole percentage of the original price, when on sale.
    #[must_use]
    pub fn discount_percentage(&self) -> Option<u32> {
        let original = self.original_price?;
        if original <= self.price || original.is_zero() {
            return None;
        }
        let percent = (original - self.price) * Decimal::from(100) / original;
        percent.round().to_u32()
    }

    /// First image, for card rendering.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Full product record for the detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(flatten)]
    pub summary: ProductSummary,
    #[serde(default)]
    pub specifications: Vec<Specification>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub in_stock: Option<bool>,
}

impl Product {
    /// Whether the product can currently be added to a cart.
    #[must_use]
    pub fn available(&self) -> bool {
        self.in_stock.unwrap_or(self.summary.inventory > 0)
    }
}

/// Name/value specification row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specification {
    pub name: String,
    pub value: String,
}

/// A product review.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    #[serde(default)]
    pub user: Option<ReviewAuthor>,
    pub rating: u8,
    #[serde(default)]
    pub title: Option<String>,
    pub comment: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub helpful_count: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Author block embedded in a review.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAuthor {
    pub id: UserId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// New review submission payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub comment: String,
}

/// Query parameters passed through to paginated product endpoints.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Zero-based page number.
    pub page: Option<u32>,
    pub size: Option<u32>,
    /// Backend sort expression, e.g. `price,asc`.
    pub sort: Option<String>,
    /// Category slug filter.
    pub category: Option<String>,
    /// Free-text search term.
    pub q: Option<String>,
}

impl ProductQuery {
    /// Render as query pairs for the request URL.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size", size.to_string()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        pairs
    }

    /// Whether this is a plain page fetch safe to cache (no search term).
    #[must_use]
    pub const fn cacheable(&self) -> bool {
        self.q.is_none()
    }
}

/// Vendor-side product create/update payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub original_price: Option<Decimal>,
    pub category_id: CategoryId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory_id: Option<SubcategoryId>,
    pub inventory: i64,
    #[serde(default)]
    pub images: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(price: Decimal, original: Option<Decimal>) -> ProductSummary {
        ProductSummary {
            id: ProductId::new(1),
            name: "Widget".into(),
            description: None,
            price,
            original_price: original,
            images: vec![],
            category: None,
            subcategory: None,
            vendor: None,
            rating: 4.2,
            review_count: 10,
            inventory: 5,
            created_at: None,
        }
    }

    #[test]
    fn test_sale_flags_are_derived() {
        let on_sale = summary(Decimal::from(75), Some(Decimal::from(100)));
        assert!(on_sale.is_on_sale());
        assert_eq!(on_sale.discount_percentage(), Some(25));

        let full_price = summary(Decimal::from(100), None);
        assert!(!full_price.is_on_sale());
        assert_eq!(full_price.discount_percentage(), None);
    }

    #[test]
    fn test_original_price_below_price_is_not_a_sale() {
        let odd = summary(Decimal::from(100), Some(Decimal::from(80)));
        assert!(!odd.is_on_sale());
        assert_eq!(odd.discount_percentage(), None);
    }

    #[test]
    fn test_product_deserializes_from_backend_shape() {
        let json = r#"{
            "id": 7,
            "name": "Premium Headphones",
            "description": "Noise cancelling",
            "price": 2999,
            "originalPrice": 3999,
            "images": ["/img/7-main.jpg"],
            "category": {"id": 1, "name": "Electronics", "slug": "electronics"},
            "vendor": {"id": 2, "name": "ElectroHub", "rating": 4.8},
            "rating": 4.5,
            "reviewCount": 320,
            "inventory": 12,
            "specifications": [{"name": "Weight", "value": "250g"}],
            "reviews": []
        }"#;
        let product: Product = serde_json::from_str(json).expect("deserialize");
        assert_eq!(product.summary.name, "Premium Headphones");
        assert!(product.summary.is_on_sale());
        assert_eq!(product.summary.discount_percentage(), Some(25));
        assert_eq!(product.specifications.len(), 1);
        assert!(product.available());
    }

    #[test]
    fn test_product_query_pairs() {
        let query = ProductQuery {
            page: Some(2),
            size: Some(12),
            sort: Some("price,asc".into()),
            category: None,
            q: Some("phone".into()),
        };
        let pairs = query.to_pairs();
        assert!(pairs.contains(&("page", "2".to_string())));
        assert!(pairs.contains(&("q", "phone".to_string())));
        assert!(!query.cacheable());
        assert!(ProductQuery::default().cacheable());
    }
}
