//! Cart and wishlist types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vendora_core::{CartItemId, ProductId};

use super::VendorRef;

/// The customer's cart with backend-computed totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub total_items: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(default)]
    pub coupon_code: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub coupon_discount: Option<Decimal>,
}

impl Cart {
    /// An empty cart, used when the backend has no cart for the user yet.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            shipping: Decimal::ZERO,
            total: Decimal::ZERO,
            coupon_code: None,
            coupon_discount: None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub product: ProductBrief,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Compact product block embedded in cart and wishlist lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductBrief {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub original_price: Option<Decimal>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub vendor: Option<VendorRef>,
}

/// A saved wishlist entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub id: i64,
    pub product_id: ProductId,
    pub product: ProductBrief,
    #[serde(default)]
    pub added_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_deserializes_from_backend_shape() {
        let json = r#"{
            "id": 1,
            "userId": 1,
            "items": [
                {
                    "id": 10,
                    "product": {"id": 3, "name": "Mug", "image": null, "price": 499,
                                "vendor": {"id": 1, "name": "HomeDecorPlus"}},
                    "quantity": 2,
                    "price": 499
                }
            ],
            "totalItems": 2,
            "subtotal": 998,
            "tax": 180,
            "shipping": 100,
            "total": 1278,
            "couponCode": null,
            "couponDiscount": 0
        }"#;
        let cart: Cart = serde_json::from_str(json).expect("deserialize");
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total_items, 2);
        assert_eq!(cart.total, Decimal::from(1278));
        assert!(!cart.is_empty());
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::empty();
        assert!(cart.is_empty());
        assert_eq!(cart.total, Decimal::ZERO);
    }
}
