//! Vendor profile and dashboard types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vendora_core::{ApprovalStatus, OrderId, OrderStatus, ProductId, UserId, VendorId};

use super::CategoryRef;

/// A vendor's store profile.
///
/// `approval_status` gates whether the product-management UI is enabled;
/// `rejection_reason` is only present after an admin rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorProfile {
    pub id: VendorId,
    pub user_id: UserId,
    pub store_name: String,
    #[serde(default)]
    pub store_description: Option<String>,
    #[serde(default)]
    pub store_address: Option<super::Address>,
    pub approval_status: ApprovalStatus,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub product_count: u32,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub joined_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
}

/// Profile fields a vendor may edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorProfileUpdate {
    pub store_name: String,
    pub store_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

/// Compact product row on the vendor dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDigest {
    pub id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub inventory: i64,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Compact order row on the vendor dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDigest {
    pub id: OrderId,
    pub order_number: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    pub status: OrderStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(default)]
    pub item_count: u32,
}

/// Aggregate payload backing the vendor dashboard page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorDashboard {
    pub vendor_profile: VendorProfile,
    #[serde(default)]
    pub product_count: u32,
    #[serde(default)]
    pub recent_products: Vec<ProductDigest>,
    #[serde(default)]
    pub order_count: u32,
    #[serde(default)]
    pub recent_orders: Vec<OrderDigest>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_revenue: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub previous_month_revenue: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_vendor_cannot_manage_products() {
        let json = r#"{
            "id": 2, "userId": 3,
            "storeName": "FashionFiesta",
            "storeDescription": "Trendy fashion for all",
            "approvalStatus": "PENDING",
            "rating": 0, "productCount": 0,
            "specialty": "Fashion"
        }"#;
        let profile: VendorProfile = serde_json::from_str(json).expect("deserialize");
        assert!(!profile.approval_status.can_manage_products());
        assert!(profile.rejection_reason.is_none());
    }
}
