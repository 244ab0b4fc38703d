//! Admin-only types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payload for rejecting a vendor application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectVendorRequest {
    pub reason: String,
}

/// Category create/update payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    pub slug: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

/// Subcategory create payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryInput {
    pub name: String,
    pub slug: String,
}

/// Aggregate counters backing the admin dashboard page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    #[serde(default)]
    pub total_vendors: u32,
    #[serde(default)]
    pub pending_vendors: u32,
    #[serde(default)]
    pub total_customers: u64,
    #[serde(default)]
    pub total_products: u64,
    #[serde(default)]
    pub total_orders: u64,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_revenue: Option<Decimal>,
}
