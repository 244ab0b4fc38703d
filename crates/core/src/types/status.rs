//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Vendor approval lifecycle state.
///
/// Gates whether a vendor may manage products. Set exclusively by admins
/// through the approval workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    /// Whether the vendor may list and edit products.
    #[must_use]
    pub const fn can_manage_products(self) -> bool {
        matches!(self, Self::Approved)
    }
}

/// Order fulfillment status as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether the customer may still cancel the order.
    #[must_use]
    pub const fn cancellable(self) -> bool {
        matches!(self, Self::Pending | Self::Processing)
    }
}

/// Payment status attached to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Approved => write!(f, "Approved"),
            Self::Rejected => write!(f, "Rejected"),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Processing => write!(f, "Processing"),
            Self::Shipped => write!(f, "Shipped"),
            Self::Delivered => write!(f, "Delivered"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Paid => write!(f, "Paid"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approval_status_wire_format() {
        let json = serde_json::to_string(&ApprovalStatus::Approved).expect("serialize");
        assert_eq!(json, "\"APPROVED\"");
    }

    #[test]
    fn test_only_approved_can_manage_products() {
        assert!(ApprovalStatus::Approved.can_manage_products());
        assert!(!ApprovalStatus::Pending.can_manage_products());
        assert!(!ApprovalStatus::Rejected.can_manage_products());
    }

    #[test]
    fn test_cancellable_orders() {
        assert!(OrderStatus::Pending.cancellable());
        assert!(OrderStatus::Processing.cancellable());
        assert!(!OrderStatus::Shipped.cancellable());
        assert!(!OrderStatus::Delivered.cancellable());
        assert!(!OrderStatus::Cancelled.cancellable());
    }
}
