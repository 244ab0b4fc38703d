//! Account roles.

use serde::{Deserialize, Serialize};

/// Role attached to a marketplace account.
///
/// The backend serializes roles in `SCREAMING_SNAKE_CASE`; the same spelling
/// appears inside the `user` cookie consumed by the route guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Regular shopper: browse, cart, wishlist, orders.
    Customer,
    /// Store owner: product management, vendor dashboard.
    Vendor,
    /// Marketplace operator: vendor approval, category management.
    Admin,
}

impl Role {
    /// The dashboard landing page for this role.
    #[must_use]
    pub const fn dashboard_path(self) -> &'static str {
        match self {
            Self::Customer => "/customer/dashboard",
            Self::Vendor => "/vendor/dashboard",
            Self::Admin => "/admin/dashboard",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "CUSTOMER"),
            Self::Vendor => write!(f, "VENDOR"),
            Self::Admin => write!(f, "ADMIN"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CUSTOMER" => Ok(Self::Customer),
            "VENDOR" => Ok(Self::Vendor),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        let json = serde_json::to_string(&Role::Vendor).expect("serialize");
        assert_eq!(json, "\"VENDOR\"");
        let back: Role = serde_json::from_str("\"CUSTOMER\"").expect("deserialize");
        assert_eq!(back, Role::Customer);
    }

    #[test]
    fn test_dashboard_paths() {
        assert_eq!(Role::Customer.dashboard_path(), "/customer/dashboard");
        assert_eq!(Role::Vendor.dashboard_path(), "/vendor/dashboard");
        assert_eq!(Role::Admin.dashboard_path(), "/admin/dashboard");
    }

    #[test]
    fn test_role_from_str_rejects_unknown() {
        assert!("MODERATOR".parse::<Role>().is_err());
    }
}
