//! Authentication and account types.

use serde::{Deserialize, Serialize};

use vendora_core::{Email, Role, UserId};

/// Opaque bearer token issued by the backend on login.
///
/// Implements `Debug` manually so the token never lands in logs.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a raw token string.
    #[must_use]
    pub const fn new(token: String) -> Self {
        Self(token)
    }

    /// The raw token value, for the `Authorization` header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("BearerToken").field(&"[REDACTED]").finish()
    }
}

/// A marketplace account as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub address: Option<Address>,
}

/// Postal address attached to users, stores, and orders.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub country: String,
    pub state: String,
    pub city: String,
    pub zip_code: String,
    pub street: String,
    #[serde(default)]
    pub is_default: Option<bool>,
}

/// Login credentials.
///
/// The backend accepts either an email or a username key; exactly one of
/// the two is serialized depending on how the identifier classified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub password: String,
}

impl LoginRequest {
    /// Classify `identifier` as an email (contains `@`) or a username and
    /// build the matching credential payload.
    #[must_use]
    pub fn classify(identifier: &str, password: &str) -> Self {
        if identifier.contains('@') {
            Self {
                email: Some(identifier.to_owned()),
                username: None,
                password: password.to_owned(),
            }
        } else {
            Self {
                email: None,
                username: Some(identifier.to_owned()),
                password: password.to_owned(),
            }
        }
    }
}

/// Successful login response: token plus the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: BearerToken,
    pub user: User,
}

/// Registration payload: personal data, address, and the vendor/store
/// fields that only accompany `Role::Vendor` registrations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
}

/// Registration outcome.
///
/// When the backend auto-authenticates it returns a token and user; when it
/// requires a separate login (or email verification) only the message is
/// present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub token: Option<BearerToken>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Generic acknowledgement body used by most mutation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMessage {
    #[serde(default = "default_true")]
    pub success: bool,
    pub message: String,
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_with_at_classifies_as_email() {
        let req = LoginRequest::classify("shopper@example.com", "pw");
        let json = serde_json::to_value(&req).expect("serialize");
        assert_eq!(json["email"], "shopper@example.com");
        assert!(json.get("username").is_none());
    }

    #[test]
    fn test_identifier_without_at_classifies_as_username() {
        let req = LoginRequest::classify("shopper", "pw");
        let json = serde_json::to_value(&req).expect("serialize");
        assert_eq!(json["username"], "shopper");
        assert!(json.get("email").is_none());
    }

    #[test]
    fn test_bearer_token_debug_is_redacted() {
        let token = BearerToken::new("super-secret-jwt".to_owned());
        let debug = format!("{token:?}");
        assert!(!debug.contains("super-secret-jwt"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_vendor_fields_omitted_for_customers() {
        let req = RegisterRequest {
            username: "shopper".into(),
            first_name: "Asha".into(),
            last_name: "Patel".into(),
            email: "asha@example.com".into(),
            phone_number: "+91 9876543210".into(),
            password: "pw".into(),
            role: Role::Customer,
            address: None,
            store_name: None,
            store_description: None,
            specialty: None,
        };
        let json = serde_json::to_value(&req).expect("serialize");
        assert!(json.get("storeName").is_none());
        assert_eq!(json["role"], "CUSTOMER");
    }
}
