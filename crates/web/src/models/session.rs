//! Session-related types.
//!
//! Types stored in the session for authentication state. The same record
//! is mirrored, URL-encoded, into the `user` cookie read by the route
//! guard; the two are always written together.

use serde::{Deserialize, Serialize};

use vendora_core::{Email, Role, UserId};

/// Session-stored user identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub address: Option<vendora_client::Address>,
}

impl CurrentUser {
    /// Full display name for page headers.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl From<vendora_client::User> for CurrentUser {
    fn from(user: vendora_client::User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone_number: user.phone_number,
            role: user.role,
            address: user.address,
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for storing the backend bearer token.
    pub const BEARER_TOKEN: &str = "bearer_token";
}
