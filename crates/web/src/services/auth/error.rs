//! Authentication service errors.

use thiserror::Error;

use vendora_client::ApiError;

/// Errors surfaced by the auth session service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend rejected the operation; the message is safe to display.
    #[error("{0}")]
    Rejected(String),

    /// The backend could not be reached.
    #[error("The marketplace is temporarily unavailable. Please try again.")]
    Unavailable,

    /// The session store failed.
    #[error("session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl AuthError {
    /// Map a backend API error into an auth error with a displayable
    /// message.
    #[must_use]
    pub fn from_api(err: ApiError) -> Self {
        match err {
            ApiError::Backend { message, .. } => Self::Rejected(message),
            ApiError::Unauthorized => Self::Rejected("Invalid username or password".to_owned()),
            ApiError::NotFound(_) => Self::Rejected("Account not found".to_owned()),
            ApiError::Http(_) | ApiError::Parse(_) => Self::Unavailable,
        }
    }
}
