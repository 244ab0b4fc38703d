//! Auth session service.
//!
//! Single owner of session writes. A logged-in user exists in exactly three
//! places, always updated together:
//!
//! 1. the session record (bearer token + user, read by page handlers),
//! 2. the `user` mirror cookie (read exclusively by the route guard),
//! 3. the per-request extracted state (`RequireAuth` / `OptionalAuth`).
//!
//! Every operation that changes who is logged in returns the cookie to set
//! alongside the session write, so the two can never drift apart. A session
//! record that fails to decode is treated as corruption: all session
//! artifacts are cleared and the user is anonymous from the next check.

mod error;

pub use error::AuthError;

use axum_extra::extract::cookie::{Cookie, SameSite};
use tower_sessions::Session;

use vendora_client::{
    AuthApi, BearerToken, LoginRequest, MarketplaceApi, RegisterRequest, VendorApi,
    VendorDashboard,
};

use crate::models::{CurrentUser, session_keys};

/// Name of the mirror cookie consumed by the route guard.
pub const USER_COOKIE: &str = "user";

/// Mirror cookie lifetime (one day, matching the backend token lifetime).
const USER_COOKIE_MAX_AGE: time::Duration = time::Duration::days(1);

/// Outcome of a registration attempt.
pub enum RegisterOutcome {
    /// The backend returned a token and user: the caller is now logged in
    /// and must add the cookie to the response.
    AutoAuthenticated {
        user: CurrentUser,
        cookie: Cookie<'static>,
    },
    /// Registered without auto-login; show the message on the login page.
    Registered { message: String },
}

/// Log in with a username-or-email identifier.
///
/// The identifier is classified as an email when it contains `@`. On
/// success the session and the mirror cookie are produced together; the
/// caller is responsible for display and redirect.
///
/// # Errors
///
/// Returns [`AuthError::Rejected`] with the backend's message on bad
/// credentials, [`AuthError::Unavailable`] when the backend is down.
pub async fn login(
    api: &dyn MarketplaceApi,
    session: &Session,
    identifier: &str,
    password: &str,
) -> Result<(CurrentUser, Cookie<'static>), AuthError> {
    let credentials = LoginRequest::classify(identifier, password);
    let response = api.login(&credentials).await.map_err(AuthError::from_api)?;

    let user = CurrentUser::from(response.user);
    store_session(session, &user, &response.token).await?;

    crate::error::set_sentry_user(&user.id, Some(user.email.as_str()));
    tracing::info!(user_id = %user.id, role = %user.role, "user logged in");

    Ok((user.clone(), user_cookie(&user)))
}

/// Log out: flush the session and return the cookie removal.
pub async fn logout(session: &Session) -> Cookie<'static> {
    if let Err(e) = session.flush().await {
        tracing::error!(error = %e, "failed to flush session on logout");
    }
    crate::error::clear_sentry_user();
    clear_user_cookie()
}

/// Register a new account, auto-authenticating when the backend returns a
/// token and user.
///
/// # Errors
///
/// Returns [`AuthError::Rejected`] with the backend's message when the
/// registration is refused.
pub async fn register(
    api: &dyn MarketplaceApi,
    session: &Session,
    payload: &RegisterRequest,
) -> Result<RegisterOutcome, AuthError> {
    let response = api.register(payload).await.map_err(AuthError::from_api)?;

    if !response.success {
        return Err(AuthError::Rejected(response.message));
    }

    if let (Some(token), Some(user)) = (response.token, response.user) {
        let user = CurrentUser::from(user);
        store_session(session, &user, &token).await?;
        tracing::info!(user_id = %user.id, role = %user.role, "registered and auto-authenticated");
        return Ok(RegisterOutcome::AutoAuthenticated {
            cookie: user_cookie(&user),
            user,
        });
    }

    Ok(RegisterOutcome::Registered {
        message: response.message,
    })
}

/// Session check: the current user, or `None` when anonymous.
///
/// An undecodable stored record is treated as corruption: the whole session
/// is cleared silently and the caller sees an anonymous state.
pub async fn current_user(session: &Session) -> Option<CurrentUser> {
    match session.get::<CurrentUser>(session_keys::CURRENT_USER).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "corrupted session record, clearing session");
            let _ = session.flush().await;
            None
        }
    }
}

/// The stored bearer token, or `None` when anonymous or corrupted.
pub async fn bearer_token(session: &Session) -> Option<BearerToken> {
    match session.get::<BearerToken>(session_keys::BEARER_TOKEN).await {
        Ok(token) => token,
        Err(e) => {
            tracing::warn!(error = %e, "corrupted session token, clearing session");
            let _ = session.flush().await;
            None
        }
    }
}

/// Fetch the vendor dashboard aggregate for the logged-in vendor.
///
/// Returns `None` on any failure (missing token, backend error) so the
/// page can show a retry affordance instead of crashing.
pub async fn vendor_dashboard(
    api: &dyn MarketplaceApi,
    session: &Session,
) -> Option<VendorDashboard> {
    let token = bearer_token(session).await?;
    match api.vendor_dashboard(&token).await {
        Ok(dashboard) => Some(dashboard),
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch vendor dashboard");
            None
        }
    }
}

/// Write the user and token into the session store.
async fn store_session(
    session: &Session,
    user: &CurrentUser,
    token: &BearerToken,
) -> Result<(), AuthError> {
    session.insert(session_keys::CURRENT_USER, user).await?;
    session.insert(session_keys::BEARER_TOKEN, token).await?;
    Ok(())
}

/// Build the `user` mirror cookie: URL-encoded JSON of the session user.
#[must_use]
pub fn user_cookie(user: &CurrentUser) -> Cookie<'static> {
    let json = serde_json::to_string(user).unwrap_or_default();
    let mut cookie = Cookie::new(USER_COOKIE, urlencoding::encode(&json).into_owned());
    cookie.set_path("/");
    cookie.set_same_site(SameSite::Lax);
    cookie.set_http_only(true);
    cookie.set_max_age(USER_COOKIE_MAX_AGE);
    cookie
}

/// Build the removal form of the `user` cookie.
#[must_use]
pub fn clear_user_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(USER_COOKIE, "");
    cookie.set_path("/");
    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(time::Duration::ZERO);
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use vendora_core::{Role, UserId};

    fn test_user() -> CurrentUser {
        CurrentUser {
            id: UserId::new(1),
            username: "shopper".to_owned(),
            first_name: "Asha".to_owned(),
            last_name: "Patel".to_owned(),
            email: vendora_core::Email::parse("shopper@example.com").expect("valid"),
            phone_number: None,
            role: Role::Customer,
            address: None,
        }
    }

    #[test]
    fn test_user_cookie_round_trips_through_guard_decoding() {
        let cookie = user_cookie(&test_user());
        assert_eq!(cookie.name(), USER_COOKIE);

        let decoded = urlencoding::decode(cookie.value()).expect("percent-decode");
        let parsed: CurrentUser = serde_json::from_str(&decoded).expect("json");
        assert_eq!(parsed.username, "shopper");
        assert_eq!(parsed.role, Role::Customer);
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = clear_user_cookie();
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }
}
