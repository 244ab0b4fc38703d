//! Route authorization middleware.
//!
//! Runs before any handler (and before the session layer), deciding purely
//! from the request path and the `user` mirror cookie whether the request
//! may proceed or must be redirected. The decision is a pure function of
//! (role-or-absence, path): same inputs, same answer, no I/O.
//!
//! The cookie's shape is trusted as-is; its signature is not verified.
//! Handlers behind protected prefixes still re-check the session, so a
//! forged cookie changes redirects but never exposes data.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use vendora_core::Role;

use crate::services::auth::USER_COOKIE;

/// Prefixes that require a session of any role.
const PROTECTED_PREFIXES: [&str; 3] = ["/vendor", "/admin", "/customer"];

/// The guard's verdict for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Let the request through to the handler.
    Allow,
    /// Redirect before any page code runs.
    Redirect(&'static str),
}

/// Decide whether `path` may be served to a visitor with `role`
/// (`None` = anonymous), applying the precedence order:
///
/// 1. no session + protected prefix -> `/login`
/// 2. vendor/admin on a customer-facing page -> own dashboard
/// 3. customer under `/vendor` -> `/`
/// 4. customer or vendor under `/admin` -> `/`
/// 5. otherwise allow
#[must_use]
pub fn authorize(role: Option<Role>, path: &str) -> RouteDecision {
    let Some(role) = role else {
        if PROTECTED_PREFIXES
            .iter()
            .any(|prefix| path.starts_with(prefix))
        {
            return RouteDecision::Redirect("/login");
        }
        return RouteDecision::Allow;
    };

    let customer_facing =
        path == "/" || path.starts_with("/products") || path.starts_with("/categories");

    match role {
        Role::Vendor if customer_facing => RouteDecision::Redirect("/vendor/dashboard"),
        Role::Admin if customer_facing => RouteDecision::Redirect("/admin/dashboard"),
        Role::Customer if path.starts_with("/vendor") => RouteDecision::Redirect("/"),
        Role::Customer | Role::Vendor if path.starts_with("/admin") => {
            RouteDecision::Redirect("/")
        }
        _ => RouteDecision::Allow,
    }
}

/// The only field of the cookie the guard reads.
#[derive(Deserialize)]
struct GuardUser {
    role: Role,
}

/// Decode the role from the `user` cookie value.
///
/// The value is URL-encoded JSON; anything that fails to decode or parse
/// is treated as an anonymous visitor.
fn role_from_cookie(value: &str) -> Option<Role> {
    let decoded = urlencoding::decode(value).ok()?;
    serde_json::from_str::<GuardUser>(&decoded)
        .map(|user| user.role)
        .ok()
}

/// Axum middleware applying [`authorize`] to every request.
pub async fn route_guard(jar: CookieJar, request: Request, next: Next) -> Response {
    let role = jar
        .get(USER_COOKIE)
        .and_then(|cookie| role_from_cookie(cookie.value()));

    match authorize(role, request.uri().path()) {
        RouteDecision::Allow => next.run(request).await,
        RouteDecision::Redirect(target) => {
            tracing::debug!(path = %request.uri().path(), target, "route guard redirect");
            Redirect::to(target).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_blocked_from_protected_prefixes() {
        for path in ["/vendor/dashboard", "/admin/vendors", "/customer/orders"] {
            assert_eq!(authorize(None, path), RouteDecision::Redirect("/login"));
        }
    }

    #[test]
    fn test_anonymous_allowed_on_public_pages() {
        for path in ["/", "/products", "/products/3", "/categories", "/category/fashion", "/product/9", "/login", "/register"] {
            assert_eq!(authorize(None, path), RouteDecision::Allow);
        }
    }

    #[test]
    fn test_vendor_and_admin_pushed_off_customer_pages() {
        assert_eq!(
            authorize(Some(Role::Vendor), "/"),
            RouteDecision::Redirect("/vendor/dashboard")
        );
        assert_eq!(
            authorize(Some(Role::Vendor), "/products"),
            RouteDecision::Redirect("/vendor/dashboard")
        );
        assert_eq!(
            authorize(Some(Role::Admin), "/categories"),
            RouteDecision::Redirect("/admin/dashboard")
        );
    }

    #[test]
    fn test_customer_blocked_from_vendor_and_admin() {
        assert_eq!(
            authorize(Some(Role::Customer), "/vendor/products"),
            RouteDecision::Redirect("/")
        );
        assert_eq!(
            authorize(Some(Role::Customer), "/admin/vendors"),
            RouteDecision::Redirect("/")
        );
    }

    #[test]
    fn test_vendor_blocked_from_admin() {
        assert_eq!(
            authorize(Some(Role::Vendor), "/admin/dashboard"),
            RouteDecision::Redirect("/")
        );
    }

    #[test]
    fn test_roles_allowed_in_their_own_sections() {
        assert_eq!(
            authorize(Some(Role::Vendor), "/vendor/products"),
            RouteDecision::Allow
        );
        assert_eq!(
            authorize(Some(Role::Admin), "/admin/categories"),
            RouteDecision::Allow
        );
        assert_eq!(
            authorize(Some(Role::Customer), "/products"),
            RouteDecision::Allow
        );
        assert_eq!(
            authorize(Some(Role::Customer), "/customer/dashboard"),
            RouteDecision::Allow
        );
    }

    #[test]
    fn test_decision_is_deterministic() {
        // Same inputs always yield the same decision
        for _ in 0..3 {
            assert_eq!(
                authorize(Some(Role::Vendor), "/"),
                RouteDecision::Redirect("/vendor/dashboard")
            );
        }
    }

    #[test]
    fn test_cookie_decoding() {
        let json = r#"{"id":2,"username":"vendor","role":"VENDOR"}"#;
        let encoded = urlencoding::encode(json).into_owned();
        assert_eq!(role_from_cookie(&encoded), Some(Role::Vendor));
    }

    #[test]
    fn test_corrupted_cookie_is_anonymous() {
        assert_eq!(role_from_cookie("not-json"), None);
        assert_eq!(role_from_cookie("%7B%22role%22%3A%22WIZARD%22%7D"), None);
        assert_eq!(role_from_cookie(""), None);
    }
}
