//! HTTP middleware stack for the front end.
//!
//! # Middleware Order (inside to outside in the Router)
//!
//! 1. Session layer (tower-sessions, in-memory store)
//! 2. Route guard (role/path authorization from the `user` cookie)
//! 3. Request ID (add unique ID to each request)
//! 4. Sentry layers (capture errors, added in `main`)

pub mod auth;
pub mod request_id;
pub mod route_guard;
pub mod session;

pub use auth::{AuthRejection, OptionalAuth, RequireAuth};
pub use request_id::request_id_middleware;
pub use route_guard::{RouteDecision, authorize, route_guard};
pub use session::create_session_layer;
