//! Wire types for the marketplace backend.
//!
//! All records are backend-owned; these are transient, render-scoped copies
//! deserialized from JSON (camelCase on the wire). Monetary amounts arrive
//! as JSON numbers and are held as `rust_decimal::Decimal` via the `float`
//! serde adapter.

mod admin;
mod auth;
mod cart;
mod catalog;
mod orders;
mod vendor;

pub use admin::*;
pub use auth::*;
pub use cart::*;
pub use catalog::*;
pub use orders::*;
pub use vendor::*;
