//! Vendora backend REST client.
//!
//! # Architecture
//!
//! - The backend is the source of truth - NO local persistence, direct API
//!   calls over JSON
//! - Every resource (auth, catalog, cart, orders, vendor, admin) is a flat
//!   trait of operations; [`MarketplaceApi`] is the blanket supertrait
//! - Two implementations, selected at composition time:
//!   - [`RestClient`] - real HTTP client (`reqwest`), catalog reads cached
//!     in-memory via `moka` (5 minute TTL)
//!   - [`FixtureClient`] - deterministic in-memory implementation for local
//!     development and tests
//!
//! # Example
//!
//! ```rust,ignore
//! use vendora_client::{CatalogApi, RestClient};
//!
//! let client = RestClient::new("http://localhost:8080/api")?;
//! let categories = client.categories().await?;
//! let product = client.product(ProductId::new(1)).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod api;
mod error;
mod fixtures;
pub mod listing;
mod rest;
pub mod types;

pub use api::{AdminApi, AuthApi, CartApi, CatalogApi, MarketplaceApi, OrdersApi, VendorApi};
pub use error::ApiError;
pub use fixtures::FixtureClient;
pub use rest::RestClient;
pub use types::*;
