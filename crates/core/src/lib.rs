//! Vendora Core - Shared types library.
//!
//! This crate provides common types used across all Vendora components:
//! - `client` - Typed REST client for the marketplace backend
//! - `web` - Server-rendered marketplace front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, roles, statuses, and
//!   pagination envelopes
//! - [`slug`] - URL slug derivation for category names

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod slug;
pub mod types;

pub use types::*;
