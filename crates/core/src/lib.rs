//! Velora Core - Shared types library.
//!
//! This crate provides the framework-independent building blocks used by the
//! storefront binary and the integration tests:
//! - [`locale`] - The fixed set of supported locales
//! - [`routes`] - The declarative, locale-aware route table and its resolver
//! - [`query_key`] - Hierarchical cache-key factories for remote data
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no async. This keeps it lightweight and allows the routing and
//! cache-key logic to be tested without standing up a server.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod locale;
pub mod query_key;
pub mod routes;

pub use locale::Locale;
pub use query_key::QueryKey;
pub use routes::{Resolution, Route, RouteId};
