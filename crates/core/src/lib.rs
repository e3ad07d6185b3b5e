//! Pencil Gallery Core - Shared domain types.
//!
//! This crate provides the types shared by every Pencil Gallery component:
//! - `client` - Remote backend client, catalog store and session gate
//! - `storefront` - Public gallery site
//! - `cli` - Administrative command-line surface
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Filtering and sorting of catalog records live here because they
//! are pure functions over in-memory slices.
//!
//! # Modules
//!
//! - [`types`] - Ids, emails, prices, categories, statuses and records
//! - [`views`] - Category filter and stable sort over record slices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod views;

pub use types::*;
pub use views::{filter_by_category, sort_artworks};
