//! Pencil Gallery Storefront library.
//!
//! This crate provides the public gallery site as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod routes;
pub mod site;
pub mod state;
