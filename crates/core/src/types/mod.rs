//! Core types for Pencil Gallery.
//!
//! This module provides type-safe wrappers for the gallery's domain concepts.

pub mod admin;
pub mod artwork;
pub mod category;
pub mod commission;
pub mod email;
pub mod id;
pub mod price;
pub mod sort;
pub mod status;

pub use admin::AdminIdentity;
pub use artwork::Artwork;
pub use category::{Category, CategoryError, CategoryFilter};
pub use commission::Commission;
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{Price, PriceError};
pub use sort::SortMode;
pub use status::ArtworkStatus;
