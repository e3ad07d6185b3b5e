//! Pencil Gallery client library.
//!
//! Everything between the screens and the hosted backend lives here:
//!
//! - [`supabase`] - `reqwest` client for the data API, the `admin-auth`
//!   function and the image bucket
//! - [`remote`] - the traits the rest of the crate talks to, so the catalog,
//!   gateway and session gate can run against a fake in tests
//! - [`catalog`] - in-memory catalog store with filtered/sorted views
//! - [`mutations`] - create/update/delete of artworks
//! - [`dashboard`] - catalog + gateway with the refetch-after-mutation policy
//! - [`session`] - admin session gate and persisted token store
//!
//! # Example
//!
//! ```rust,ignore
//! use pencil_gallery_client::{BackendConfig, CatalogStore, SupabaseClient};
//! use pencil_gallery_core::{CategoryFilter, SortMode};
//!
//! let client = SupabaseClient::new(&BackendConfig::from_env()?);
//! let mut catalog = CatalogStore::new();
//! catalog.refresh(&client).await;
//! let view = catalog.view(CategoryFilter::All, SortMode::PriceAsc);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod draft;
pub mod error;
pub mod mutations;
pub mod remote;
pub mod session;
pub mod supabase;

#[cfg(test)]
pub(crate) mod fake;

pub use catalog::{CatalogStats, CatalogStore, CatalogView, neighbours};
pub use config::{BackendConfig, ConfigError, SessionConfig};
pub use dashboard::Dashboard;
pub use draft::{ArtworkDraft, ArtworkFields, ArtworkPatch, NewArtwork};
pub use error::{GalleryError, Result, ValidationError};
pub use mutations::MutationGateway;
pub use remote::{ArtworkWriter, AuthApi, AuthSession, CatalogSource, ImageStore, ResetRequest};
pub use session::{
    DemoAccount, FileTokenStore, MemoryTokenStore, SessionGate, SessionState, TokenStore,
    TokenStoreError,
};
pub use supabase::SupabaseClient;
