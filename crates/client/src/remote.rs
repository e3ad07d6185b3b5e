//! The seams between the client logic and the hosted backend.
//!
//! [`SupabaseClient`](crate::SupabaseClient) implements all four traits. The
//! catalog store, mutation gateway and session gate are generic over them so
//! tests can swap in an in-memory backend.

use std::future::Future;

use chrono::{DateTime, Utc};
use pencil_gallery_core::{AdminIdentity, Artwork, ArtworkId, Commission, Email};
use secrecy::SecretString;

use crate::draft::{ArtworkPatch, NewArtwork};
use crate::error::Result;

/// Read access to the public catalog tables.
pub trait CatalogSource: Send + Sync {
    /// All artworks by ascending display order.
    fn artworks(&self) -> impl Future<Output = Result<Vec<Artwork>>> + Send;

    /// Featured artworks by ascending display order.
    fn featured_artworks(&self) -> impl Future<Output = Result<Vec<Artwork>>> + Send;

    /// All commission showcase records, newest first.
    fn commissions(&self) -> impl Future<Output = Result<Vec<Commission>>> + Send;
}

/// Write access to the artwork table.
pub trait ArtworkWriter: Send + Sync {
    /// Insert a new row and return it as stored.
    fn insert_artwork(&self, artwork: &NewArtwork)
    -> impl Future<Output = Result<Artwork>> + Send;

    /// Apply a partial update, stamping `updated_at`, and return the row.
    fn update_artwork(
        &self,
        id: ArtworkId,
        patch: &ArtworkPatch,
        updated_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<Artwork>> + Send;

    /// Delete by id. Deleting a missing row is not an error.
    fn delete_artwork(&self, id: ArtworkId) -> impl Future<Output = Result<()>> + Send;
}

/// The admin auth function.
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a session.
    fn login(
        &self,
        email: &Email,
        password: &str,
    ) -> impl Future<Output = Result<AuthSession>> + Send;

    /// Create an admin account. Does not start a session.
    fn register(
        &self,
        name: &str,
        email: &Email,
        password: &str,
    ) -> impl Future<Output = Result<AdminIdentity>> + Send;

    /// `Ok(None)` when the token is no longer valid.
    fn verify(&self, token: &str) -> impl Future<Output = Result<Option<AdminIdentity>>> + Send;

    /// Invalidate the token on the backend.
    fn logout(&self, token: &str) -> impl Future<Output = Result<()>> + Send;

    /// Ask for a password reset email.
    fn request_reset(&self, email: &Email) -> impl Future<Output = Result<ResetRequest>> + Send;

    /// Complete a password reset.
    fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Object storage for artwork images.
pub trait ImageStore: Send + Sync {
    /// Upload image bytes and return their public URL.
    fn upload_image(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// A freshly issued admin session.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub identity: AdminIdentity,
    pub token: SecretString,
}

/// Outcome of a password reset request.
///
/// Development deployments of the auth function echo the reset token back
/// instead of emailing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetRequest {
    pub reset_token: Option<String>,
}
