//! Artwork create, update and delete.
//!
//! The gateway only talks to the backend. It never touches a catalog store;
//! callers refetch after a successful call (see [`Dashboard`]).
//!
//! Updates are last-write-wins: there is no version check, so two admins
//! editing the same artwork at once will silently overwrite each other. The
//! gallery has a single admin in practice.
//!
//! [`Dashboard`]: crate::Dashboard

use chrono::Utc;
use pencil_gallery_core::{Artwork, ArtworkId, ArtworkStatus};
use tracing::{info, instrument};

use crate::draft::{ArtworkPatch, NewArtwork};
use crate::error::Result;
use crate::remote::ArtworkWriter;

/// Write access to artworks.
#[derive(Debug, Clone)]
pub struct MutationGateway<W> {
    writer: W,
}

impl<W: ArtworkWriter> MutationGateway<W> {
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Create an artwork. The backend assigns the id and timestamps.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the insert fails.
    #[instrument(skip(self, artwork), fields(title = %artwork.title))]
    pub async fn create(&self, artwork: &NewArtwork) -> Result<Artwork> {
        let created = self.writer.insert_artwork(artwork).await?;
        info!(artwork_id = %created.id, "Artwork created");
        Ok(created)
    }

    /// Apply `patch` and stamp a new update time.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the update fails or the row is gone.
    #[instrument(skip(self, patch), fields(artwork_id = %id))]
    pub async fn update(&self, id: ArtworkId, patch: &ArtworkPatch) -> Result<Artwork> {
        let updated = self.writer.update_artwork(id, patch, Utc::now()).await?;
        info!("Artwork updated");
        Ok(updated)
    }

    /// Hard-delete an artwork.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the delete fails.
    #[instrument(skip(self), fields(artwork_id = %id))]
    pub async fn delete(&self, id: ArtworkId) -> Result<()> {
        self.writer.delete_artwork(id).await?;
        info!("Artwork deleted");
        Ok(())
    }

    /// Flip the featured flag.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the update fails.
    pub async fn toggle_featured(&self, artwork: &Artwork) -> Result<Artwork> {
        self.update(artwork.id, &ArtworkPatch::with_featured(!artwork.featured))
            .await
    }

    /// Mark a sold artwork available again, or anything else sold.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the update fails.
    pub async fn toggle_sold(&self, artwork: &Artwork) -> Result<Artwork> {
        self.set_status(artwork.id, artwork.status.toggled_sold())
            .await
    }

    /// Set the sale status.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the update fails.
    pub async fn set_status(&self, id: ArtworkId, status: ArtworkStatus) -> Result<Artwork> {
        self.update(id, &ArtworkPatch::with_status(status)).await
    }
}
