//! Admin dashboard: the catalog plus the mutation gateway.
//!
//! Every successful mutation is followed by a full catalog refetch. A failed
//! mutation returns its error and leaves the loaded catalog as it was.

use pencil_gallery_core::{Artwork, ArtworkId, ArtworkStatus};
use tracing::instrument;

use crate::catalog::{CatalogStats, CatalogStore};
use crate::draft::{ArtworkDraft, ArtworkFields, ArtworkPatch};
use crate::error::{Result, ValidationError};
use crate::mutations::MutationGateway;
use crate::remote::{ArtworkWriter, CatalogSource, ImageStore};

/// Artwork management for an authenticated admin.
#[derive(Debug)]
pub struct Dashboard<B> {
    backend: B,
    gateway: MutationGateway<B>,
    catalog: CatalogStore<Artwork>,
}

impl<B> Dashboard<B>
where
    B: CatalogSource + ArtworkWriter + Clone,
{
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            gateway: MutationGateway::new(backend.clone()),
            backend,
            catalog: CatalogStore::new(),
        }
    }

    /// Fetch the full catalog.
    pub async fn load(&mut self) {
        self.catalog.refresh(&self.backend).await;
    }

    /// Fetch the full catalog, handing a failed fetch back to the caller.
    /// The previously loaded catalog is kept on failure.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the catalog cannot be fetched.
    pub async fn try_load(&mut self) -> Result<()> {
        let artworks = self.backend.artworks().await?;
        self.catalog = CatalogStore::loaded(artworks);
        Ok(())
    }

    #[must_use]
    pub const fn catalog(&self) -> &CatalogStore<Artwork> {
        &self.catalog
    }

    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        self.catalog.stats()
    }

    /// Submit the artwork form: create when `editing` is `None`, otherwise
    /// replace every form field of that artwork.
    ///
    /// New artworks are placed after everything currently loaded.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any remote call if the draft is
    /// incomplete, or the backend's error if the write fails.
    #[instrument(skip(self, draft))]
    pub async fn save(&mut self, draft: ArtworkDraft, editing: Option<ArtworkId>) -> Result<Artwork> {
        let fields = draft.validate()?;
        self.write(fields, editing).await
    }

    async fn write(&mut self, fields: ArtworkFields, editing: Option<ArtworkId>) -> Result<Artwork> {
        let saved = match editing {
            Some(id) => self.gateway.update(id, &ArtworkPatch::from(fields)).await?,
            None => {
                let new = fields.into_new(self.catalog.next_display_order());
                self.gateway.create(&new).await?
            }
        };
        self.load().await;
        Ok(saved)
    }

    /// Delete an artwork.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the delete fails.
    pub async fn remove(&mut self, id: ArtworkId) -> Result<()> {
        self.gateway.delete(id).await?;
        self.load().await;
        Ok(())
    }

    /// Flip the featured flag of a loaded artwork.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownArtwork`] if `id` is not loaded, or
    /// the backend's error if the update fails.
    pub async fn toggle_featured(&mut self, id: ArtworkId) -> Result<Artwork> {
        let artwork = self.loaded(id)?;
        let updated = self.gateway.toggle_featured(&artwork).await?;
        self.load().await;
        Ok(updated)
    }

    /// Toggle a loaded artwork between sold and available.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownArtwork`] if `id` is not loaded, or
    /// the backend's error if the update fails.
    pub async fn toggle_sold(&mut self, id: ArtworkId) -> Result<Artwork> {
        let artwork = self.loaded(id)?;
        let updated = self.gateway.toggle_sold(&artwork).await?;
        self.load().await;
        Ok(updated)
    }

    /// Set the sale status of an artwork.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the update fails.
    pub async fn set_status(&mut self, id: ArtworkId, status: ArtworkStatus) -> Result<Artwork> {
        let updated = self.gateway.set_status(id, status).await?;
        self.load().await;
        Ok(updated)
    }

    fn loaded(&self, id: ArtworkId) -> Result<Artwork> {
        self.catalog
            .find(id)
            .cloned()
            .ok_or_else(|| ValidationError::UnknownArtwork(id).into())
    }
}

impl<B> Dashboard<B>
where
    B: CatalogSource + ArtworkWriter + ImageStore + Clone,
{
    /// Submit the artwork form with a new image file.
    ///
    /// The form is checked first, with the file standing in for the image,
    /// so nothing is uploaded for a form that would be rejected.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any remote call if the draft is
    /// incomplete or the file is not an accepted image type; otherwise the
    /// upload or write error.
    #[instrument(skip(self, draft, bytes), fields(size = bytes.len()))]
    pub async fn save_with_image(
        &mut self,
        mut draft: ArtworkDraft,
        editing: Option<ArtworkId>,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Artwork> {
        draft.image_url = file_name.to_string();
        let mut fields = draft.validate()?;
        fields.image_url = self.backend.upload_image(file_name, bytes).await?;
        self.write(fields, editing).await
    }
}
