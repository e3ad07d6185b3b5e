//! `PostgREST` data API: catalog reads and artwork writes.

use chrono::{DateTime, Utc};
use pencil_gallery_core::{Artwork, ArtworkId, Commission};
use reqwest::Method;
use tracing::{debug, instrument};
use url::Url;

use super::rows::{ArtworkPatchRow, ArtworkRow, NewArtworkRow};
use super::{SupabaseClient, decode, decode_rows};
use crate::draft::{ArtworkPatch, NewArtwork};
use crate::error::{GalleryError, Result};
use crate::remote::{ArtworkWriter, CatalogSource};

const ARTWORKS: &str = "rest/v1/artworks";
const COMMISSIONS: &str = "rest/v1/commissions";

impl SupabaseClient {
    /// Table URL with `PostgREST` query parameters appended.
    fn table(&self, table: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.endpoint(table)?;
        url.query_pairs_mut().extend_pairs(params);
        Ok(url)
    }

    async fn select_artworks(&self, params: &[(&str, &str)]) -> Result<Vec<Artwork>> {
        let url = self.table(ARTWORKS, params)?;
        let body = self.execute_ok(self.request(Method::GET, url)).await?;
        let rows: Vec<ArtworkRow> = decode_rows(&body, ARTWORKS)?;
        debug!(count = rows.len(), "Fetched artworks");
        Ok(rows.into_iter().map(Artwork::from).collect())
    }

    /// First row of a `return=representation` response.
    fn single_artwork(body: &str) -> Result<Artwork> {
        let rows: Vec<ArtworkRow> = decode(body)?;
        rows.into_iter()
            .next()
            .map(Artwork::from)
            .ok_or_else(|| GalleryError::remote("Artwork not found"))
    }
}

impl CatalogSource for SupabaseClient {
    #[instrument(skip(self))]
    async fn artworks(&self) -> Result<Vec<Artwork>> {
        self.select_artworks(&[("select", "*"), ("order", "display_order.asc")])
            .await
    }

    #[instrument(skip(self))]
    async fn featured_artworks(&self) -> Result<Vec<Artwork>> {
        self.select_artworks(&[
            ("select", "*"),
            ("is_featured", "eq.true"),
            ("order", "display_order.asc"),
        ])
        .await
    }

    #[instrument(skip(self))]
    async fn commissions(&self) -> Result<Vec<Commission>> {
        let url = self.table(
            COMMISSIONS,
            &[("select", "*"), ("order", "created_at.desc")],
        )?;
        let body = self.execute_ok(self.request(Method::GET, url)).await?;
        let commissions: Vec<Commission> = decode_rows(&body, COMMISSIONS)?;
        debug!(count = commissions.len(), "Fetched commissions");
        Ok(commissions)
    }
}

impl ArtworkWriter for SupabaseClient {
    #[instrument(skip(self, artwork), fields(title = %artwork.title))]
    async fn insert_artwork(&self, artwork: &NewArtwork) -> Result<Artwork> {
        let url = self.table(ARTWORKS, &[("select", "*")])?;
        let request = self
            .request(Method::POST, url)
            .header("Prefer", "return=representation")
            .json(&[NewArtworkRow::from(artwork)]);
        let body = self.execute_ok(request).await?;
        Self::single_artwork(&body)
    }

    #[instrument(skip(self, patch), fields(artwork_id = %id))]
    async fn update_artwork(
        &self,
        id: ArtworkId,
        patch: &ArtworkPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Artwork> {
        let filter = format!("eq.{id}");
        let url = self.table(ARTWORKS, &[("id", filter.as_str()), ("select", "*")])?;
        let request = self
            .request(Method::PATCH, url)
            .header("Prefer", "return=representation")
            .json(&ArtworkPatchRow::new(patch, updated_at));
        let body = self.execute_ok(request).await?;
        Self::single_artwork(&body)
    }

    #[instrument(skip(self), fields(artwork_id = %id))]
    async fn delete_artwork(&self, id: ArtworkId) -> Result<()> {
        let filter = format!("eq.{id}");
        let url = self.table(ARTWORKS, &[("id", filter.as_str())])?;
        self.execute_ok(self.request(Method::DELETE, url)).await?;
        Ok(())
    }
}
