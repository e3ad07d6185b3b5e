//! Artwork catalog commands.
//!
//! # Usage
//!
//! ```bash
//! # Browse (no session needed)
//! pg-admin artworks list --category wildlife --sort price_desc
//! pg-admin artworks featured
//! pg-admin artworks stats
//!
//! # Manage (requires `pg-admin session login`)
//! pg-admin artworks create --title "Serengeti Dusk" --price 1200 \
//!     --category landscapes --image-file ./serengeti.jpg
//! pg-admin artworks update <id> --price 1350 --status reserved
//! pg-admin artworks toggle-sold <id>
//! pg-admin artworks delete <id>
//! ```

use std::path::{Path, PathBuf};

use clap::Args;
use pencil_gallery_client::{
    ArtworkDraft, CatalogSource, CatalogStats, CatalogStore, Dashboard, GalleryError, ImageStore,
    SupabaseClient, ValidationError,
};
use pencil_gallery_core::{Artwork, ArtworkId, ArtworkStatus, CategoryFilter, SortMode};

use super::{CliError, Context};
use crate::output::{artwork_details, artwork_line, identity_line, stats_lines, view_lines};

/// Artwork form fields. Omitted fields keep their current value on update
/// and their default on create.
#[derive(Args, Debug, Default)]
pub struct ArtworkArgs {
    /// Title
    #[arg(long)]
    pub title: Option<String>,

    /// Description (empty string clears it)
    #[arg(long)]
    pub description: Option<String>,

    /// Price in dollars, e.g. 1200 or "$1,200"
    #[arg(long)]
    pub price: Option<String>,

    /// Dimensions, e.g. "90 x 60 cm" (empty string clears it)
    #[arg(long)]
    pub dimensions: Option<String>,

    /// Medium
    #[arg(long)]
    pub medium: Option<String>,

    /// Year created
    #[arg(long)]
    pub year: Option<i32>,

    /// Category: landscapes, abstract, portraits or wildlife
    #[arg(long)]
    pub category: Option<String>,

    /// URL of an already uploaded image
    #[arg(long, conflicts_with = "image_file")]
    pub image_url: Option<String>,

    /// Local image to upload (jpg, png, webp or gif)
    #[arg(long)]
    pub image_file: Option<PathBuf>,

    /// Sale status: available, reserved or sold
    #[arg(long)]
    pub status: Option<ArtworkStatus>,

    /// Show on the home page
    #[arg(long)]
    pub featured: Option<bool>,
}

impl ArtworkArgs {
    /// Copy every given field into `draft`. The image file is handled by
    /// the caller since it needs an upload.
    pub fn apply(self, draft: &mut ArtworkDraft) {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(price) = self.price {
            draft.price = price;
        }
        if let Some(dimensions) = self.dimensions {
            draft.dimensions = dimensions;
        }
        if let Some(medium) = self.medium {
            draft.medium = medium;
        }
        if let Some(year) = self.year {
            draft.year_created = Some(year);
        }
        if let Some(category) = self.category {
            draft.category = category;
        }
        if let Some(image_url) = self.image_url {
            draft.image_url = image_url;
        }
        if let Some(status) = self.status {
            draft.status = status;
        }
        if let Some(featured) = self.featured {
            draft.featured = featured;
        }
    }
}

// =============================================================================
// Read-only
// =============================================================================

/// Print the catalog in one category, sorted.
pub async fn list(ctx: &Context, category: CategoryFilter, sort: SortMode) {
    let mut catalog = CatalogStore::<Artwork>::new();
    catalog.refresh(&ctx.backend).await;
    let empty = format!("No {} artworks.", category.as_str().to_lowercase());
    print_lines(view_lines(&catalog.view(category, sort), artwork_line, &empty));
}

/// Print the artworks shown on the home page.
pub async fn featured(ctx: &Context) {
    let mut catalog = CatalogStore::<Artwork>::new();
    catalog.refresh_featured(&ctx.backend).await;
    print_lines(view_lines(
        &catalog.view(CategoryFilter::All, SortMode::DisplayOrder),
        artwork_line,
        "No featured artworks.",
    ));
}

/// Print dashboard counters.
///
/// # Errors
///
/// Returns the fetch error if the catalog cannot be loaded.
pub async fn stats(ctx: &Context) -> Result<(), CliError> {
    let artworks = ctx.backend.artworks().await?;
    print_lines(stats_lines(&CatalogStats::from_artworks(&artworks)));
    Ok(())
}

// =============================================================================
// Mutations
// =============================================================================

/// A loaded dashboard for the signed-in admin.
async fn dashboard(ctx: &Context) -> Result<Dashboard<SupabaseClient>, CliError> {
    let admin = ctx.require_admin().await?;
    tracing::debug!(admin = %identity_line(&admin), "Session restored");
    let mut dashboard = Dashboard::new(ctx.backend.clone());
    dashboard.try_load().await?;
    Ok(dashboard)
}

/// Create an artwork. A given image file is uploaded once the rest of the
/// form checks out.
///
/// # Errors
///
/// Returns an error without writing or uploading anything if the admin is
/// not signed in or the form is incomplete; otherwise the backend's error.
pub async fn create(ctx: &Context, mut args: ArtworkArgs) -> Result<(), CliError> {
    let mut dashboard = dashboard(ctx).await?;

    let mut draft = ArtworkDraft::default();
    let image_file = args.image_file.take();
    args.apply(&mut draft);

    let created = save(&mut dashboard, draft, None, image_file.as_deref()).await?;
    println!("Created {}", created.id);
    print_lines(artwork_details(&created));
    Ok(())
}

/// Edit an artwork. Fields not given keep their current value.
///
/// # Errors
///
/// Returns the fetch error if the catalog cannot be loaded, or an error if
/// the admin is not signed in, the artwork is unknown or the edited form is
/// invalid; otherwise the backend's error.
pub async fn update(ctx: &Context, id: ArtworkId, mut args: ArtworkArgs) -> Result<(), CliError> {
    let mut dashboard = dashboard(ctx).await?;
    let current = dashboard
        .catalog()
        .find(id)
        .ok_or_else(|| GalleryError::from(ValidationError::UnknownArtwork(id)))?;

    let mut draft = ArtworkDraft::from(current);
    let image_file = args.image_file.take();
    args.apply(&mut draft);

    let updated = save(&mut dashboard, draft, Some(id), image_file.as_deref()).await?;
    println!("Updated {}", updated.id);
    print_lines(artwork_details(&updated));
    Ok(())
}

/// Delete an artwork.
///
/// # Errors
///
/// Returns an error if the admin is not signed in or the delete fails.
pub async fn delete(ctx: &Context, id: ArtworkId) -> Result<(), CliError> {
    let mut dashboard = dashboard(ctx).await?;
    dashboard.remove(id).await?;
    println!("Deleted {id}");
    Ok(())
}

/// Flip whether an artwork is featured.
///
/// # Errors
///
/// Returns an error if the admin is not signed in, the artwork is unknown
/// or the update fails.
pub async fn toggle_featured(ctx: &Context, id: ArtworkId) -> Result<(), CliError> {
    let mut dashboard = dashboard(ctx).await?;
    let updated = dashboard.toggle_featured(id).await?;
    println!("{} is {}featured", updated.title, if updated.featured { "" } else { "no longer " });
    Ok(())
}

/// Toggle an artwork between sold and available.
///
/// # Errors
///
/// Returns an error if the admin is not signed in, the artwork is unknown
/// or the update fails.
pub async fn toggle_sold(ctx: &Context, id: ArtworkId) -> Result<(), CliError> {
    let mut dashboard = dashboard(ctx).await?;
    let updated = dashboard.toggle_sold(id).await?;
    println!("{} is now {}", updated.title, updated.status.label());
    Ok(())
}

/// Set an artwork's sale status.
///
/// # Errors
///
/// Returns an error if the admin is not signed in or the update fails.
pub async fn set_status(ctx: &Context, id: ArtworkId, status: ArtworkStatus) -> Result<(), CliError> {
    let mut dashboard = dashboard(ctx).await?;
    let updated = dashboard.set_status(id, status).await?;
    println!("{} is now {}", updated.title, updated.status.label());
    Ok(())
}

/// Upload an image and print its public URL.
///
/// # Errors
///
/// Returns an error if the admin is not signed in, the file cannot be read
/// or the upload fails.
pub async fn upload(ctx: &Context, path: &Path) -> Result<(), CliError> {
    ctx.require_admin().await?;
    let url = upload_file(&ctx.backend, path).await?;
    println!("{url}");
    Ok(())
}

/// Save the form, uploading `image_file` only after the form validates.
async fn save(
    dashboard: &mut Dashboard<SupabaseClient>,
    draft: ArtworkDraft,
    editing: Option<ArtworkId>,
    image_file: Option<&Path>,
) -> Result<Artwork, CliError> {
    let Some(path) = image_file else {
        return Ok(dashboard.save(draft, editing).await?);
    };
    let (file_name, bytes) = read_image(path).await?;
    tracing::info!(file = %file_name, size = bytes.len(), "Uploading image");
    Ok(dashboard
        .save_with_image(draft, editing, &file_name, bytes)
        .await?)
}

async fn upload_file(store: &impl ImageStore, path: &Path) -> Result<String, CliError> {
    let (file_name, bytes) = read_image(path).await?;
    tracing::info!(file = %file_name, size = bytes.len(), "Uploading image");
    Ok(store.upload_image(&file_name, bytes).await?)
}

async fn read_image(path: &Path) -> Result<(String, Vec<u8>), CliError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok((file_name, bytes))
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}
