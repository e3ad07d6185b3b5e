//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use pencil_gallery_client::CatalogStore;
use pencil_gallery_core::{Artwork, CategoryFilter, SortMode};
use tracing::instrument;

use crate::filters;
use crate::routes::gallery::{ArtworkCard, Listing};
use crate::site::{self, ArtistBio, Service, Testimonial};
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Hero slideshow images.
    pub hero_images: &'static [&'static str],
    /// Featured artworks, in display order.
    pub featured: Listing<ArtworkCard>,
    pub services: &'static [Service],
    pub testimonials: &'static [Testimonial],
    pub bio: &'static ArtistBio,
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> HomeTemplate {
    let mut featured = CatalogStore::<Artwork>::new();
    featured.refresh_featured(state.backend()).await;

    HomeTemplate {
        hero_images: &site::HERO_IMAGES,
        featured: Listing::from_view(
            featured.view(CategoryFilter::All, SortMode::DisplayOrder),
            |artwork| ArtworkCard::new(artwork, ""),
        ),
        services: &site::SERVICES,
        testimonials: &site::TESTIMONIALS,
        bio: &site::ARTIST_BIO,
    }
}
