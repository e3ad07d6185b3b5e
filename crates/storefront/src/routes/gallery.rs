//! Gallery route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use pencil_gallery_client::{CatalogSource, CatalogStore, CatalogView, neighbours};
use pencil_gallery_core::{Artwork, ArtworkId, ArtworkStatus, CategoryFilter, SortMode};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::site;
use crate::state::AppState;

// =============================================================================
// Query Parameters
// =============================================================================

/// Category and sort selection, shared by the listing and detail pages so
/// previous/next links stay inside the visitor's view.
#[derive(Debug, Default, Deserialize)]
pub struct GalleryQuery {
    pub category: Option<String>,
    pub sort: Option<String>,
}

impl GalleryQuery {
    /// Parse the selection. Missing values select everything in display order.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for an unknown category or sort mode.
    pub fn selection(&self) -> Result<(CategoryFilter, SortMode)> {
        let filter = self
            .category
            .as_deref()
            .map_or(Ok(CategoryFilter::All), str::parse)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        let sort = match self.sort.as_deref().map(str::trim) {
            None | Some("") => SortMode::default(),
            Some(value) => value.parse().map_err(AppError::BadRequest)?,
        };
        Ok((filter, sort))
    }
}

/// Query string that reproduces a selection, empty for the defaults.
#[must_use]
pub fn query_string(filter: CategoryFilter, sort: SortMode) -> String {
    let mut pairs = Vec::new();
    if let CategoryFilter::Only(category) = filter {
        pairs.push(format!("category={}", urlencoding::encode(category.as_str())));
    }
    if sort != SortMode::default() {
        pairs.push(format!("sort={}", sort.as_str()));
    }
    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}

// =============================================================================
// Views
// =============================================================================

const UNREACHABLE: &str = "We couldn't reach the gallery. Please check your connection and try again.";
const UNAVAILABLE: &str = "The gallery is unavailable right now. Please try again shortly.";

/// What a listing section renders.
pub enum Listing<T> {
    Loading,
    Failed(String),
    Empty,
    Ready(Vec<T>),
}

impl<T> Listing<T> {
    /// Convert a catalog view, mapping each record to its display form.
    pub fn from_view<R>(view: CatalogView<'_, R>, card: impl Fn(&R) -> T) -> Self {
        match view {
            CatalogView::Loading => Self::Loading,
            CatalogView::Failed(err) if err.is_network() => Self::Failed(UNREACHABLE.to_string()),
            CatalogView::Failed(_) => Self::Failed(UNAVAILABLE.to_string()),
            CatalogView::Empty => Self::Empty,
            CatalogView::Ready(records) => Self::Ready(records.into_iter().map(card).collect()),
        }
    }
}

/// Artwork display data for templates.
#[derive(Clone)]
pub struct ArtworkCard {
    pub href: String,
    pub title: String,
    pub description: Option<String>,
    pub price: String,
    pub category: &'static str,
    pub medium: String,
    pub dimensions: Option<String>,
    pub year_created: Option<i32>,
    pub image_url: String,
    pub status_label: &'static str,
    pub sold: bool,
    pub reserved: bool,
    pub featured: bool,
    pub enquiry_link: String,
}

impl ArtworkCard {
    /// Card for `artwork`, linking to its detail page with `query` appended.
    #[must_use]
    pub fn new(artwork: &Artwork, query: &str) -> Self {
        Self {
            href: format!("/gallery/{}{query}", artwork.id),
            title: artwork.title.clone(),
            description: artwork.description.clone(),
            price: artwork.price.display(),
            category: artwork.category.as_str(),
            medium: artwork.medium.clone(),
            dimensions: artwork.dimensions.clone(),
            year_created: artwork.year_created,
            image_url: artwork.image_url.clone(),
            status_label: artwork.status.label(),
            sold: artwork.is_sold(),
            reserved: artwork.status == ArtworkStatus::Reserved,
            featured: artwork.featured,
            enquiry_link: site::whatsapp_link(&site::artwork_enquiry(artwork)),
        }
    }
}

/// One category tab.
pub struct Tab {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// One entry of the sort selector.
pub struct SortOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Link to the neighbouring artwork.
pub struct NeighbourLink {
    pub href: String,
    pub title: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Gallery listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "gallery/index.html")]
pub struct GalleryIndexTemplate {
    pub hero_image: &'static str,
    pub tabs: Vec<Tab>,
    pub sort_options: Vec<SortOption>,
    pub active_category: &'static str,
    pub listing: Listing<ArtworkCard>,
}

/// Artwork detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "gallery/show.html")]
pub struct GalleryShowTemplate {
    pub artwork: ArtworkCard,
    pub back_href: String,
    pub previous: Option<NeighbourLink>,
    pub next: Option<NeighbourLink>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the gallery, filtered and sorted per the query string.
///
/// A failed fetch renders an error notice in place of the grid.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<GalleryQuery>,
) -> Result<GalleryIndexTemplate> {
    let (filter, sort) = query.selection()?;

    let mut catalog = CatalogStore::<Artwork>::new();
    catalog.refresh(state.backend()).await;

    let suffix = query_string(filter, sort);
    let listing = Listing::from_view(catalog.view(filter, sort), |artwork| {
        ArtworkCard::new(artwork, &suffix)
    });

    let tabs = CategoryFilter::tabs()
        .into_iter()
        .map(|tab| Tab {
            label: tab.as_str(),
            href: format!("/gallery{}", query_string(tab, sort)),
            active: tab == filter,
        })
        .collect();
    let sort_options = SortMode::ALL
        .into_iter()
        .map(|mode| SortOption {
            value: mode.as_str(),
            label: mode.label(),
            selected: mode == sort,
        })
        .collect();

    Ok(GalleryIndexTemplate {
        hero_image: site::GALLERY_HERO,
        tabs,
        sort_options,
        active_category: filter.as_str(),
        listing,
    })
}

/// Display one artwork with previous/next links inside the visitor's view.
///
/// Unlike the listing, a failed fetch is an error response: there is
/// nothing to show without the record.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<GalleryQuery>,
) -> Result<GalleryShowTemplate> {
    let artwork_id: ArtworkId = id
        .parse()
        .map_err(|_| AppError::NotFound(format!("artwork {id}")))?;
    let (filter, sort) = query.selection()?;

    let catalog = CatalogStore::loaded(state.backend().artworks().await?);
    let artwork = catalog
        .find(artwork_id)
        .ok_or_else(|| AppError::NotFound(format!("artwork {id}")))?;

    add_breadcrumb(
        "gallery",
        "Viewed artwork",
        Some(&[("artwork_id", id.as_str()), ("title", artwork.title.as_str())]),
    );

    let suffix = query_string(filter, sort);
    let view = catalog.view(filter, sort);
    let (previous, next) = neighbours(view.records(), artwork_id);
    let link = |neighbour: &Artwork| NeighbourLink {
        href: format!("/gallery/{}{suffix}", neighbour.id),
        title: neighbour.title.clone(),
    };

    Ok(GalleryShowTemplate {
        artwork: ArtworkCard::new(artwork, &suffix),
        back_href: format!("/gallery{suffix}"),
        previous: previous.map(link),
        next: next.map(link),
    })
}
