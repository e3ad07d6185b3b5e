//! In-memory catalog store.
//!
//! A store holds the result of the last fetch and nothing else: every
//! refresh replaces the records wholesale. Views borrow from the store and
//! distinguish "still loading", "fetch failed" and "zero matches" so a page
//! can render each one differently.

use pencil_gallery_core::{
    Artwork, ArtworkId, ArtworkStatus, CategoryFilter, Commission, Price, SortMode,
    filter_by_category, sort_artworks,
};
use tracing::{debug, warn};

use crate::error::{GalleryError, Result};
use crate::remote::CatalogSource;

#[derive(Debug)]
enum State<T> {
    Loading,
    Failed(GalleryError),
    Loaded(Vec<T>),
}

/// The current fetch result for one kind of record.
#[derive(Debug)]
pub struct CatalogStore<T> {
    state: State<T>,
}

impl<T> Default for CatalogStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// What a page should render for a catalog query.
#[derive(Debug)]
pub enum CatalogView<'a, T> {
    /// No fetch has completed yet.
    Loading,
    /// The last fetch failed.
    Failed(&'a GalleryError),
    /// Fetched, but nothing matches.
    Empty,
    /// Matching records, in display order.
    Ready(Vec<&'a T>),
}

impl<'a, T> CatalogView<'a, T> {
    fn from_records(records: Vec<&'a T>) -> Self {
        if records.is_empty() {
            Self::Empty
        } else {
            Self::Ready(records)
        }
    }

    /// Matching records, or an empty slice for every other state.
    #[must_use]
    pub fn records(&self) -> &[&'a T] {
        match self {
            Self::Ready(records) => records.as_slice(),
            Self::Loading | Self::Failed(_) | Self::Empty => &[],
        }
    }
}

impl<T> CatalogStore<T> {
    /// An empty store that has not fetched yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: State::Loading,
        }
    }

    /// A store already holding `records`.
    #[must_use]
    pub const fn loaded(records: Vec<T>) -> Self {
        Self {
            state: State::Loaded(records),
        }
    }

    /// Records from the last successful fetch, if the last fetch succeeded.
    #[must_use]
    pub fn records(&self) -> Option<&[T]> {
        match &self.state {
            State::Loaded(records) => Some(records.as_slice()),
            State::Loading | State::Failed(_) => None,
        }
    }

    /// Error from the last fetch, if it failed.
    #[must_use]
    pub const fn error(&self) -> Option<&GalleryError> {
        match &self.state {
            State::Failed(err) => Some(err),
            State::Loading | State::Loaded(_) => None,
        }
    }

    /// Whether no fetch has completed yet.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.state, State::Loading)
    }

    fn replace(&mut self, result: Result<Vec<T>>, what: &'static str) {
        self.state = match result {
            Ok(records) => {
                debug!(count = records.len(), what, "Catalog refreshed");
                State::Loaded(records)
            }
            Err(err) => {
                warn!(error = %err, what, "Catalog refresh failed");
                State::Failed(err)
            }
        };
    }

    fn view_with<'a>(&'a self, select: impl FnOnce(&'a [T]) -> Vec<&'a T>) -> CatalogView<'a, T> {
        match &self.state {
            State::Loading => CatalogView::Loading,
            State::Failed(err) => CatalogView::Failed(err),
            State::Loaded(records) => CatalogView::from_records(select(records)),
        }
    }
}

impl CatalogStore<Artwork> {
    /// Replace the records with all artworks.
    pub async fn refresh<S: CatalogSource>(&mut self, source: &S) {
        let result = source.artworks().await;
        self.replace(result, "artworks");
    }

    /// Replace the records with the featured artworks only.
    pub async fn refresh_featured<S: CatalogSource>(&mut self, source: &S) {
        let result = source.featured_artworks().await;
        self.replace(result, "featured artworks");
    }

    /// Artworks in `filter`, ordered by `sort`.
    #[must_use]
    pub fn view(&self, filter: CategoryFilter, sort: SortMode) -> CatalogView<'_, Artwork> {
        self.view_with(|records| sort_artworks(filter_by_category(records, filter), sort))
    }

    /// Look up a loaded artwork.
    #[must_use]
    pub fn find(&self, id: ArtworkId) -> Option<&Artwork> {
        self.records()?.iter().find(|artwork| artwork.id == id)
    }

    /// Display order for a newly created artwork: after everything loaded.
    #[must_use]
    pub fn next_display_order(&self) -> i32 {
        let count = self.records().map_or(0, <[Artwork]>::len);
        i32::try_from(count).map_or(i32::MAX, |n| n.saturating_add(1))
    }

    /// Dashboard counters over the loaded artworks.
    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        CatalogStats::from_artworks(self.records().unwrap_or_default())
    }
}

impl CatalogStore<Commission> {
    /// Replace the records with all commissions.
    pub async fn refresh<S: CatalogSource>(&mut self, source: &S) {
        let result = source.commissions().await;
        self.replace(result, "commissions");
    }

    /// Every commission, newest first.
    #[must_use]
    pub fn view(&self) -> CatalogView<'_, Commission> {
        self.view_with(|records| records.iter().collect())
    }
}

/// The artworks before and after `id` in `items`.
#[must_use]
pub fn neighbours<'a>(
    items: &[&'a Artwork],
    id: ArtworkId,
) -> (Option<&'a Artwork>, Option<&'a Artwork>) {
    let Some(index) = items.iter().position(|artwork| artwork.id == id) else {
        return (None, None);
    };
    let previous = index.checked_sub(1).and_then(|i| items.get(i)).copied();
    let next = items.get(index + 1).copied();
    (previous, next)
}

/// Counters shown at the top of the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogStats {
    pub total: usize,
    pub available: usize,
    pub reserved: usize,
    pub sold: usize,
    pub featured: usize,
    /// Sum of all listed prices, sold pieces included.
    pub total_value: Price,
}

impl CatalogStats {
    #[must_use]
    pub fn from_artworks(artworks: &[Artwork]) -> Self {
        let count = |status: ArtworkStatus| artworks.iter().filter(|a| a.status == status).count();
        Self {
            total: artworks.len(),
            available: count(ArtworkStatus::Available),
            reserved: count(ArtworkStatus::Reserved),
            sold: count(ArtworkStatus::Sold),
            featured: artworks.iter().filter(|a| a.featured).count(),
            total_value: artworks.iter().map(|a| a.price).sum(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use pencil_gallery_core::Category;

    use super::*;
    use crate::fake::{FakeBackend, sample_artwork};

    #[tokio::test]
    async fn test_starts_loading() {
        let store: CatalogStore<Artwork> = CatalogStore::new();
        assert!(store.is_loading());
        assert!(matches!(
            store.view(CategoryFilter::All, SortMode::DisplayOrder),
            CatalogView::Loading
        ));
        assert_eq!(store.next_display_order(), 1);
    }

    #[tokio::test]
    async fn test_refresh_loads_in_remote_order() {
        let backend = FakeBackend::with_artworks(vec![
            sample_artwork("serengeti", Category::Landscapes, 1200),
            sample_artwork("lion", Category::Wildlife, 800),
        ]);
        let mut store: CatalogStore<Artwork> = CatalogStore::new();
        store.refresh(&backend).await;

        let view = store.view(CategoryFilter::All, SortMode::DisplayOrder);
        let titles: Vec<&str> = view.records().iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["serengeti", "lion"]);
        assert_eq!(store.next_display_order(), 3);
    }

    #[tokio::test]
    async fn test_empty_filter_is_distinct_from_loading() {
        let backend = FakeBackend::with_artworks(vec![sample_artwork(
            "serengeti",
            Category::Landscapes,
            1200,
        )]);
        let mut store: CatalogStore<Artwork> = CatalogStore::new();
        store.refresh(&backend).await;

        assert!(matches!(
            store.view(CategoryFilter::Only(Category::Abstract), SortMode::PriceAsc),
            CatalogView::Empty
        ));
    }

    #[tokio::test]
    async fn test_failed_refresh_replaces_records() {
        let backend = FakeBackend::with_artworks(vec![sample_artwork(
            "serengeti",
            Category::Landscapes,
            1200,
        )]);
        let mut store: CatalogStore<Artwork> = CatalogStore::new();
        store.refresh(&backend).await;
        assert!(store.records().is_some());

        backend.fail_next_fetch("connection reset");
        store.refresh(&backend).await;

        assert!(store.records().is_none());
        match store.view(CategoryFilter::All, SortMode::DisplayOrder) {
            CatalogView::Failed(err) => assert_eq!(err.to_string(), "connection reset"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_refresh_featured_only_keeps_featured() {
        let mut featured = sample_artwork("serengeti", Category::Landscapes, 1200);
        featured.featured = true;
        let backend = FakeBackend::with_artworks(vec![
            featured,
            sample_artwork("lion", Category::Wildlife, 800),
        ]);
        let mut store: CatalogStore<Artwork> = CatalogStore::new();
        store.refresh_featured(&backend).await;

        assert_eq!(store.records().unwrap().len(), 1);
        assert_eq!(backend.calls().featured, 1);
        assert_eq!(backend.calls().artworks, 0);
    }

    #[tokio::test]
    async fn test_commission_view() {
        let backend = FakeBackend::default();
        let mut store: CatalogStore<Commission> = CatalogStore::new();
        store.refresh(&backend).await;
        assert!(matches!(store.view(), CatalogView::Empty));
        assert_eq!(backend.calls().commissions, 1);
    }

    #[test]
    fn test_stats() {
        let mut sold = sample_artwork("sold", Category::Portraits, 500);
        sold.status = ArtworkStatus::Sold;
        let mut reserved = sample_artwork("reserved", Category::Abstract, 250);
        reserved.status = ArtworkStatus::Reserved;
        reserved.featured = true;
        let available = sample_artwork("available", Category::Wildlife, 1000);

        let stats = CatalogStats::from_artworks(&[sold, reserved, available]);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.available, 1);
        assert_eq!(stats.reserved, 1);
        assert_eq!(stats.sold, 1);
        assert_eq!(stats.featured, 1);
        assert_eq!(stats.total_value.display(), "$1,750");
    }

    #[test]
    fn test_neighbours() {
        let artworks = [
            sample_artwork("a", Category::Landscapes, 1),
            sample_artwork("b", Category::Landscapes, 2),
            sample_artwork("c", Category::Landscapes, 3),
        ];
        let items: Vec<&Artwork> = artworks.iter().collect();

        let (prev, next) = neighbours(&items, artworks[1].id);
        assert_eq!(prev.unwrap().title, "a");
        assert_eq!(next.unwrap().title, "c");

        let (prev, next) = neighbours(&items, artworks[0].id);
        assert!(prev.is_none());
        assert_eq!(next.unwrap().title, "b");

        assert_eq!(neighbours(&items, ArtworkId::random()), (None, None));
    }
}
