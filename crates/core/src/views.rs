//! Derived gallery views: category filter and sort.
//!
//! Both functions borrow the catalog and never reorder or mutate the
//! underlying slice. Sorting is stable (`slice::sort_by`), so records with
//! equal keys keep the order the remote returned them in.

use std::cmp::Ordering;

use crate::types::{Artwork, CategoryFilter, SortMode};

/// Records whose category passes `filter`, in their original order.
#[must_use]
pub fn filter_by_category(artworks: &[Artwork], filter: CategoryFilter) -> Vec<&Artwork> {
    artworks
        .iter()
        .filter(|artwork| filter.matches(artwork.category))
        .collect()
}

/// Stable-sort borrowed records by `mode`.
///
/// [`SortMode::DisplayOrder`] is the identity: the remote already returns
/// artworks by ascending display order.
#[must_use]
pub fn sort_artworks(mut artworks: Vec<&Artwork>, mode: SortMode) -> Vec<&Artwork> {
    let compare: fn(&&Artwork, &&Artwork) -> Ordering = match mode {
        SortMode::DisplayOrder => return artworks,
        SortMode::PriceAsc => |a, b| a.price.cmp(&b.price),
        SortMode::PriceDesc => |a, b| b.price.cmp(&a.price),
        SortMode::Newest => |a, b| b.created_at.cmp(&a.created_at),
    };
    artworks.sort_by(compare);
    artworks
}
