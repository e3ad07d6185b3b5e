//! Artwork listing record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ArtworkId, ArtworkStatus, Category, Price};

/// A painting listed in the gallery.
///
/// `id`, `created_at` and `updated_at` are assigned by the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: ArtworkId,
    pub title: String,
    pub description: Option<String>,
    pub price: Price,
    /// Free-form size, e.g. `"90 x 120 cm"`.
    pub dimensions: Option<String>,
    pub medium: String,
    pub year_created: Option<i32>,
    pub category: Category,
    pub image_url: String,
    pub status: ArtworkStatus,
    pub featured: bool,
    /// Curator-controlled sort key; the gallery's default order.
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Artwork {
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == ArtworkStatus::Available
    }

    #[must_use]
    pub fn is_sold(&self) -> bool {
        self.status == ArtworkStatus::Sold
    }
}
