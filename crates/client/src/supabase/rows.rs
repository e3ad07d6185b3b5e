//! Wire shapes of the `artworks` table.
//!
//! The table stores sale status as two booleans. These rows are the only
//! place that encoding appears; everything above the client sees
//! [`ArtworkStatus`].

use chrono::{DateTime, Utc};
use pencil_gallery_core::{Artwork, ArtworkId, ArtworkStatus, Category, Price};
use serde::{Deserialize, Serialize};

use crate::draft::{ArtworkPatch, NewArtwork};

/// A row as returned by `select=*`.
#[derive(Debug, Deserialize)]
pub(super) struct ArtworkRow {
    id: ArtworkId,
    title: String,
    description: Option<String>,
    price: Price,
    dimensions: Option<String>,
    medium: String,
    year_created: Option<i32>,
    category: Category,
    image_url: String,
    #[serde(default = "default_true")]
    is_available: bool,
    #[serde(default)]
    is_featured: bool,
    #[serde(default)]
    is_sold: bool,
    #[serde(default)]
    display_order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

const fn default_true() -> bool {
    true
}

impl From<ArtworkRow> for Artwork {
    fn from(row: ArtworkRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            price: row.price,
            dimensions: row.dimensions,
            medium: row.medium,
            year_created: row.year_created,
            category: row.category,
            image_url: row.image_url,
            status: ArtworkStatus::from_flags(row.is_available, row.is_sold),
            featured: row.is_featured,
            display_order: row.display_order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insert body. `id` and timestamps are left to the database.
#[derive(Debug, Serialize)]
pub(super) struct NewArtworkRow<'a> {
    title: &'a str,
    description: Option<&'a str>,
    price: Price,
    dimensions: Option<&'a str>,
    medium: &'a str,
    year_created: Option<i32>,
    category: Category,
    image_url: &'a str,
    is_available: bool,
    is_featured: bool,
    is_sold: bool,
    display_order: i32,
}

impl<'a> From<&'a NewArtwork> for NewArtworkRow<'a> {
    fn from(artwork: &'a NewArtwork) -> Self {
        let (is_available, is_sold) = artwork.status.to_flags();
        Self {
            title: &artwork.title,
            description: artwork.description.as_deref(),
            price: artwork.price,
            dimensions: artwork.dimensions.as_deref(),
            medium: &artwork.medium,
            year_created: artwork.year_created,
            category: artwork.category,
            image_url: &artwork.image_url,
            is_available,
            is_featured: artwork.featured,
            is_sold,
            display_order: artwork.display_order,
        }
    }
}

/// Update body. Absent fields are left untouched; `Some(None)` clears a
/// nullable column.
#[derive(Debug, Serialize)]
pub(super) struct ArtworkPatchRow<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<Option<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<Option<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    medium: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    year_created: Option<Option<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_sold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_order: Option<i32>,
    updated_at: DateTime<Utc>,
}

impl<'a> ArtworkPatchRow<'a> {
    pub(super) fn new(patch: &'a ArtworkPatch, updated_at: DateTime<Utc>) -> Self {
        let flags = patch.status.map(ArtworkStatus::to_flags);
        Self {
            title: patch.title.as_deref(),
            description: patch.description.as_ref().map(Option::as_deref),
            price: patch.price,
            dimensions: patch.dimensions.as_ref().map(Option::as_deref),
            medium: patch.medium.as_deref(),
            year_created: patch.year_created,
            category: patch.category,
            image_url: patch.image_url.as_deref(),
            is_available: flags.map(|(available, _)| available),
            is_sold: flags.map(|(_, sold)| sold),
            is_featured: patch.featured,
            display_order: patch.display_order,
            updated_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;

    fn row_json(is_available: bool, is_sold: bool) -> serde_json::Value {
        json!({
            "id": "0b0c56f4-5a43-4f7e-9d8a-2b6f0c6a9e11",
            "title": "Serengeti Sunset",
            "description": null,
            "price": 1200.5,
            "dimensions": "90 x 120 cm",
            "medium": "Acrylic on Canvas",
            "year_created": 2024,
            "category": "Landscapes",
            "image_url": "https://cdn.example/serengeti.jpg",
            "is_available": is_available,
            "is_featured": true,
            "is_sold": is_sold,
            "display_order": 3,
            "created_at": "2025-01-02T10:00:00+00:00",
            "updated_at": "2025-01-03T10:00:00+00:00"
        })
    }

    #[test]
    fn test_row_decodes_status_from_flags() {
        let cases = [
            ((true, false), ArtworkStatus::Available),
            ((false, false), ArtworkStatus::Reserved),
            ((false, true), ArtworkStatus::Sold),
            // contradictory legacy rows read as sold
            ((true, true), ArtworkStatus::Sold),
        ];
        for ((available, sold), expected) in cases {
            let row: ArtworkRow = serde_json::from_value(row_json(available, sold)).unwrap();
            let artwork = Artwork::from(row);
            assert_eq!(artwork.status, expected);
        }
    }

    #[test]
    fn test_row_decodes_fields() {
        let row: ArtworkRow = serde_json::from_value(row_json(true, false)).unwrap();
        let artwork = Artwork::from(row);
        assert_eq!(artwork.title, "Serengeti Sunset");
        assert_eq!(artwork.price.amount(), Decimal::new(12005, 1));
        assert_eq!(artwork.category, Category::Landscapes);
        assert!(artwork.featured);
        assert_eq!(artwork.display_order, 3);
        assert_eq!(artwork.description, None);
    }

    #[test]
    fn test_row_rejects_unknown_category() {
        let mut value = row_json(true, false);
        value["category"] = json!("Sculpture");
        assert!(serde_json::from_value::<ArtworkRow>(value).is_err());
    }

    #[test]
    fn test_patch_row_only_sends_set_fields() {
        let stamp = Utc.with_ymd_and_hms(2025, 2, 1, 8, 0, 0).unwrap();
        let patch = ArtworkPatch::with_status(ArtworkStatus::Sold);
        let body = serde_json::to_value(ArtworkPatchRow::new(&patch, stamp)).unwrap();

        assert_eq!(
            body,
            json!({
                "is_available": false,
                "is_sold": true,
                "updated_at": "2025-02-01T08:00:00Z"
            })
        );
    }

    #[test]
    fn test_patch_row_clears_nullable_columns() {
        let stamp = Utc.with_ymd_and_hms(2025, 2, 1, 8, 0, 0).unwrap();
        let patch = ArtworkPatch {
            description: Some(None),
            featured: Some(true),
            ..ArtworkPatch::default()
        };
        let body = serde_json::to_value(ArtworkPatchRow::new(&patch, stamp)).unwrap();

        assert_eq!(body["description"], serde_json::Value::Null);
        assert_eq!(body["is_featured"], json!(true));
        assert!(body.get("title").is_none());
        assert!(body.get("is_sold").is_none());
    }
}
