//! Artwork form input, validation and the shapes sent to the backend.
//!
//! An [`ArtworkDraft`] holds raw form values. [`ArtworkDraft::validate`]
//! turns it into [`ArtworkFields`], which can then become either a
//! [`NewArtwork`] (create) or an [`ArtworkPatch`] (edit).

use chrono::{Datelike, Utc};
use pencil_gallery_core::{Artwork, ArtworkStatus, Category, Price};

use crate::error::ValidationError;

/// Default medium for a new artwork.
pub const DEFAULT_MEDIUM: &str = "Acrylic on Canvas";

/// Raw values from the artwork form.
///
/// Text fields are kept as typed; blank optional fields become `None` on
/// validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkDraft {
    pub title: String,
    pub description: String,
    pub price: String,
    pub dimensions: String,
    pub medium: String,
    pub year_created: Option<i32>,
    pub category: String,
    pub image_url: String,
    pub status: ArtworkStatus,
    pub featured: bool,
}

impl Default for ArtworkDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            price: "0".to_string(),
            dimensions: String::new(),
            medium: DEFAULT_MEDIUM.to_string(),
            year_created: Some(Utc::now().year()),
            category: Category::Landscapes.as_str().to_string(),
            image_url: String::new(),
            status: ArtworkStatus::Available,
            featured: false,
        }
    }
}

impl From<&Artwork> for ArtworkDraft {
    fn from(artwork: &Artwork) -> Self {
        Self {
            title: artwork.title.clone(),
            description: artwork.description.clone().unwrap_or_default(),
            price: artwork.price.amount().to_string(),
            dimensions: artwork.dimensions.clone().unwrap_or_default(),
            medium: artwork.medium.clone(),
            year_created: artwork.year_created.or_else(|| Some(Utc::now().year())),
            category: artwork.category.as_str().to_string(),
            image_url: artwork.image_url.clone(),
            status: artwork.status,
            featured: artwork.featured,
        }
    }
}

impl ArtworkDraft {
    /// Check the draft and normalize its fields.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::Required`] for a blank title or medium
    /// - [`ValidationError::MissingImage`] when no image has been uploaded
    /// - [`ValidationError::Price`] for a negative or non-numeric price
    /// - [`ValidationError::Category`] for a category outside the fixed set
    pub fn validate(self) -> Result<ArtworkFields, ValidationError> {
        let title = required("Title", self.title)?;
        let medium = required("Medium", self.medium)?;
        let image_url = self.image_url.trim().to_string();
        if image_url.is_empty() {
            return Err(ValidationError::MissingImage);
        }
        let price: Price = self.price.parse()?;
        let category: Category = self.category.parse()?;

        Ok(ArtworkFields {
            title,
            description: optional(self.description),
            price,
            dimensions: optional(self.dimensions),
            medium,
            year_created: self.year_created,
            category,
            image_url,
            status: self.status,
            featured: self.featured,
        })
    }
}

fn required(field: &'static str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(trimmed.to_string())
}

fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// A validated artwork form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkFields {
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) price: Price,
    pub(crate) dimensions: Option<String>,
    pub(crate) medium: String,
    pub(crate) year_created: Option<i32>,
    pub(crate) category: Category,
    pub(crate) image_url: String,
    pub(crate) status: ArtworkStatus,
    pub(crate) featured: bool,
}

impl ArtworkFields {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub const fn status(&self) -> ArtworkStatus {
        self.status
    }

    /// A create request placed at `display_order`.
    #[must_use]
    pub fn into_new(self, display_order: i32) -> NewArtwork {
        NewArtwork {
            title: self.title,
            description: self.description,
            price: self.price,
            dimensions: self.dimensions,
            medium: self.medium,
            year_created: self.year_created,
            category: self.category,
            image_url: self.image_url,
            status: self.status,
            featured: self.featured,
            display_order,
        }
    }
}

/// Fields of an artwork to create. The backend assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArtwork {
    pub title: String,
    pub description: Option<String>,
    pub price: Price,
    pub dimensions: Option<String>,
    pub medium: String,
    pub year_created: Option<i32>,
    pub category: Category,
    pub image_url: String,
    pub status: ArtworkStatus,
    pub featured: bool,
    pub display_order: i32,
}

/// A partial artwork update. `None` leaves a field unchanged; for nullable
/// columns `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtworkPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<Price>,
    pub dimensions: Option<Option<String>>,
    pub medium: Option<String>,
    pub year_created: Option<Option<i32>>,
    pub category: Option<Category>,
    pub image_url: Option<String>,
    pub status: Option<ArtworkStatus>,
    pub featured: Option<bool>,
    pub display_order: Option<i32>,
}

impl ArtworkPatch {
    /// Change only the sale status.
    #[must_use]
    pub fn with_status(status: ArtworkStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Change only the featured flag.
    #[must_use]
    pub fn with_featured(featured: bool) -> Self {
        Self {
            featured: Some(featured),
            ..Self::default()
        }
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A full edit: every form field, display order untouched.
impl From<ArtworkFields> for ArtworkPatch {
    fn from(fields: ArtworkFields) -> Self {
        Self {
            title: Some(fields.title),
            description: Some(fields.description),
            price: Some(fields.price),
            dimensions: Some(fields.dimensions),
            medium: Some(fields.medium),
            year_created: Some(fields.year_created),
            category: Some(fields.category),
            image_url: Some(fields.image_url),
            status: Some(fields.status),
            featured: Some(fields.featured),
            display_order: None,
        }
    }
}

/// Parse a price typed into a form, e.g. `"1200"`, `"$1,200.50"`.
///
/// # Errors
///
/// Returns [`ValidationError::Price`] for non-numeric or negative input.
pub fn parse_price(input: &str) -> Result<Price, ValidationError> {
    Ok(input.parse::<Price>()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pencil_gallery_core::{CategoryError, PriceError};

    use super::*;

    fn filled() -> ArtworkDraft {
        ArtworkDraft {
            title: "  Serengeti Sunset ".to_string(),
            description: "   ".to_string(),
            price: "1200".to_string(),
            dimensions: "90 x 120 cm".to_string(),
            image_url: "https://cdn.example/serengeti.jpg".to_string(),
            ..ArtworkDraft::default()
        }
    }

    #[test]
    fn test_default_draft() {
        let draft = ArtworkDraft::default();
        assert_eq!(draft.medium, "Acrylic on Canvas");
        assert_eq!(draft.category, "Landscapes");
        assert_eq!(draft.status, ArtworkStatus::Available);
        assert_eq!(draft.year_created, Some(Utc::now().year()));
        assert!(!draft.featured);
    }

    #[test]
    fn test_validate_normalizes_fields() {
        let fields = filled().validate().unwrap();
        assert_eq!(fields.title(), "Serengeti Sunset");
        assert_eq!(fields.description, None);
        assert_eq!(fields.dimensions.as_deref(), Some("90 x 120 cm"));
        assert_eq!(fields.price(), parse_price("1200").unwrap());
        assert_eq!(fields.category(), Category::Landscapes);
    }

    #[test]
    fn test_validate_requires_title_and_medium() {
        let draft = ArtworkDraft {
            title: " ".to_string(),
            ..filled()
        };
        assert_eq!(draft.validate(), Err(ValidationError::Required("Title")));

        let draft = ArtworkDraft {
            medium: String::new(),
            ..filled()
        };
        assert_eq!(draft.validate(), Err(ValidationError::Required("Medium")));
    }

    #[test]
    fn test_validate_requires_image() {
        let draft = ArtworkDraft {
            image_url: String::new(),
            ..filled()
        };
        let err = draft.validate().unwrap_err();
        assert_eq!(err, ValidationError::MissingImage);
        assert_eq!(err.to_string(), "Please upload an image");
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let draft = ArtworkDraft {
            price: "-5".to_string(),
            ..filled()
        };
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::Price(PriceError::Negative(_)))
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_category() {
        let draft = ArtworkDraft {
            category: "Sculpture".to_string(),
            ..filled()
        };
        assert_eq!(
            draft.validate(),
            Err(ValidationError::Category(CategoryError("Sculpture".to_string())))
        );
    }

    #[test]
    fn test_into_new_sets_display_order() {
        let new = filled().validate().unwrap().into_new(7);
        assert_eq!(new.display_order, 7);
        assert_eq!(new.title, "Serengeti Sunset");
    }

    #[test]
    fn test_full_patch_leaves_display_order() {
        let patch = ArtworkPatch::from(filled().validate().unwrap());
        assert_eq!(patch.display_order, None);
        assert_eq!(patch.description, Some(None));
        assert!(!patch.is_empty());
        assert!(ArtworkPatch::default().is_empty());
    }

    #[test]
    fn test_parse_price_accepts_formatted_input() {
        assert_eq!(
            parse_price("$1,200").unwrap(),
            parse_price("1200").unwrap()
        );
        assert!(parse_price("abc").is_err());
    }
}
