//! Artwork categories and the gallery's category selector.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Unknown category name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0} (expected one of Landscapes, Abstract, Portraits, Wildlife)")]
pub struct CategoryError(pub String);

/// The fixed set of artwork categories.
///
/// Serialized exactly as stored remotely (`"Landscapes"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    Landscapes,
    Abstract,
    Portraits,
    Wildlife,
}

impl Category {
    /// Every category, in gallery tab order.
    pub const ALL: [Self; 4] = [
        Self::Landscapes,
        Self::Abstract,
        Self::Portraits,
        Self::Wildlife,
    ];

    /// The stored name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Landscapes => "Landscapes",
            Self::Abstract => "Abstract",
            Self::Portraits => "Portraits",
            Self::Wildlife => "Wildlife",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CategoryError(s.to_owned()))
    }
}

/// Gallery category selector: a single category or the `All` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Name of the sentinel selector.
    pub const ALL_LABEL: &'static str = "All";

    /// Selector tabs in display order: `All` followed by every category.
    #[must_use]
    pub fn tabs() -> Vec<Self> {
        std::iter::once(Self::All)
            .chain(Category::ALL.into_iter().map(Self::Only))
            .collect()
    }

    /// Whether a record in `category` passes this selector.
    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }

    /// Selector label (`"All"` or the category name).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => Self::ALL_LABEL,
            Self::Only(category) => category.as_str(),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(Self::ALL_LABEL) {
            return Ok(Self::All);
        }
        trimmed.parse().map(Self::Only)
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        Self::Only(category)
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_storage_name() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        let json = serde_json::to_string(&Category::Wildlife).unwrap();
        assert_eq!(json, "\"Wildlife\"");
    }

    #[test]
    fn test_category_rejects_unknown() {
        assert!("Sculpture".parse::<Category>().is_err());
        assert!(serde_json::from_str::<Category>("\"Sculpture\"").is_err());
    }

    #[test]
    fn test_filter_parses_sentinel() {
        assert_eq!("All".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "portraits".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Portraits)
        );
    }

    #[test]
    fn test_filter_matches() {
        assert!(CategoryFilter::All.matches(Category::Abstract));
        assert!(CategoryFilter::Only(Category::Abstract).matches(Category::Abstract));
        assert!(!CategoryFilter::Only(Category::Abstract).matches(Category::Wildlife));
    }

    #[test]
    fn test_tabs_start_with_all() {
        let tabs = CategoryFilter::tabs();
        assert_eq!(tabs.len(), 5);
        assert_eq!(tabs.first(), Some(&CategoryFilter::All));
    }
}
