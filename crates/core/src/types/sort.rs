//! Gallery sort modes.

use core::fmt;

use serde::{Deserialize, Serialize};

/// How the gallery orders artworks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Curator-controlled order, i.e. the order the remote returned.
    #[default]
    DisplayOrder,
    PriceAsc,
    PriceDesc,
    /// Most recently created first.
    Newest,
}

impl SortMode {
    /// Every mode, in the order the sort selector lists them.
    pub const ALL: [Self; 4] = [
        Self::DisplayOrder,
        Self::PriceAsc,
        Self::PriceDesc,
        Self::Newest,
    ];

    /// Query-string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DisplayOrder => "display_order",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::Newest => "newest",
        }
    }

    /// Label for the sort selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DisplayOrder => "Featured",
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
            Self::Newest => "Newest",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| format!("invalid sort mode: {s}"))
    }
}
