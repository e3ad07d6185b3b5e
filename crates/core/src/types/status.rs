//! Sale status of an artwork.
//!
//! The remote `artworks` table stores two independent booleans
//! (`is_available`, `is_sold`). The domain model collapses them into one
//! three-state [`ArtworkStatus`] so the contradictory "sold and available"
//! state cannot be written back. [`ArtworkStatus::from_flags`] and
//! [`ArtworkStatus::to_flags`] are the only places the two encodings meet.

use serde::{Deserialize, Serialize};

/// Whether an artwork can be bought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArtworkStatus {
    /// Listed and for sale.
    #[default]
    Available,
    /// Not sold, but not currently offered (on hold for a buyer, on loan).
    Reserved,
    /// Sold; shown in the gallery with a "similar piece" enquiry instead.
    Sold,
}

impl ArtworkStatus {
    /// Decode the remote `(is_available, is_sold)` pair. `is_sold` wins.
    #[must_use]
    pub const fn from_flags(is_available: bool, is_sold: bool) -> Self {
        match (is_available, is_sold) {
            (_, true) => Self::Sold,
            (true, false) => Self::Available,
            (false, false) => Self::Reserved,
        }
    }

    /// Encode as the remote `(is_available, is_sold)` pair.
    #[must_use]
    pub const fn to_flags(self) -> (bool, bool) {
        match self {
            Self::Available => (true, false),
            Self::Reserved => (false, false),
            Self::Sold => (false, true),
        }
    }

    /// The status after an admin presses "toggle sold".
    ///
    /// A sold artwork goes back on sale; anything else becomes sold.
    #[must_use]
    pub const fn toggled_sold(self) -> Self {
        match self {
            Self::Sold => Self::Available,
            Self::Available | Self::Reserved => Self::Sold,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Reserved => "Reserved",
            Self::Sold => "Sold",
        }
    }
}

impl std::fmt::Display for ArtworkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Reserved => write!(f, "reserved"),
            Self::Sold => write!(f, "sold"),
        }
    }
}

impl std::str::FromStr for ArtworkStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "reserved" => Ok(Self::Reserved),
            "sold" => Ok(Self::Sold),
            _ => Err(format!("invalid artwork status: {s}")),
        }
    }
}
