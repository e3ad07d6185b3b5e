//! Commission showcase record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CommissionId;

/// A past commissioned piece shown in the commissions section.
///
/// Unlike artworks, the category is free text (`"Hotel Lobby"`,
/// `"Family Portrait"`) and the record is never sold through the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commission {
    pub id: CommissionId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    pub image_url: String,
    /// Kind of client, e.g. `"Corporate"` or `"Residential"`.
    #[serde(default)]
    pub client_type: Option<String>,
    pub created_at: DateTime<Utc>,
}
