//! Authenticated admin identity.

use serde::{Deserialize, Serialize};

use super::{AdminId, Email};

/// The admin an active session belongs to, as reported by the auth function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    pub id: AdminId,
    pub email: Email,
    /// Display name shown in the dashboard header.
    #[serde(default)]
    pub name: String,
}

impl AdminIdentity {
    #[must_use]
    pub const fn new(id: AdminId, email: Email, name: String) -> Self {
        Self { id, email, name }
    }
}
