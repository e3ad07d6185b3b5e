//! Demo admin account.
//!
//! Only reachable when [`SessionConfig`](crate::SessionConfig) carries a
//! [`DemoAccount`], i.e. when `GALLERY_DEMO_MODE` is on. Otherwise the demo
//! credentials and token are sent to the backend like any other input.

use std::time::Duration;

use pencil_gallery_core::{AdminId, AdminIdentity, Email};
use secrecy::{ExposeSecret, SecretString};

/// Session token persisted for a demo login.
pub const DEMO_TOKEN: &str = "demo-token";

/// Admin id of the demo identity.
pub const DEMO_ADMIN_ID: &str = "demo-admin-id";

/// Simulated latency of a demo login.
pub const DEMO_LOGIN_DELAY: Duration = Duration::from_millis(800);

/// Simulated latency of verifying a demo token.
pub const DEMO_VERIFY_DELAY: Duration = Duration::from_millis(500);

/// Credentials and identity of the demo admin.
#[derive(Clone)]
pub struct DemoAccount {
    email: Email,
    password: SecretString,
    name: String,
}

impl std::fmt::Debug for DemoAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DemoAccount")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}

impl DemoAccount {
    #[must_use]
    pub fn new(email: Email, password: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email,
            password: SecretString::from(password.into()),
            name: name.into(),
        }
    }

    /// Whether `email`/`password` are the demo credentials.
    #[must_use]
    pub fn matches(&self, email: &Email, password: &str) -> bool {
        self.email == *email && self.password.expose_secret() == password
    }

    /// The identity a demo session authenticates as.
    #[must_use]
    pub fn identity(&self) -> AdminIdentity {
        AdminIdentity::new(
            AdminId::new(DEMO_ADMIN_ID),
            self.email.clone(),
            self.name.clone(),
        )
    }
}
