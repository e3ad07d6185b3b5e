//! Command implementations.
//!
//! Every command builds a [`Context`] from the environment. Commands that
//! change the catalog first restore the stored admin session and refuse to
//! run without one.

pub mod artworks;
pub mod commissions;
pub mod session;

use std::path::PathBuf;

use pencil_gallery_client::{
    BackendConfig, ConfigError, FileTokenStore, GalleryError, SessionConfig, SessionGate,
    SessionState, SupabaseClient,
};
use pencil_gallery_core::AdminIdentity;
use thiserror::Error;

/// Errors reported to the admin.
#[derive(Debug, Error)]
pub enum CliError {
    /// Missing or invalid environment configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A backend call or a form check failed.
    #[error("{}", .0.user_message())]
    Gallery(#[from] GalleryError),

    /// The command needs a signed-in admin.
    #[error("Not signed in. Run `pg-admin session login` first.")]
    NotSignedIn,

    /// Interactive input could not be read.
    #[error("Could not read input: {0}")]
    Input(#[source] std::io::Error),

    /// A local file could not be read.
    #[error("Could not read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Backend client and session settings for one command.
#[derive(Debug)]
pub struct Context {
    pub backend: SupabaseClient,
    pub session: SessionConfig,
}

impl Context {
    /// Load backend and session configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if required variables are missing or
    /// invalid.
    pub fn from_env() -> Result<Self, CliError> {
        let backend = BackendConfig::from_env()?;
        let session = SessionConfig::from_env()?;
        tracing::debug!(backend = %backend.url, state_dir = %session.state_dir.display(), "Loaded configuration");
        Ok(Self {
            backend: SupabaseClient::new(&backend),
            session,
        })
    }

    /// A session gate over the token file in the state directory.
    #[must_use]
    pub fn gate(&self) -> SessionGate<SupabaseClient, FileTokenStore> {
        SessionGate::new(
            self.backend.clone(),
            FileTokenStore::new(self.session.token_path()),
            self.session.demo.clone(),
        )
    }

    /// Restore the stored session.
    ///
    /// # Errors
    ///
    /// Returns `CliError::NotSignedIn` unless the stored token verifies.
    pub async fn require_admin(&self) -> Result<AdminIdentity, CliError> {
        let mut gate = self.gate();
        match gate.verify().await {
            SessionState::Authenticated(identity) => Ok(identity.clone()),
            SessionState::Unverified | SessionState::Verifying | SessionState::Anonymous => {
                Err(CliError::NotSignedIn)
            }
        }
    }
}
