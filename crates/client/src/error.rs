//! Error types for the gallery client.
//!
//! Three kinds of failure reach callers:
//!
//! - [`GalleryError::Network`] - the call never completed (DNS, TLS, reset)
//! - [`GalleryError::Remote`] - the backend answered with a domain error
//!   (bad credentials, duplicate account, row not found)
//! - [`GalleryError::Validation`] - rejected before any call was made
//!
//! None of them is fatal. Catalog fetch errors are stored in the catalog
//! store, mutation errors are handed back to whoever pressed the button, and
//! session verification errors are swallowed by the session gate.

use pencil_gallery_core::{ArtworkId, CategoryError, EmailError, PriceError};
use thiserror::Error;

use crate::session::TokenStoreError;

/// Errors returned by the gallery client.
#[derive(Debug, Error)]
pub enum GalleryError {
    /// The HTTP request failed to complete.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend completed the call but reported an error.
    #[error("{message}")]
    Remote {
        /// HTTP status, when the error came with one.
        status: Option<u16>,
        /// Message suitable for showing to the admin.
        message: String,
    },

    /// The backend answered with a body we could not decode.
    #[error("unexpected response from backend: {0}")]
    Parse(#[from] serde_json::Error),

    /// Input rejected before calling the backend.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The persisted session token could not be read or written.
    #[error("session storage error: {0}")]
    TokenStore(#[from] TokenStoreError),

    /// A request URL could not be built from the configured base URL.
    #[error("invalid backend URL: {0}")]
    Url(#[from] url::ParseError),
}

impl GalleryError {
    /// A remote error without an HTTP status.
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            status: None,
            message: message.into(),
        }
    }

    /// Whether the call failed before reaching the backend.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Message to show an admin in a form or notification.
    ///
    /// Transport and decoding failures collapse into a generic retry hint;
    /// remote and validation messages pass through.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) | Self::Parse(_) | Self::Url(_) => {
                "An unexpected error occurred. Please try again.".to_string()
            }
            Self::TokenStore(_) => "Could not save your session on this device.".to_string(),
            Self::Remote { message, .. } => message.clone(),
            Self::Validation(err) => err.to_string(),
        }
    }
}

/// Input rejected on the caller side, before any remote call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field is blank.
    #[error("{0} is required")]
    Required(&'static str),

    /// The artwork has no uploaded image.
    #[error("Please upload an image")]
    MissingImage,

    /// The uploaded file is not an image type the bucket accepts.
    #[error("unsupported image type: {0}")]
    UnsupportedImage(String),

    /// Invalid price.
    #[error(transparent)]
    Price(#[from] PriceError),

    /// Category outside the fixed set.
    #[error(transparent)]
    Category(#[from] CategoryError),

    /// Malformed email address.
    #[error("invalid email: {0}")]
    Email(#[from] EmailError),

    /// Password shorter than the minimum.
    #[error("Password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum number of characters.
        min: usize,
    },

    /// Password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// The artwork is not in the loaded catalog.
    #[error("artwork {0} is not in the catalog")]
    UnknownArtwork(ArtworkId),
}

/// Result type alias for [`GalleryError`].
pub type Result<T> = std::result::Result<T, GalleryError>;
