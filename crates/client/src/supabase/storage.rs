//! Artwork image uploads to the storage bucket.

use chrono::Utc;
use rand::Rng;
use reqwest::Method;
use tracing::{info, instrument};

use super::SupabaseClient;
use crate::error::{Result, ValidationError};
use crate::remote::ImageStore;

/// Folder inside the bucket that holds artwork images.
const ARTWORK_FOLDER: &str = "artworks";

/// Length of the random suffix that keeps same-millisecond uploads apart.
const SUFFIX_LEN: usize = 7;

/// Content type for an image file name, by extension.
fn content_type(extension: &str) -> Option<&'static str> {
    match extension {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

/// Lowercased extension of `file_name`, if it is an accepted image type.
fn image_extension(file_name: &str) -> std::result::Result<String, ValidationError> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| content_type(ext).is_some())
        .ok_or_else(|| ValidationError::UnsupportedImage(file_name.to_string()))
}

/// Bucket path for a new upload of `file_name`:
/// `artworks/<unix millis>-<7 random base-36 chars>.<ext>`.
///
/// # Errors
///
/// Returns [`ValidationError::UnsupportedImage`] if the extension is not a
/// JPEG, PNG, WebP or GIF.
pub fn object_path(file_name: &str) -> std::result::Result<String, ValidationError> {
    let extension = image_extension(file_name)?;
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .filter_map(|_| char::from_digit(rng.random_range(0..36), 36))
        .collect();
    Ok(format!(
        "{ARTWORK_FOLDER}/{}-{suffix}.{extension}",
        Utc::now().timestamp_millis()
    ))
}

impl SupabaseClient {
    /// Public URL of an object in the image bucket.
    fn public_url(&self, path: &str) -> Result<String> {
        let url = self.endpoint(&format!(
            "storage/v1/object/public/{}/{path}",
            self.inner.image_bucket
        ))?;
        Ok(url.into())
    }
}

impl ImageStore for SupabaseClient {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        let path = object_path(file_name)?;
        let extension = image_extension(file_name)?;
        let mime = content_type(&extension).unwrap_or("application/octet-stream");

        let url = self.endpoint(&format!(
            "storage/v1/object/{}/{path}",
            self.inner.image_bucket
        ))?;
        let request = self
            .request(Method::POST, url)
            .header("Content-Type", mime)
            .header("Cache-Control", "max-age=3600")
            .header("x-upsert", "false")
            .body(bytes);
        self.execute_ok(request).await?;

        info!(path = %path, "Uploaded artwork image");
        self.public_url(&path)
    }
}
