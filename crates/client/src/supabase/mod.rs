//! Hosted backend client.
//!
//! Talks to three surfaces of one Supabase project over plain HTTPS with
//! `reqwest`:
//!
//! - `rest/v1/` - `PostgREST` data API ([`rest`])
//! - `functions/v1/<auth function>` - the admin auth function ([`functions`])
//! - `storage/v1/` - the artwork image bucket ([`storage`])
//!
//! Every request carries the project's anon key as both the `apikey` header
//! and the bearer token. Nothing is cached: each call goes to the backend.

mod functions;
mod rest;
mod rows;
mod storage;

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::BackendConfig;
use crate::error::{GalleryError, Result};

pub use storage::object_path;

// =============================================================================
// SupabaseClient
// =============================================================================

/// Client for the gallery's hosted backend.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct SupabaseClient {
    inner: Arc<SupabaseClientInner>,
}

struct SupabaseClientInner {
    http: reqwest::Client,
    base_url: Url,
    anon_key: String,
    auth_function: String,
    image_bucket: String,
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("auth_function", &self.inner.auth_function)
            .field("image_bucket", &self.inner.image_bucket)
            .finish_non_exhaustive()
    }
}

/// Error body shapes returned by `PostgREST`, storage and the functions
/// gateway. Each uses a different field for the human message.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
    msg: Option<String>,
}

impl SupabaseClient {
    /// Create a new backend client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            inner: Arc::new(SupabaseClientInner {
                http: reqwest::Client::new(),
                base_url: config.url.clone(),
                anon_key: config.anon_key().to_string(),
                auth_function: config.auth_function.clone(),
                image_bucket: config.image_bucket.clone(),
            }),
        }
    }

    /// The project base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolve a path relative to the project URL.
    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Start a request with the project headers attached.
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.inner
            .http
            .request(method, url)
            .header("apikey", &self.inner.anon_key)
            .bearer_auth(&self.inner.anon_key)
    }

    /// Send a request and return its status and body text.
    async fn execute(&self, request: RequestBuilder) -> Result<(StatusCode, String)> {
        let response = request.send().await?;
        let status = response.status();
        // Read as text first for better error diagnostics
        let body = response.text().await?;
        Ok((status, body))
    }

    /// Send a request, turning any non-2xx status into [`GalleryError::Remote`].
    async fn execute_ok(&self, request: RequestBuilder) -> Result<String> {
        let (status, body) = self.execute(request).await?;
        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %truncate(&body, 500),
                "Backend returned non-success status"
            );
            return Err(remote_error(status, &body, None));
        }
        Ok(body)
    }
}

/// Decode a JSON body, logging the raw text when it does not match.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %truncate(body, 500),
            "Failed to parse backend response"
        );
        GalleryError::Parse(e)
    })
}

/// Decode a JSON array row by row. Rows that do not match `T` are logged
/// with their id and skipped so one bad record cannot hide the rest.
fn decode_rows<T: DeserializeOwned>(body: &str, table: &str) -> Result<Vec<T>> {
    let values: Vec<serde_json::Value> = decode(body)?;
    let total = values.len();
    let rows: Vec<T> = values
        .into_iter()
        .filter_map(|value| {
            let id = value
                .get("id")
                .map_or_else(|| "<none>".to_string(), ToString::to_string);
            serde_json::from_value(value)
                .map_err(|e| tracing::warn!(table, id = %id, error = %e, "Skipping unreadable row"))
                .ok()
        })
        .collect();
    if rows.len() < total {
        tracing::warn!(table, skipped = total - rows.len(), "Some rows were skipped");
    }
    Ok(rows)
}

/// Build a remote error from an error body, falling back to `fallback` or
/// the HTTP status when the body carries no message.
fn remote_error(status: StatusCode, body: &str, fallback: Option<&str>) -> GalleryError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.or(b.message).or(b.msg))
        .filter(|m| !m.trim().is_empty())
        .or_else(|| fallback.map(ToString::to_string))
        .unwrap_or_else(|| format!("HTTP {status}: {}", truncate(body, 200)));
    GalleryError::Remote {
        status: Some(status.as_u16()),
        message,
    }
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
