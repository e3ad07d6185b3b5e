//! Integration tests for Pencil Gallery.
//!
//! The tests run the real [`SupabaseClient`] against [`FakeSupabase`], an
//! in-process axum server that answers the three backend surfaces the
//! gallery uses:
//!
//! - `rest/v1/artworks` and `rest/v1/commissions` (`PostgREST` subset)
//! - `functions/v1/admin-auth` (the admin auth function)
//! - `storage/v1/object/<bucket>/<path>` (image uploads)
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pencil-gallery-integration-tests
//! ```
//!
//! No network access or external services are needed.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use chrono::{Duration, TimeZone, Utc};
use pencil_gallery_client::{BackendConfig, SupabaseClient};
use pencil_gallery_core::ArtworkId;
use serde_json::{Map, Value, json};

/// Anon key the fake backend accepts.
pub const ANON_KEY: &str = "test-anon-key";

/// An upload received by the fake storage API.
#[derive(Debug, Clone)]
pub struct Upload {
    pub bucket: String,
    pub path: String,
    pub content_type: Option<String>,
    pub size: usize,
}

#[derive(Debug, Clone)]
struct Admin {
    id: String,
    email: String,
    password: String,
    name: String,
}

impl Admin {
    fn user(&self) -> Value {
        json!({"id": self.id, "email": self.email, "name": self.name})
    }
}

#[derive(Debug, Default)]
struct FakeState {
    artworks: Vec<Map<String, Value>>,
    commissions: Vec<Value>,
    admins: Vec<Admin>,
    sessions: HashMap<String, String>,
    reset_tokens: HashMap<String, String>,
    uploads: Vec<Upload>,
    writes: usize,
    failing: bool,
}

type Shared = Arc<Mutex<FakeState>>;

fn lock(state: &Shared) -> MutexGuard<'_, FakeState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// FakeSupabase
// =============================================================================

/// In-process stand-in for the hosted backend.
///
/// The server runs until the test's runtime shuts down.
#[derive(Debug, Clone)]
pub struct FakeSupabase {
    base_url: String,
    state: Shared,
}

impl FakeSupabase {
    /// Bind to an ephemeral port and start serving.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start() -> Self {
        let state = Shared::default();
        let app = router(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake backend");
        let addr = listener.local_addr().expect("fake backend address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Backend configuration pointing at this server.
    ///
    /// # Panics
    ///
    /// Panics if the server URL is rejected, which cannot happen for a
    /// loopback address.
    #[must_use]
    pub fn config(&self) -> BackendConfig {
        BackendConfig::new(&self.base_url, ANON_KEY).expect("valid fake backend url")
    }

    #[must_use]
    pub fn client(&self) -> SupabaseClient {
        SupabaseClient::new(&self.config())
    }

    /// Insert an artwork row directly, bypassing the API.
    ///
    /// # Panics
    ///
    /// Panics if `row` has no valid `id`.
    pub fn seed_artwork(&self, row: Value) -> ArtworkId {
        let Value::Object(row) = row else {
            panic!("artwork row must be an object");
        };
        let id = row
            .get("id")
            .and_then(Value::as_str)
            .and_then(|id| id.parse().ok())
            .expect("artwork row id");
        lock(&self.state).artworks.push(row);
        id
    }

    pub fn seed_commission(&self, row: Value) {
        lock(&self.state).commissions.push(row);
    }

    /// Register an admin account directly.
    pub fn add_admin(&self, email: &str, password: &str, name: &str) {
        lock(&self.state).admins.push(Admin {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        });
    }

    /// Make every data API call fail with a 503.
    pub fn set_failing(&self, failing: bool) {
        lock(&self.state).failing = failing;
    }

    /// Number of artwork writes (insert, update, delete) received.
    #[must_use]
    pub fn writes(&self) -> usize {
        lock(&self.state).writes
    }

    #[must_use]
    pub fn uploads(&self) -> Vec<Upload> {
        lock(&self.state).uploads.clone()
    }

    /// The stored row for an artwork, as the database holds it.
    #[must_use]
    pub fn artwork_row(&self, id: ArtworkId) -> Option<Value> {
        let id = id.to_string();
        lock(&self.state)
            .artworks
            .iter()
            .find(|row| row.get("id").and_then(Value::as_str) == Some(id.as_str()))
            .map(|row| Value::Object(row.clone()))
    }

    #[must_use]
    pub fn artwork_count(&self) -> usize {
        lock(&self.state).artworks.len()
    }

    /// Number of live sessions.
    #[must_use]
    pub fn session_count(&self) -> usize {
        lock(&self.state).sessions.len()
    }
}

// =============================================================================
// Row Builders
// =============================================================================

/// A complete artwork row with sensible defaults. `display_order` also
/// spaces out `created_at` so later rows are newer.
#[must_use]
pub fn artwork_row(title: &str, category: &str, price: u32, display_order: i32) -> Value {
    let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).single().unwrap_or_default()
        + Duration::days(i64::from(display_order));
    json!({
        "id": uuid::Uuid::new_v4().to_string(),
        "title": title,
        "description": format!("{title}, painted in Dar es Salaam"),
        "price": price,
        "dimensions": "90 x 60 cm",
        "medium": "Acrylic on Canvas",
        "year_created": 2024,
        "category": category,
        "image_url": format!("https://cdn.example/{}.jpg", title.to_lowercase().replace(' ', "-")),
        "is_available": true,
        "is_featured": false,
        "is_sold": false,
        "display_order": display_order,
        "created_at": created_at.to_rfc3339(),
        "updated_at": created_at.to_rfc3339(),
    })
}

/// A commission row created `days_ago` days before 2025-01-01.
#[must_use]
pub fn commission_row(title: &str, category: &str, days_ago: i64) -> Value {
    let created_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single().unwrap_or_default()
        - Duration::days(days_ago);
    json!({
        "id": uuid::Uuid::new_v4().to_string(),
        "title": title,
        "description": null,
        "category": category,
        "image_url": "https://cdn.example/commission.jpg",
        "client_type": "Hospitality",
        "created_at": created_at.to_rfc3339(),
    })
}

// =============================================================================
// Server
// =============================================================================

fn router(state: Shared) -> Router {
    Router::new()
        .route(
            "/rest/v1/artworks",
            get(select_artworks)
                .post(insert_artworks)
                .patch(update_artworks)
                .delete(delete_artworks),
        )
        .route("/rest/v1/commissions", get(select_commissions))
        .route("/functions/v1/admin-auth", post(auth_function))
        .route("/storage/v1/object/{bucket}/{*path}", post(upload_object))
        .with_state(state)
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"message": message}))).into_response()
}

/// Reject requests without the project key, like the API gateway does.
fn check_key(headers: &HeaderMap) -> Result<(), Response> {
    let apikey = headers.get("apikey").and_then(|v| v.to_str().ok());
    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    if apikey == Some(ANON_KEY) && bearer == Some(ANON_KEY) {
        Ok(())
    } else {
        Err(error(StatusCode::UNAUTHORIZED, "Invalid API key"))
    }
}

fn check_data_api(state: &Shared, headers: &HeaderMap) -> Result<(), Response> {
    check_key(headers)?;
    if lock(state).failing {
        return Err(error(StatusCode::SERVICE_UNAVAILABLE, "upstream unavailable"));
    }
    Ok(())
}

/// `id=eq.<uuid>` filter value.
fn id_filter(params: &HashMap<String, String>) -> Option<&str> {
    params.get("id").and_then(|v| v.strip_prefix("eq."))
}

fn row_id(row: &Map<String, Value>) -> Option<&str> {
    row.get("id").and_then(Value::as_str)
}

async fn select_artworks(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(response) = check_data_api(&state, &headers) {
        return response;
    }
    let featured_only = params.get("is_featured").map(String::as_str) == Some("eq.true");
    let mut rows: Vec<Map<String, Value>> = lock(&state)
        .artworks
        .iter()
        .filter(|row| !featured_only || row.get("is_featured") == Some(&Value::Bool(true)))
        .cloned()
        .collect();
    if params.get("order").map(String::as_str) == Some("display_order.asc") {
        rows.sort_by_key(|row| row.get("display_order").and_then(Value::as_i64).unwrap_or(0));
    }
    Json(rows).into_response()
}

async fn insert_artworks(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(rows): Json<Vec<Map<String, Value>>>,
) -> Response {
    if let Err(response) = check_data_api(&state, &headers) {
        return response;
    }
    let now = Utc::now().to_rfc3339();
    let mut guard = lock(&state);
    guard.writes += 1;
    let mut created = Vec::new();
    for mut row in rows {
        if row.get("title").and_then(Value::as_str).is_none_or(str::is_empty) {
            return error(StatusCode::BAD_REQUEST, "null value in column \"title\"");
        }
        row.insert("id".to_string(), json!(uuid::Uuid::new_v4().to_string()));
        row.insert("created_at".to_string(), json!(now));
        row.insert("updated_at".to_string(), json!(now));
        guard.artworks.push(row.clone());
        created.push(row);
    }
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn update_artworks(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
    Json(patch): Json<Map<String, Value>>,
) -> Response {
    if let Err(response) = check_data_api(&state, &headers) {
        return response;
    }
    let Some(id) = id_filter(&params) else {
        return error(StatusCode::BAD_REQUEST, "UPDATE requires a WHERE clause");
    };
    let mut guard = lock(&state);
    guard.writes += 1;
    let updated: Vec<Map<String, Value>> = guard
        .artworks
        .iter_mut()
        .filter(|row| row_id(row) == Some(id))
        .map(|row| {
            for (key, value) in &patch {
                row.insert(key.clone(), value.clone());
            }
            row.clone()
        })
        .collect();
    Json(updated).into_response()
}

async fn delete_artworks(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(response) = check_data_api(&state, &headers) {
        return response;
    }
    let Some(id) = id_filter(&params).map(ToString::to_string) else {
        return error(StatusCode::BAD_REQUEST, "DELETE requires a WHERE clause");
    };
    let mut guard = lock(&state);
    guard.writes += 1;
    guard.artworks.retain(|row| row_id(row) != Some(id.as_str()));
    StatusCode::NO_CONTENT.into_response()
}

async fn select_commissions(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(response) = check_data_api(&state, &headers) {
        return response;
    }
    let mut rows = lock(&state).commissions.clone();
    if params.get("order").map(String::as_str) == Some("created_at.desc") {
        let created = |row: &Value| {
            row.get("created_at")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        rows.sort_by_key(|row| std::cmp::Reverse(created(row)));
    }
    Json(rows).into_response()
}

async fn upload_object(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((bucket, path)): Path<(String, String)>,
    body: Bytes,
) -> Response {
    if let Err(response) = check_key(&headers) {
        return response;
    }
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    lock(&state).uploads.push(Upload {
        bucket: bucket.clone(),
        path: path.clone(),
        content_type,
        size: body.len(),
    });
    Json(json!({"Key": format!("{bucket}/{path}")})).into_response()
}

// =============================================================================
// Auth Function
// =============================================================================

fn field<'a>(body: &'a Value, name: &str) -> &'a str {
    body.get(name).and_then(Value::as_str).unwrap_or_default()
}

/// Function-level error: the function answers 200 with an `error` field
/// for expected failures.
fn function_error(message: &str) -> Response {
    Json(json!({"error": message})).into_response()
}

async fn auth_function(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(response) = check_key(&headers) {
        return response;
    }
    let mut guard = lock(&state);
    match field(&body, "action") {
        "login" => {
            let email = field(&body, "email");
            let password = field(&body, "password");
            let Some(admin) = guard
                .admins
                .iter()
                .find(|a| a.email == email && a.password == password)
                .cloned()
            else {
                return (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"error": "Invalid email or password"})),
                )
                    .into_response();
            };
            let token = uuid::Uuid::new_v4().to_string();
            guard.sessions.insert(token.clone(), admin.email.clone());
            Json(json!({"user": admin.user(), "sessionToken": token})).into_response()
        }
        "register" => {
            let email = field(&body, "email");
            if guard.admins.iter().any(|a| a.email == email) {
                return function_error("An account with this email already exists");
            }
            let admin = Admin {
                id: uuid::Uuid::new_v4().to_string(),
                email: email.to_string(),
                password: field(&body, "password").to_string(),
                name: field(&body, "name").to_string(),
            };
            let user = admin.user();
            guard.admins.push(admin);
            Json(json!({"user": user})).into_response()
        }
        "verify" => {
            let token = field(&body, "sessionToken");
            let admin = guard
                .sessions
                .get(token)
                .and_then(|email| guard.admins.iter().find(|a| &a.email == email));
            match admin {
                Some(admin) => Json(json!({"valid": true, "user": admin.user()})).into_response(),
                None => Json(json!({"valid": false})).into_response(),
            }
        }
        "logout" => {
            guard.sessions.remove(field(&body, "sessionToken"));
            Json(json!({"success": true})).into_response()
        }
        "requestReset" => {
            let email = field(&body, "email").to_string();
            if !guard.admins.iter().any(|a| a.email == email) {
                // Unknown addresses get the same answer as known ones
                return Json(json!({"success": true})).into_response();
            }
            let token = uuid::Uuid::new_v4().to_string();
            guard.reset_tokens.insert(token.clone(), email);
            Json(json!({"success": true, "resetToken": token})).into_response()
        }
        "resetPassword" => {
            let Some(email) = guard.reset_tokens.remove(field(&body, "token")) else {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "Invalid or expired reset token"})),
                )
                    .into_response();
            };
            let password = field(&body, "newPassword").to_string();
            if let Some(admin) = guard.admins.iter_mut().find(|a| a.email == email) {
                admin.password = password;
            }
            guard.sessions.retain(|_, session_email| *session_email != email);
            Json(json!({"success": true})).into_response()
        }
        other => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": format!("Unknown action: {other}")})),
        )
            .into_response(),
    }
}
