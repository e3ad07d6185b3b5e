//! In-memory backend for unit tests.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use pencil_gallery_core::{
    AdminId, AdminIdentity, Artwork, ArtworkId, ArtworkStatus, Category, Commission, Email, Price,
};
use rust_decimal::Decimal;
use secrecy::SecretString;

use crate::draft::{ArtworkPatch, NewArtwork};
use crate::error::{GalleryError, Result};
use crate::remote::{ArtworkWriter, AuthApi, AuthSession, CatalogSource, ResetRequest};

pub const VALID_TOKEN: &str = "valid-session";
pub const VALID_PASSWORD: &str = "correct horse";
pub const RESET_TOKEN: &str = "reset-123";

pub fn admin_identity() -> AdminIdentity {
    AdminIdentity::new(
        AdminId::new("admin-1"),
        Email::parse("owner@gallery.test").unwrap(),
        "Gallery Owner".to_string(),
    )
}

fn timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
}

pub fn sample_artwork(title: &str, category: Category, price: i64) -> Artwork {
    Artwork {
        id: ArtworkId::random(),
        title: title.to_string(),
        description: None,
        price: Price::new(Decimal::from(price)).unwrap(),
        dimensions: None,
        medium: "Acrylic on Canvas".to_string(),
        year_created: Some(2024),
        category,
        image_url: format!("https://cdn.example/{title}.jpg"),
        status: ArtworkStatus::Available,
        featured: false,
        display_order: 0,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

/// Number of calls per surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Calls {
    pub artworks: usize,
    pub featured: usize,
    pub commissions: usize,
    pub writes: usize,
    pub auth: usize,
}

#[derive(Debug, Default)]
struct Inner {
    artworks: Vec<Artwork>,
    commissions: Vec<Commission>,
    calls: Calls,
    fail_fetch: Option<String>,
    fail_write: Option<String>,
    fail_auth: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    inner: Arc<Mutex<Inner>>,
}

impl FakeBackend {
    pub fn with_artworks(artworks: Vec<Artwork>) -> Self {
        let backend = Self::default();
        backend.inner.lock().unwrap().artworks = artworks;
        backend
    }

    pub fn artworks_snapshot(&self) -> Vec<Artwork> {
        self.inner.lock().unwrap().artworks.clone()
    }

    pub fn calls(&self) -> Calls {
        self.inner.lock().unwrap().calls
    }

    pub fn fail_next_fetch(&self, message: &str) {
        self.inner.lock().unwrap().fail_fetch = Some(message.to_string());
    }

    pub fn fail_next_write(&self, message: &str) {
        self.inner.lock().unwrap().fail_write = Some(message.to_string());
    }

    pub fn fail_next_auth(&self, message: &str) {
        self.inner.lock().unwrap().fail_auth = Some(message.to_string());
    }

    fn fetch<T>(&self, count: impl FnOnce(&mut Calls), read: impl FnOnce(&Inner) -> T) -> Result<T> {
        let mut inner = self.inner.lock().unwrap();
        count(&mut inner.calls);
        if let Some(message) = inner.fail_fetch.take() {
            return Err(GalleryError::remote(message));
        }
        Ok(read(&*inner))
    }

    fn write<T>(&self, apply: impl FnOnce(&mut Inner) -> Result<T>) -> Result<T> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.writes += 1;
        if let Some(message) = inner.fail_write.take() {
            return Err(GalleryError::remote(message));
        }
        apply(&mut *inner)
    }

    fn auth(&self) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.auth += 1;
        inner
            .fail_auth
            .take()
            .map_or(Ok(()), |message| Err(GalleryError::remote(message)))
    }
}

fn apply_patch(artwork: &mut Artwork, patch: &ArtworkPatch, updated_at: DateTime<Utc>) {
    if let Some(title) = &patch.title {
        artwork.title.clone_from(title);
    }
    if let Some(description) = &patch.description {
        artwork.description.clone_from(description);
    }
    if let Some(price) = patch.price {
        artwork.price = price;
    }
    if let Some(dimensions) = &patch.dimensions {
        artwork.dimensions.clone_from(dimensions);
    }
    if let Some(medium) = &patch.medium {
        artwork.medium.clone_from(medium);
    }
    if let Some(year) = patch.year_created {
        artwork.year_created = year;
    }
    if let Some(category) = patch.category {
        artwork.category = category;
    }
    if let Some(image_url) = &patch.image_url {
        artwork.image_url.clone_from(image_url);
    }
    if let Some(status) = patch.status {
        artwork.status = status;
    }
    if let Some(featured) = patch.featured {
        artwork.featured = featured;
    }
    if let Some(order) = patch.display_order {
        artwork.display_order = order;
    }
    artwork.updated_at = updated_at;
}

impl CatalogSource for FakeBackend {
    async fn artworks(&self) -> Result<Vec<Artwork>> {
        self.fetch(|c| c.artworks += 1, |inner| {
            let mut artworks = inner.artworks.clone();
            artworks.sort_by_key(|a| a.display_order);
            artworks
        })
    }

    async fn featured_artworks(&self) -> Result<Vec<Artwork>> {
        self.fetch(|c| c.featured += 1, |inner| {
            let mut artworks: Vec<Artwork> =
                inner.artworks.iter().filter(|a| a.featured).cloned().collect();
            artworks.sort_by_key(|a| a.display_order);
            artworks
        })
    }

    async fn commissions(&self) -> Result<Vec<Commission>> {
        self.fetch(|c| c.commissions += 1, |inner| inner.commissions.clone())
    }
}

impl ArtworkWriter for FakeBackend {
    async fn insert_artwork(&self, artwork: &NewArtwork) -> Result<Artwork> {
        self.write(|inner| {
            let now = Utc::now();
            let created = Artwork {
                id: ArtworkId::random(),
                title: artwork.title.clone(),
                description: artwork.description.clone(),
                price: artwork.price,
                dimensions: artwork.dimensions.clone(),
                medium: artwork.medium.clone(),
                year_created: artwork.year_created,
                category: artwork.category,
                image_url: artwork.image_url.clone(),
                status: artwork.status,
                featured: artwork.featured,
                display_order: artwork.display_order,
                created_at: now,
                updated_at: now,
            };
            inner.artworks.push(created.clone());
            Ok(created)
        })
    }

    async fn update_artwork(
        &self,
        id: ArtworkId,
        patch: &ArtworkPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Artwork> {
        self.write(|inner| {
            let artwork = inner
                .artworks
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or_else(|| GalleryError::remote("Artwork not found"))?;
            apply_patch(artwork, patch, updated_at);
            Ok(artwork.clone())
        })
    }

    async fn delete_artwork(&self, id: ArtworkId) -> Result<()> {
        self.write(|inner| {
            inner.artworks.retain(|a| a.id != id);
            Ok(())
        })
    }
}

impl AuthApi for FakeBackend {
    async fn login(&self, email: &Email, password: &str) -> Result<AuthSession> {
        self.auth()?;
        let identity = admin_identity();
        if *email == identity.email && password == VALID_PASSWORD {
            Ok(AuthSession {
                identity,
                token: SecretString::from(VALID_TOKEN),
            })
        } else {
            Err(GalleryError::remote("Invalid email or password"))
        }
    }

    async fn register(&self, name: &str, email: &Email, _password: &str) -> Result<AdminIdentity> {
        self.auth()?;
        Ok(AdminIdentity::new(
            AdminId::new("admin-2"),
            email.clone(),
            name.to_string(),
        ))
    }

    async fn verify(&self, token: &str) -> Result<Option<AdminIdentity>> {
        self.auth()?;
        Ok((token == VALID_TOKEN).then(admin_identity))
    }

    async fn logout(&self, _token: &str) -> Result<()> {
        self.auth()
    }

    async fn request_reset(&self, _email: &Email) -> Result<ResetRequest> {
        self.auth()?;
        Ok(ResetRequest {
            reset_token: Some(RESET_TOKEN.to_string()),
        })
    }

    async fn reset_password(&self, token: &str, _new_password: &str) -> Result<()> {
        self.auth()?;
        if token == RESET_TOKEN {
            Ok(())
        } else {
            Err(GalleryError::remote("Invalid or expired reset token"))
        }
    }
}
