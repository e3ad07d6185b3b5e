//! About page route handler.

use askama::Template;
use askama_web::WebTemplate;

use crate::filters;
use crate::site::{self, ArtistBio, Shipping};

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub bio: &'static ArtistBio,
    pub shipping: &'static Shipping,
    pub artist_image: &'static str,
}

/// Display the artist bio, philosophy and shipping terms.
#[allow(clippy::unused_async)]
pub async fn about() -> AboutTemplate {
    AboutTemplate {
        bio: &site::ARTIST_BIO,
        shipping: &site::SHIPPING,
        artist_image: site::ARTIST_IMAGE,
    }
}
