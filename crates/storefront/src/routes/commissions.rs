//! Commission showcase route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use pencil_gallery_client::CatalogStore;
use pencil_gallery_core::Commission;
use tracing::instrument;

use crate::filters;
use crate::routes::gallery::Listing;
use crate::site;
use crate::state::AppState;

/// Commission display data for templates.
pub struct CommissionCard {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub image_url: String,
    pub client_type: Option<String>,
    pub enquiry_link: String,
}

impl CommissionCard {
    #[must_use]
    pub fn new(commission: &Commission) -> Self {
        Self {
            title: commission.title.clone(),
            description: commission.description.clone(),
            category: commission.category.clone(),
            image_url: commission.image_url.clone(),
            client_type: commission.client_type.clone(),
            enquiry_link: site::whatsapp_link(&site::similar_commission_enquiry(commission)),
        }
    }
}

/// Commissions page template.
#[derive(Template, WebTemplate)]
#[template(path = "commissions.html")]
pub struct CommissionsTemplate {
    pub listing: Listing<CommissionCard>,
}

/// Display past commissions, newest first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> CommissionsTemplate {
    let mut commissions = CatalogStore::<Commission>::new();
    commissions.refresh(state.backend()).await;

    CommissionsTemplate {
        listing: Listing::from_view(commissions.view(), CommissionCard::new),
    }
}
