//! Plain-text rendering of catalog records.

use pencil_gallery_client::{CatalogStats, CatalogView};
use pencil_gallery_core::{AdminIdentity, Artwork, Commission};

const TITLE_WIDTH: usize = 32;

/// One line per artwork: id, title, category, price, status, featured star.
#[must_use]
pub fn artwork_line(artwork: &Artwork) -> String {
    format!(
        "{}  {:<width$}  {:<10}  {:>10}  {:<9}{}",
        artwork.id,
        clip(&artwork.title, TITLE_WIDTH),
        artwork.category.as_str(),
        artwork.price.display(),
        artwork.status.label(),
        if artwork.featured { "  *" } else { "" },
        width = TITLE_WIDTH,
    )
}

/// Every field of one artwork, one per line.
#[must_use]
pub fn artwork_details(artwork: &Artwork) -> Vec<String> {
    let mut lines = vec![
        format!("id:          {}", artwork.id),
        format!("title:       {}", artwork.title),
        format!("price:       {}", artwork.price.display()),
        format!("category:    {}", artwork.category),
        format!("medium:      {}", artwork.medium),
        format!("status:      {}", artwork.status.label()),
        format!("featured:    {}", if artwork.featured { "yes" } else { "no" }),
        format!("order:       {}", artwork.display_order),
        format!("image:       {}", artwork.image_url),
    ];
    if let Some(dimensions) = &artwork.dimensions {
        lines.push(format!("dimensions:  {dimensions}"));
    }
    if let Some(year) = artwork.year_created {
        lines.push(format!("year:        {year}"));
    }
    if let Some(description) = &artwork.description {
        lines.push(format!("description: {description}"));
    }
    lines
}

#[must_use]
pub fn commission_line(commission: &Commission) -> String {
    let client = commission
        .client_type
        .as_deref()
        .map(|client| format!(" ({client})"))
        .unwrap_or_default();
    format!(
        "{}  {:<width$}  {}{}",
        commission.created_at.format("%Y-%m-%d"),
        clip(&commission.title, TITLE_WIDTH),
        commission.category,
        client,
        width = TITLE_WIDTH,
    )
}

/// Dashboard counters.
#[must_use]
pub fn stats_lines(stats: &CatalogStats) -> Vec<String> {
    vec![
        format!("Total artworks:  {}", stats.total),
        format!("Available:       {}", stats.available),
        format!("Reserved:        {}", stats.reserved),
        format!("Sold:            {}", stats.sold),
        format!("Featured:        {}", stats.featured),
        format!("Total value:     {}", stats.total_value.display()),
    ]
}

#[must_use]
pub fn identity_line(identity: &AdminIdentity) -> String {
    format!("{} <{}>", identity.name, identity.email)
}

/// Lines for a catalog view, with `empty` shown for zero matches.
#[must_use]
pub fn view_lines<T>(view: &CatalogView<'_, T>, line: impl Fn(&T) -> String, empty: &str) -> Vec<String> {
    match view {
        CatalogView::Loading => vec!["Loading...".to_string()],
        CatalogView::Failed(err) => vec![format!("Error: {}", err.user_message())],
        CatalogView::Empty => vec![empty.to_string()],
        CatalogView::Ready(records) => records.iter().map(|record| line(*record)).collect(),
    }
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
    clipped.push('~');
    clipped
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pencil_gallery_client::GalleryError;
    use pencil_gallery_core::{
        AdminId, ArtworkId, ArtworkStatus, Category, CommissionId, Email, Price,
    };

    use super::*;

    fn artwork() -> Artwork {
        Artwork {
            id: "6f1c1c52-4c1f-4a43-9d59-3c2f0c4e8a11".parse::<ArtworkId>().unwrap(),
            title: "Kilimanjaro Morning".to_string(),
            description: Some("Sunrise over the peak".to_string()),
            price: "2500".parse::<Price>().unwrap(),
            dimensions: Some("90 x 60 cm".to_string()),
            medium: "Acrylic on Canvas".to_string(),
            year_created: Some(2024),
            category: Category::Landscapes,
            image_url: "https://cdn.example/kili.jpg".to_string(),
            status: ArtworkStatus::Reserved,
            featured: true,
            display_order: 3,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_artwork_line() {
        let line = artwork_line(&artwork());
        assert!(line.starts_with("6f1c1c52-4c1f-4a43-9d59-3c2f0c4e8a11  Kilimanjaro Morning"));
        assert!(line.contains("Landscapes"));
        assert!(line.contains("$2,500"));
        assert!(line.contains("Reserved"));
        assert!(line.ends_with('*'));
    }

    #[test]
    fn test_artwork_details_include_optional_fields() {
        let lines = artwork_details(&artwork());
        assert!(lines.contains(&"dimensions:  90 x 60 cm".to_string()));
        assert!(lines.contains(&"year:        2024".to_string()));
        assert!(lines.contains(&"featured:    yes".to_string()));
    }

    #[test]
    fn test_clip_long_titles() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("a very long title indeed", 10), "a very lo~");
    }

    #[test]
    fn test_commission_line() {
        let commission = Commission {
            id: CommissionId::random(),
            title: "Lobby Mural".to_string(),
            description: None,
            category: "Hotel".to_string(),
            image_url: "https://cdn.example/lobby.jpg".to_string(),
            client_type: Some("Hospitality".to_string()),
            created_at: Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap(),
        };
        let line = commission_line(&commission);
        assert!(line.starts_with("2024-03-09  Lobby Mural"));
        assert!(line.ends_with("Hotel (Hospitality)"));
    }

    #[test]
    fn test_stats_lines() {
        let stats = CatalogStats::from_artworks(&[artwork()]);
        let lines = stats_lines(&stats);
        assert_eq!(lines.first().unwrap(), "Total artworks:  1");
        assert!(lines.contains(&"Reserved:        1".to_string()));
        assert!(lines.contains(&"Total value:     $2,500".to_string()));
    }

    #[test]
    fn test_identity_line() {
        let identity = AdminIdentity::new(
            AdminId::new("admin-1"),
            Email::parse("owner@gallery.test").unwrap(),
            "Gallery Owner".to_string(),
        );
        assert_eq!(identity_line(&identity), "Gallery Owner <owner@gallery.test>");
    }

    #[test]
    fn test_view_lines_states() {
        let err = GalleryError::remote("boom");
        let failed = view_lines(&CatalogView::<Artwork>::Failed(&err), artwork_line, "none");
        assert_eq!(failed, vec!["Error: boom".to_string()]);

        let empty = view_lines(&CatalogView::<Artwork>::Empty, artwork_line, "No artworks.");
        assert_eq!(empty, vec!["No artworks.".to_string()]);

        let record = artwork();
        let ready = view_lines(&CatalogView::Ready(vec![&record]), artwork_line, "none");
        assert_eq!(ready.len(), 1);
    }
}
