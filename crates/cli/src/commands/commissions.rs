//! Commission commands.

use pencil_gallery_client::CatalogStore;
use pencil_gallery_core::Commission;

use super::Context;
use crate::output::{commission_line, view_lines};

/// Print every commission, newest first.
pub async fn list(ctx: &Context) {
    let mut commissions = CatalogStore::<Commission>::new();
    commissions.refresh(&ctx.backend).await;
    for line in view_lines(&commissions.view(), commission_line, "No commissions yet.") {
        println!("{line}");
    }
}
