//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use crate::site;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Turns an enquiry message into a WhatsApp chat link.
///
/// Usage in templates: `{{ "Hello Doctor Pencil!"|whatsapp }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn whatsapp(message: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(site::whatsapp_link(&message.to_string()))
}
