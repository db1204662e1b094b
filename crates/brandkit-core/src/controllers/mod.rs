use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::auth::RateLimiter;
use crate::config::Config;
use crate::synonyms::SynonymSource;

pub mod auth;
pub mod businesses;
pub mod generators;
pub mod products;
pub mod qr;

/// Shared application state available in all handlers.
///
/// Every service is built once at startup and injected here; handlers reach
/// nothing through globals.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    pub synonyms: Arc<dyn SynonymSource>,
    pub rate_limiter: Arc<RateLimiter>,
}

/// Record a field error if `value` is blank or longer than `max_chars`.
pub(crate) fn check_text(
    errors: &mut Vec<crate::error::FieldError>,
    field: &str,
    value: &str,
    max_chars: Option<usize>,
) {
    use crate::error::FieldError;

    if value.trim().is_empty() {
        errors.push(FieldError::with_code(field, "is required", "required"));
    } else if let Some(max) = max_chars {
        if value.chars().count() > max {
            errors.push(FieldError::with_code(
                field,
                format!("must be at most {max} characters"),
                "too_long",
            ));
        }
    }
}
