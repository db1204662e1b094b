use axum::{Router, routing::post};
use serde::{Deserialize, Serialize};

use crate::error::BrandkitError;
use crate::extractors::{AuthUser, Form};
use crate::qr;
use crate::response::ApiResponse;

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct QrForm {
    pub website: String,
}

#[derive(Debug, Serialize)]
pub struct QrResponse {
    /// Base64-encoded PNG.
    pub qr_code: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/qr", post(qr_generator))
}

async fn qr_generator(
    AuthUser(user_id): AuthUser,
    Form(payload): Form<QrForm>,
) -> Result<ApiResponse<QrResponse>, BrandkitError> {
    let qr_code = qr::encode_png_base64(payload.website.trim())?;
    tracing::debug!(user_id, bytes = qr_code.len(), "QR code generated");
    Ok(ApiResponse::success(QrResponse { qr_code }))
}
