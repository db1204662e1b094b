use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::BrandkitError;

/// Upper bound on accepted form bodies.
const MAX_FORM_BYTES: usize = 64 * 1024;

/// `application/x-www-form-urlencoded` extractor.
///
/// Decodes straight into a typed struct; a missing or malformed field is a
/// `422` with the decoder's message instead of axum's plain-text rejection.
///
/// ```rust,ignore
/// async fn add_business(Form(payload): Form<NewBusiness>) -> impl IntoResponse {
///     // payload is deserialized from the request body
/// }
/// ```
pub struct Form<T>(pub T);

impl<S, T> FromRequest<S> for Form<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BrandkitError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let bytes = axum::body::to_bytes(req.into_body(), MAX_FORM_BYTES)
            .await
            .map_err(|e| BrandkitError::BadRequest(format!("Failed to read body: {}", e)))?;

        let value: T = serde_urlencoded::from_bytes(&bytes)
            .map_err(|e| BrandkitError::Validation(format!("Invalid form data: {}", e)))?;

        Ok(Form(value))
    }
}
