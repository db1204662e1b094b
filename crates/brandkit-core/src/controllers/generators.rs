use std::collections::BTreeSet;

use axum::{Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};

use crate::error::BrandkitError;
use crate::extractors::Form;
use crate::generator;
use crate::response::ApiResponse;

use super::AppState;

/// Comma-separated keyword field shared by both generators.
#[derive(Debug, Deserialize)]
pub struct KeywordsForm {
    pub keywords: String,
}

#[derive(Debug, Serialize)]
pub struct CompanyNamesResponse {
    pub company_names: BTreeSet<String>,
}

#[derive(Debug, Serialize)]
pub struct HashtagsResponse {
    pub hashtags: BTreeSet<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/generate/company-names", post(generate_company_names))
        .route("/generate/hashtags", post(generate_hashtags))
}

async fn generate_company_names(
    State(state): State<AppState>,
    Form(payload): Form<KeywordsForm>,
) -> Result<ApiResponse<CompanyNamesResponse>, BrandkitError> {
    let company_names = generator::company_names_for(
        state.synonyms.as_ref(),
        &payload.keywords,
        &mut rand::thread_rng(),
    );
    tracing::debug!(count = company_names.len(), "Company names generated");
    Ok(ApiResponse::success(CompanyNamesResponse { company_names }))
}

async fn generate_hashtags(
    State(state): State<AppState>,
    Form(payload): Form<KeywordsForm>,
) -> Result<ApiResponse<HashtagsResponse>, BrandkitError> {
    let hashtags = generator::hashtags_for(
        state.synonyms.as_ref(),
        &payload.keywords,
        &mut rand::thread_rng(),
    );
    tracing::debug!(count = hashtags.len(), "Hashtags generated");
    Ok(ApiResponse::success(HashtagsResponse { hashtags }))
}
