use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, QueryOrder, Set};
use serde::Deserialize;

use crate::error::BrandkitError;
use crate::extractors::{AuthUser, Form};
use crate::models::business::{self, Entity as Business};
use crate::response::{ApiResponse, Created};

use super::{AppState, auth::MessageResponse, check_text};

pub const NAME_MAX_CHARS: usize = 100;
pub const WEBSITE_MAX_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
pub struct NewBusiness {
    pub name: String,
    pub description: String,
    pub website: String,
}

impl NewBusiness {
    fn validate(&self) -> Result<(), BrandkitError> {
        let mut errors = Vec::new();
        check_text(&mut errors, "name", &self.name, Some(NAME_MAX_CHARS));
        check_text(&mut errors, "description", &self.description, None);
        check_text(&mut errors, "website", &self.website, Some(WEBSITE_MAX_CHARS));

        if errors.is_empty() {
            Ok(())
        } else {
            Err(BrandkitError::validation_fields(errors))
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/businesses", get(list_businesses).post(add_business))
        .route(
            "/businesses/{id}",
            get(get_business).delete(delete_business),
        )
}

async fn add_business(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Form(payload): Form<NewBusiness>,
) -> Result<Created<business::Model>, BrandkitError> {
    payload.validate()?;

    let model = business::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        description: Set(payload.description),
        website: Set(payload.website.trim().to_string()),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    };
    let business = model.insert(&state.db).await?;

    tracing::info!(user_id, business_id = business.id, "Business added");
    Ok(Created(business))
}

async fn list_businesses(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
) -> Result<ApiResponse<Vec<business::Model>>, BrandkitError> {
    let businesses = Business::find()
        .order_by_asc(business::Column::Id)
        .all(&state.db)
        .await?;
    Ok(ApiResponse::success(businesses))
}

async fn get_business(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<i32>,
) -> Result<ApiResponse<business::Model>, BrandkitError> {
    let business = find_business(&state, id).await?;
    Ok(ApiResponse::success(business))
}

async fn delete_business(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i32>,
) -> Result<ApiResponse<MessageResponse>, BrandkitError> {
    let business = find_business(&state, id).await?;
    business.delete(&state.db).await?;

    tracing::info!(user_id, business_id = id, "Business deleted");
    Ok(ApiResponse::success(MessageResponse {
        message: "Business deleted successfully!".to_string(),
    }))
}

async fn find_business(state: &AppState, id: i32) -> Result<business::Model, BrandkitError> {
    Business::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| BrandkitError::NotFound(format!("Business {id} not found")))
}
