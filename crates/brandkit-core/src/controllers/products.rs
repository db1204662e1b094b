use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, QueryOrder, Set};
use serde::Deserialize;

use crate::error::{BrandkitError, FieldError};
use crate::extractors::{AuthUser, Form};
use crate::models::product::{self, Entity as Product};
use crate::response::{ApiResponse, Created};

use super::{AppState, auth::MessageResponse, check_text};

pub const NAME_MAX_CHARS: usize = 100;

/// Product form; `price` arrives as text and is checked here so a bad value
/// comes back as a field error.
#[derive(Debug, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: String,
}

impl NewProduct {
    fn validate(&self) -> Result<f64, BrandkitError> {
        let mut errors = Vec::new();
        check_text(&mut errors, "name", &self.name, Some(NAME_MAX_CHARS));
        check_text(&mut errors, "description", &self.description, None);

        let price = parse_price(&self.price);
        if price.is_none() {
            errors.push(FieldError::with_code(
                "price",
                "must be a non-negative number",
                "invalid_number",
            ));
        }

        match price {
            Some(price) if errors.is_empty() => Ok(price),
            _ => Err(BrandkitError::validation_fields(errors)),
        }
    }
}

/// Parse a price, accepting only finite, non-negative numbers.
pub fn parse_price(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price >= 0.0)
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(add_product))
        .route("/products/{id}", get(get_product).delete(delete_product))
}

async fn add_product(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Form(payload): Form<NewProduct>,
) -> Result<Created<product::Model>, BrandkitError> {
    let price = payload.validate()?;

    let model = product::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        description: Set(payload.description),
        price: Set(price),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    };
    let product = model.insert(&state.db).await?;

    tracing::info!(user_id, product_id = product.id, "Product added");
    Ok(Created(product))
}

async fn list_products(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
) -> Result<ApiResponse<Vec<product::Model>>, BrandkitError> {
    let products = Product::find()
        .order_by_asc(product::Column::Id)
        .all(&state.db)
        .await?;
    Ok(ApiResponse::success(products))
}

async fn get_product(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<i32>,
) -> Result<ApiResponse<product::Model>, BrandkitError> {
    let product = find_product(&state, id).await?;
    Ok(ApiResponse::success(product))
}

async fn delete_product(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i32>,
) -> Result<ApiResponse<MessageResponse>, BrandkitError> {
    let product = find_product(&state, id).await?;
    product.delete(&state.db).await?;

    tracing::info!(user_id, product_id = id, "Product deleted");
    Ok(ApiResponse::success(MessageResponse {
        message: "Product deleted successfully!".to_string(),
    }))
}

async fn find_product(state: &AppState, id: i32) -> Result<product::Model, BrandkitError> {
    Product::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| BrandkitError::NotFound(format!("Product {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("9.99"), Some(9.99));
        assert_eq!(parse_price(" 0 "), Some(0.0));
        assert_eq!(parse_price("-1"), None);
        assert_eq!(parse_price("NaN"), None);
        assert_eq!(parse_price("inf"), None);
        assert_eq!(parse_price("ten"), None);
        assert_eq!(parse_price(""), None);
    }
}
