use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::auth::token::{generate_secure_token, hash_token};
use crate::error::BrandkitError;
use crate::models::session;

/// Open a session for `user_id` and return the cookie token.
///
/// Only the token's hash is stored. A lifetime too long to represent as a
/// timestamp is an error.
pub async fn create_session(
    db: &DatabaseConnection,
    user_id: i32,
    expiry_hours: u64,
) -> Result<String, BrandkitError> {
    let token = generate_secure_token();
    let now = Utc::now().naive_utc();
    let expires_at = i64::try_from(expiry_hours)
        .ok()
        .and_then(Duration::try_hours)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| {
            BrandkitError::Internal(format!(
                "Session lifetime of {expiry_hours} hours is out of range"
            ))
        })?;

    let model = session::ActiveModel {
        user_id: Set(user_id),
        token_hash: Set(hash_token(&token)),
        expires_at: Set(expires_at),
        revoked: Set(false),
        created_at: Set(now),
        ..Default::default()
    };

    model.insert(db).await?;
    tracing::debug!(user_id, "Session created");
    Ok(token)
}

/// Resolve a session token to its user id if it is neither revoked nor expired.
pub async fn validate_session(db: &DatabaseConnection, token: &str) -> Result<i32, BrandkitError> {
    let now = Utc::now().naive_utc();

    let session_model = session::Entity::find()
        .filter(session::Column::TokenHash.eq(hash_token(token)))
        .one(db)
        .await?
        .ok_or_else(|| BrandkitError::Unauthorized("Session not found".to_string()))?;

    if session_model.revoked {
        return Err(BrandkitError::Unauthorized(
            "Session has been revoked".to_string(),
        ));
    }

    if session_model.expires_at < now {
        return Err(BrandkitError::Unauthorized("Session has expired".to_string()));
    }

    Ok(session_model.user_id)
}

/// Revoke a session (logout). Unknown tokens are ignored.
pub async fn revoke_session(db: &DatabaseConnection, token: &str) -> Result<(), BrandkitError> {
    let session_model = session::Entity::find()
        .filter(session::Column::TokenHash.eq(hash_token(token)))
        .one(db)
        .await?;

    if let Some(session_model) = session_model {
        let user_id = session_model.user_id;
        let mut active: session::ActiveModel = session_model.into();
        active.revoked = Set(true);
        active.update(db).await?;
        tracing::debug!(user_id, "Session revoked");
    }

    Ok(())
}
