use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::auth::password::{check_password_length, hash_password, verify_password};
use crate::error::BrandkitError;
use crate::models::user::{self, Entity as User};

/// Create a login account.
///
/// Usernames are unique; the password must be at least
/// `min_password_length` characters and is stored as an Argon2 hash.
pub async fn create_user(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
    min_password_length: usize,
) -> Result<user::Model, BrandkitError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(BrandkitError::Validation("Username is required".to_string()));
    }

    check_password_length(password, min_password_length)?;

    let existing = User::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(BrandkitError::Conflict(format!(
            "User {username:?} already exists"
        )));
    }

    let model = user::ActiveModel {
        username: Set(username.to_string()),
        password_hash: Set(hash_password(password)?),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    let user = model.insert(db).await?;
    tracing::info!(user_id = user.id, username = %user.username, "User created");
    Ok(user)
}

/// Check a username/password pair. Unknown users and wrong passwords are
/// reported identically.
pub async fn authenticate(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<user::Model, BrandkitError> {
    let invalid = || BrandkitError::Unauthorized("Invalid username or password".to_string());

    let user = User::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(password, &user.password_hash)? {
        return Err(invalid());
    }

    Ok(user)
}
