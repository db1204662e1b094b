use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};

use crate::error::BrandkitError;

/// Reject passwords shorter than `min_chars` characters.
pub fn check_password_length(password: &str, min_chars: usize) -> Result<(), BrandkitError> {
    if password.chars().count() < min_chars {
        return Err(BrandkitError::Validation(format!(
            "Password must be at least {min_chars} characters"
        )));
    }
    Ok(())
}

/// Argon2 PHC string for `password` with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, BrandkitError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| BrandkitError::Internal(format!("Failed to hash password: {e}")))?;
    Ok(hash.to_string())
}

/// `Ok(false)` on a wrong password; an unparsable stored hash is an error.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, BrandkitError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| BrandkitError::Internal(format!("Stored password hash is corrupt: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_counts_characters_not_bytes() {
        assert!(check_password_length("ünïcödé", 7).is_ok());
        assert!(check_password_length("short", 8).is_err());
        assert!(check_password_length("", 0).is_ok());
    }

    #[test]
    fn test_hash_is_phc_argon2() {
        let hash = hash_password("hunter22").unwrap();
        assert!(hash.starts_with("$argon2"));
    }
}
