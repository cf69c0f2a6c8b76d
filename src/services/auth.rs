//! Account service — username/password registration and login checks.
//!
//! Passwords are stored as Argon2id PHC strings. Hashing runs on the
//! blocking pool so a login burst does not stall the async workers.

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core};
use serde::Serialize;
use sqlx::{Row, SqlitePool};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("username and password are required")]
    InvalidInput,
    #[error("Username already exists")]
    UsernameTaken,
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Hash `password` with a fresh random salt.
///
/// # Errors
///
/// Returns [`AuthError::Hash`] if Argon2 rejects the input.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut rand_core::OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

/// Check `password` against a stored PHC hash. Malformed hashes never match.
#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

async fn hash_blocking(password: &str) -> Result<String, AuthError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AuthError::Hash(e.to_string()))?
}

async fn verify_blocking(password: &str, stored: String) -> bool {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || verify_password(&password, &stored))
        .await
        .unwrap_or(false)
}

/// Create an account. The username is trimmed; the password is taken as-is.
///
/// # Errors
///
/// Returns [`AuthError::InvalidInput`] for a blank username or empty
/// password and [`AuthError::UsernameTaken`] on a duplicate username.
pub async fn register(pool: &SqlitePool, username: &str, password: &str) -> Result<User, AuthError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AuthError::InvalidInput);
    }

    let hash = hash_blocking(password).await?;
    let result = sqlx::query("INSERT INTO users (username, password) VALUES (?1, ?2)")
        .bind(username)
        .bind(&hash)
        .execute(pool)
        .await;

    match result {
        Ok(done) => Ok(User { id: done.last_insert_rowid(), username: username.to_string() }),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(AuthError::UsernameTaken),
        Err(e) => Err(e.into()),
    }
}

/// Check credentials, returning the user on success.
///
/// # Errors
///
/// Returns an error only if the database query fails.
pub async fn verify(pool: &SqlitePool, username: &str, password: &str) -> Result<Option<User>, AuthError> {
    let row = sqlx::query("SELECT id, username, password FROM users WHERE username = ?1")
        .bind(username.trim())
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    let stored: String = row.get("password");
    if !verify_blocking(password, stored).await {
        return Ok(None);
    }
    Ok(Some(User { id: row.get("id"), username: row.get("username") }))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
