//! # Authentication Module
//!
//! Password hashing with Argon2 and bearer-token sessions. A session token is
//! 32 random bytes, hex encoded, stored in the `sessions` table with an
//! expiry. Handlers ask for [`AuthUser`] or [`AdminUser`] to require a login.

use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use carport_core::{errors::CarportError, models::user::User};
use chrono::Utc;
use eyre::{Result, eyre};
use rand::RngCore;

use crate::{ApiState, middleware::error_handling::AppError};

const TOKEN_BYTES: usize = 32;

/// Hashes a password using the Argon2 algorithm
///
/// Returns the PHC string (algorithm, parameters, salt and hash) to store in
/// the database. A fresh random salt is generated for every call.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Checks `password` against a stored PHC hash
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash =
        PasswordHash::new(password_hash).map_err(|e| eyre!("Invalid password hash: {}", e))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// New opaque session token
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|byte| format!("{:02x}", byte)).collect()
}

/// The token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// A request made with a valid session
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
    pub token: String,
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| CarportError::Authentication("Missing bearer token".to_string()))?
            .to_string();

        let session =
            carport_db::repositories::session::get_active_session(&state.db_pool, &token, Utc::now())
                .await?
                .ok_or_else(|| {
                    CarportError::Authentication("Session is invalid or has expired".to_string())
                })?;

        let user = carport_db::repositories::user::get_user_by_id(&state.db_pool, session.user_id)
            .await?
            .ok_or_else(|| CarportError::Authentication("Account no longer exists".to_string()))?;

        Ok(AuthUser {
            user: User::try_from(user)?,
            token,
        })
    }
}

/// A request made by an administrator
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser { user, .. } = AuthUser::from_request_parts(parts, state).await?;

        if !user.is_admin() {
            return Err(AppError(CarportError::Authorization(
                "Admin access required".to_string(),
            )));
        }

        Ok(AdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc123")), Some("abc123"));
        assert_eq!(bearer_token(&headers("bearer abc123")), Some("abc123"));
        assert_eq!(bearer_token(&headers("Basic abc123")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_session_tokens_are_random_hex() {
        let first = generate_session_token();
        let second = generate_session_token();

        assert_eq!(first.len(), TOKEN_BYTES * 2);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }
}
