//! Password hashing and bearer-token verification.
//!
//! Tokens are signed HS256 with the configured secret and carry the user id
//! and email; nothing here touches the database, so the middleware stays a
//! pure function of the request.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use chrono::Utc;
use engine::users;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{ServerError, server::ServerState};

pub const TOKEN_TTL_DAYS: i64 = 7;

const AUTH_FAILED: &str = "authentication failed";

/// Identity attached to the request after token verification.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: i32,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: i32,
    email: String,
    iat: i64,
    exp: i64,
}

pub fn hash_password(password: &str) -> Result<String, ServerError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ServerError::Internal(format!("password hashing failed: {err}")))
}

/// Constant-shape check: any parse or verification failure reads as a
/// mismatch, never as a distinct error.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

pub fn sign_token(secret: &str, user: &users::Model) -> Result<String, ServerError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        iat: now,
        exp: now + TOKEN_TTL_DAYS * 24 * 60 * 60,
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|err| ServerError::Internal(format!("token signing failed: {err}")))
}

fn verify_token(secret: &str, token: &str) -> Result<AuthUser, ServerError> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ServerError::Auth(AUTH_FAILED.to_string()))?;

    Ok(AuthUser {
        id: data.claims.sub,
        email: data.claims.email,
    })
}

/// Route-layer middleware guarding everything behind a bearer token.
pub async fn require_auth(
    State(state): State<ServerState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let TypedHeader(bearer) = bearer.ok_or_else(|| ServerError::Auth(AUTH_FAILED.to_string()))?;
    let user = verify_token(&state.jwt_secret, bearer.token())?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> users::Model {
        users::Model {
            id: 7,
            name: "Mario".to_string(),
            email: "mario@example.com".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn token_round_trips_claims() {
        let token = sign_token("secret", &sample_user()).ok().unwrap();
        let user = verify_token("secret", &token).ok().unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.email, "mario@example.com");
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = sign_token("secret", &sample_user()).ok().unwrap();
        assert!(verify_token("other", &token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(verify_token("secret", "not-a-token").is_err());
    }

    #[test]
    fn password_round_trip() {
        let hash = hash_password("hunter2").ok().unwrap();
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn malformed_stored_hash_reads_as_mismatch() {
        assert!(!verify_password("hunter2", "not-a-phc-string"));
    }
}
