use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{ActingUser, Role};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// Claims valid from now for `expiry_hours`; out-of-range lifetimes are rejected
    pub fn new(user_id: Uuid, role: Role, expiry_hours: u64) -> Result<Self, JwtError> {
        let out_of_range = || JwtError::TokenGeneration(format!("expiry of {} hours is out of range", expiry_hours));
        let now = Utc::now();
        let exp = i64::try_from(expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(out_of_range)?
            .timestamp();

        Ok(Self {
            sub: user_id,
            role,
            exp,
            iat: now.timestamp(),
        })
    }
}

impl From<Claims> for ActingUser {
    fn from(claims: Claims) -> Self {
        ActingUser::new(claims.sub, claims.role)
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),
    #[error("JWT secret not configured")]
    InvalidSecret,
}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Verify signature and expiry, returning the embedded claims
pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    decode::<Claims>(token, &decoding_key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| JwtError::InvalidToken(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn issued_token_decodes_to_same_identity() {
        let id = Uuid::new_v4();
        let token = generate_jwt(&Claims::new(id, Role::Instructor, 1).unwrap(), SECRET).unwrap();
        let user: ActingUser = decode_jwt(&token, SECRET).unwrap().into();
        assert_eq!(user, ActingUser::new(id, Role::Instructor));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_jwt(&Claims::new(Uuid::new_v4(), Role::Admin, 1).unwrap(), SECRET).unwrap();
        assert!(matches!(decode_jwt(&token, "other"), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut claims = Claims::new(Uuid::new_v4(), Role::Student, 1).unwrap();
        claims.exp = Utc::now().timestamp() - 3600;
        claims.iat = claims.exp - 3600;
        let token = generate_jwt(&claims, SECRET).unwrap();
        assert!(matches!(decode_jwt(&token, SECRET), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn out_of_range_expiry_is_an_error() {
        for hours in [u64::MAX, i64::MAX as u64, 1 << 40] {
            let result = Claims::new(Uuid::new_v4(), Role::Admin, hours);
            assert!(matches!(result, Err(JwtError::TokenGeneration(_))), "hours={}", hours);
        }
    }

    #[test]
    fn empty_secret_is_refused() {
        let claims = Claims::new(Uuid::new_v4(), Role::Student, 1).unwrap();
        assert!(matches!(generate_jwt(&claims, ""), Err(JwtError::InvalidSecret)));
        assert!(matches!(decode_jwt("abc", ""), Err(JwtError::InvalidSecret)));
    }
}
