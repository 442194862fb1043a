//! JWT session tokens

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Employee id of the signed-in user.
    pub sub: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn employee_id(&self) -> Result<i64, JwtError> {
        self.sub
            .parse()
            .map_err(|_| JwtError::ValidationError(format!("invalid subject: {}", self.sub)))
    }
}

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_ttl: i64,
}

impl JwtService {
    pub fn new(secret: &str, session_ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_ttl: session_ttl_secs,
        }
    }

    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl
    }

    pub fn generate_session_token(&self, employee_id: i64, username: &str) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: employee_id.to_string(),
            username: username.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.session_ttl)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::CreationError(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::ValidationError(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_round_trip_claims() {
        let service = JwtService::new(SECRET, 3600);
        let token = service.generate_session_token(42, "jdoe").unwrap();
        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.employee_id().unwrap(), 42);
        assert_eq!(claims.username, "jdoe");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = JwtService::new(SECRET, 3600);
        let other = JwtService::new("fedcba9876543210fedcba9876543210", 3600);
        let token = issuer.generate_session_token(1, "jdoe").unwrap();
        assert!(matches!(other.validate_token(&token), Err(JwtError::ValidationError(_))));
    }

    #[test]
    fn test_expired_token() {
        // Default validation allows 60s of leeway.
        let service = JwtService::new(SECRET, -120);
        let token = service.generate_session_token(1, "jdoe").unwrap();
        assert!(matches!(service.validate_token(&token), Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_garbage_token() {
        let service = JwtService::new(SECRET, 3600);
        assert!(service.validate_token("not.a.token").is_err());
    }
}
