//! Password hashing and bearer-token primitives.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, Result};

/// Bearer token claims. The subject is the user's email, re-resolved
/// against the identity store on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated user's email.
    pub sub: String,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

/// Token verification failures. Both map to a 401, never a 500.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,
}

impl From<TokenError> for GatewayError {
    fn from(err: TokenError) -> Self {
        GatewayError::Unauthorized(err.to_string())
    }
}

/// Hash a plaintext password.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)?;
    let argon2 = Argon2::default();

    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Issue a signed access token for the given email.
pub fn issue_token(
    email: &str,
    encoding_key: &EncodingKey,
    ttl_minutes: i64,
) -> Result<String> {
    let exp = (chrono::Utc::now() + chrono::Duration::minutes(ttl_minutes)).timestamp();
    let claims = Claims {
        sub: email.to_string(),
        exp,
    };

    encode(&Header::default(), &claims, encoding_key)
        .map_err(|e| GatewayError::Internal(format!("Failed to sign token: {}", e)))
}

/// Verify a token and return its claims.
pub fn verify_token(token: &str, decoding_key: &DecodingKey) -> std::result::Result<Claims, TokenError> {
    match decode::<Claims>(token, decoding_key, &Validation::default()) {
        Ok(data) => Ok(data.claims),
        Err(err) => match err.kind() {
            ErrorKind::ExpiredSignature => Err(TokenError::Expired),
            _ => Err(TokenError::Invalid),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> (EncodingKey, DecodingKey) {
        (
            EncodingKey::from_secret(b"test-secret"),
            DecodingKey::from_secret(b"test-secret"),
        )
    }

    #[test]
    fn test_password_roundtrip() {
        let hash = hash_password("p1").unwrap();
        assert_ne!(hash, "p1");
        assert!(verify_password("p1", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("p1").unwrap();
        let b = hash_password("p1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_token_roundtrip() {
        let (enc, dec) = keys();
        let token = issue_token("a@x.com", &enc, 15).unwrap();
        let claims = verify_token(&token, &dec).unwrap();
        assert_eq!(claims.sub, "a@x.com");
    }

    #[test]
    fn test_expired_token() {
        let (enc, dec) = keys();
        // Expiry well past the default validation leeway
        let token = issue_token("a@x.com", &enc, -60).unwrap();
        assert_eq!(verify_token(&token, &dec), Err(TokenError::Expired));
    }

    #[test]
    fn test_tampered_token() {
        let (enc, dec) = keys();
        let token = issue_token("a@x.com", &enc, 15).unwrap();

        // Flip a byte in the signature
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });
        assert_eq!(verify_token(&tampered, &dec), Err(TokenError::Invalid));

        // Wrong key
        let other = DecodingKey::from_secret(b"other-secret");
        assert_eq!(verify_token(&token, &other), Err(TokenError::Invalid));
    }

    #[test]
    fn test_garbage_token() {
        let (_, dec) = keys();
        assert_eq!(verify_token("not-a-jwt", &dec), Err(TokenError::Invalid));
    }
}
