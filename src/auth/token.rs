//! Token issuance and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use crate::auth::strategy::AuthError;
use crate::db::schema::UserRecord;

/// How long issued tokens stay valid, in days.
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;

/// Authentication configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret used to sign and verify tokens. Supplied at startup, never
    /// baked into the binary.
    pub jwt_secret: String,
    /// Token lifetime in days.
    pub token_ttl_days: i64,
}

impl AuthConfig {
    /// Create a config with the default token lifetime.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl_days: DEFAULT_TOKEN_TTL_DAYS,
        }
    }

    /// Create a config with an explicit token lifetime in days.
    pub fn with_ttl_days(jwt_secret: impl Into<String>, days: i64) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl_days: days,
        }
    }
}

/// Claims carried by an issued token.
///
/// This is a minimal snapshot taken at login time. Only `uid` is trusted
/// after verification, and solely to re-resolve the account; everything
/// else may be stale by the time the token is presented.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username at issuance time.
    pub sub: String,
    /// Account record key, used to re-resolve the principal.
    pub uid: String,
    /// Email at issuance time.
    pub email: String,
    /// When the token was issued (Unix timestamp).
    pub iat: i64,
    /// When the token expires (Unix timestamp).
    pub exp: i64,
}

/// Signs and verifies bearer tokens with a fixed HS256 secret.
pub struct TokenIssuer {
    config: AuthConfig,
}

impl TokenIssuer {
    /// Create a new token issuer.
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Issue a signed token for an authenticated account.
    ///
    /// The expiry is the issuance instant plus the configured lifetime, so
    /// two tokens for the same account issued at different times differ but
    /// are independently valid.
    pub fn issue(&self, user: &UserRecord) -> Result<String, AuthError> {
        let now = Utc::now();
        let expiry = now + Duration::days(self.config.token_ttl_days);

        let claims = Claims {
            sub: user.username.as_str().to_string(),
            uid: user.id.key().to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenCreation(e.to_string()))
    }

    /// Verify a token's signature and expiry, returning its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => {
                AuthError::InvalidToken("Token expired".to_string())
            }
            _ => AuthError::InvalidToken(format!("Signature verification failed: {}", e)),
        })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PasswordDigest, Username};
    use surrealdb::RecordId;

    fn test_user() -> UserRecord {
        UserRecord {
            id: RecordId::from_table_key("user", "abc123"),
            username: Username::new("alice"),
            password_digest: PasswordDigest::new("$2b$10$fakedigestfortests"),
            email: "alice@example.com".to_string(),
            birth_date: None,
            favourites: vec![],
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let issuer = TokenIssuer::new(AuthConfig::new("test_secret"));

        let token = issuer.issue(&test_user()).unwrap();
        let claims = issuer.verify(&token).unwrap();

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.uid, "abc123");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.exp - claims.iat, DEFAULT_TOKEN_TTL_DAYS * 24 * 60 * 60);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let issuer = TokenIssuer::new(AuthConfig::new("test_secret"));
        let other = TokenIssuer::new(AuthConfig::new("another_secret"));

        let token = issuer.issue(&test_user()).unwrap();

        let err = other.verify(&token).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        // Negative lifetime puts the expiry a full day in the past, well
        // beyond the validation leeway
        let issuer = TokenIssuer::new(AuthConfig::with_ttl_days("test_secret", -1));

        let token = issuer.issue(&test_user()).unwrap();

        let err = issuer.verify(&token).unwrap_err();
        match err {
            AuthError::InvalidToken(msg) => assert_eq!(msg, "Token expired"),
            other => panic!("expected InvalidToken, got {other:?}"),
        }
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let issuer = TokenIssuer::new(AuthConfig::new("test_secret"));

        let err = issuer.verify("not.a.token").unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[test]
    fn test_claims_are_a_minimal_snapshot() {
        let issuer = TokenIssuer::new(AuthConfig::new("test_secret"));

        let token = issuer.issue(&test_user()).unwrap();
        let claims = issuer.verify(&token).unwrap();

        // Exactly the five fields; in particular no password digest and no
        // favourites ever travel inside the token
        let value = serde_json::to_value(&claims).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys.len(), 5);
        for key in ["sub", "uid", "email", "iat", "exp"] {
            assert!(keys.contains(&key), "missing claim {key}");
        }
    }

    #[test]
    fn test_two_issuances_are_independent() {
        let issuer = TokenIssuer::new(AuthConfig::new("test_secret"));
        let user = test_user();

        let first = issuer.issue(&user).unwrap();
        let second = issuer.issue(&user).unwrap();

        assert!(issuer.verify(&first).is_ok());
        assert!(issuer.verify(&second).is_ok());
    }
}
