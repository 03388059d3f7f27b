//! JWT token generation and validation
//! Issues self-contained HS256 access tokens; nothing is stored server-side

use crate::{
    config::AppConfig,
    error::{AppError, TokenError},
    models::SubjectId,
};
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Builds and checks signed, expiring tokens carrying a subject id.
pub trait TokenIssuer: Send + Sync {
    /// Sign a fresh token for `subject_id`, valid from now for the configured window.
    fn issue(&self, subject_id: SubjectId) -> Result<String, AppError>;

    /// Check signature and expiry, returning the subject the token was issued to.
    fn verify(&self, token: &str) -> Result<SubjectId, AppError>;

    /// How long an issued token stays valid.
    fn validity(&self) -> Duration;
}

/// JWT claims for access tokens
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (subject ID)
    pub sub: String,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,
}

/// JWT service
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    validity: Duration,
}

impl JwtService {
    /// Create JWT service from an injected secret and validity window
    pub fn new(secret: &Secret<String>, validity: Duration) -> Result<Self, AppError> {
        let secret = secret.expose_secret();

        if secret.is_empty() {
            return Err(AppError::Signing("JWT signing secret is empty".to_string()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            validity,
        })
    }

    /// Create JWT service from config
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Self::new(&config.security.jwt_secret, config.security.token_validity())
    }

    /// Validate and decode token claims
    pub fn decode_claims(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {:?}", e);
                let reason = match e.kind() {
                    ErrorKind::InvalidSignature => TokenError::BadSignature,
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Malformed,
                };
                AppError::InvalidToken(reason)
            })
    }
}

impl TokenIssuer for JwtService {
    fn issue(&self, subject_id: SubjectId) -> Result<String, AppError> {
        let iat = Utc::now().timestamp();
        let exp = iat.saturating_add(self.validity.as_secs() as i64);

        let claims = Claims {
            sub: subject_id.to_string(),
            iat,
            exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode access token: {:?}", e);
            AppError::Signing(format!("Failed to encode access token: {}", e))
        })
    }

    fn verify(&self, token: &str) -> Result<SubjectId, AppError> {
        let claims = self.decode_claims(token)?;

        Uuid::parse_str(&claims.sub).map_err(|_| {
            tracing::debug!("Token subject is not a UUID");
            AppError::InvalidToken(TokenError::Malformed)
        })
    }

    fn validity(&self) -> Duration {
        self.validity
    }
}
