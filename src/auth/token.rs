use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    /// JWT encoding failed
    #[error("Failed to encode token: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),

    /// Token expired
    #[error("Session token expired")]
    Expired,

    /// Invalid token
    #[error("Invalid session token")]
    Invalid,
}

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The account email
    pub sub: String,

    /// Expiration timestamp (Unix epoch)
    pub exp: u64,

    /// Issued-at timestamp (Unix epoch)
    pub iat: u64,
}

/// Issues and validates signed, time-limited bearer tokens. There is no
/// server-side revocation list; a token is valid until it expires.
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_secs: u64,
}

impl TokenManager {
    pub fn new(secret: &str, expiry_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_secs,
        }
    }

    /// Issue a token for the given account email.
    pub fn issue(&self, email: &str) -> Result<String, TokenError> {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();

        let claims = Claims {
            sub: email.to_string(),
            exp: now + self.expiry_secs,
            iat: now,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a token and extract its claims.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let validation = Validation::default();
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })?;

        Ok(token_data.claims)
    }
}
