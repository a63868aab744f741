use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;
use crate::secret::SigningSecret;

/// Token lifetime, fixed at 24 hours from issuance.
const TOKEN_LIFETIME_HOURS: i64 = 24;

/// A freshly issued access token together with its claims.
pub struct IssuedToken {
    /// Signed token string
    pub token: String,
    /// Claims encoded in the token
    pub claims: Claims,
}

impl IssuedToken {
    /// Expiration as Unix timestamp (seconds since epoch).
    pub fn expires_at(&self) -> i64 {
        self.claims.exp
    }
}

/// Issues and verifies signed, time-bounded access tokens.
///
/// Uses HS256 (HMAC with SHA-256); the signature check inside
/// `jsonwebtoken` is constant-time. Verification is a pure function of
/// (token, secret, current time) with no side effects.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    lifetime: Duration,
}

impl TokenService {
    /// Create a token service from the process signing secret.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Rotating the secret invalidates every outstanding token
    pub fn new(secret: &SigningSecret) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
            lifetime: Duration::hours(TOKEN_LIFETIME_HOURS),
        }
    }

    /// Fixed token lifetime.
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Issue a token for a subject, valid from now for the fixed lifetime.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue(&self, subject: i64) -> Result<IssuedToken, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token with an explicit issuance instant.
    ///
    /// `iat` and `nbf` are set to `issued_at`, `exp` to
    /// `issued_at + lifetime`.
    pub fn issue_at(
        &self,
        subject: i64,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let claims = Claims::new(subject, issued_at, self.lifetime);
        let header = Header::new(self.algorithm);

        let token = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))?;

        Ok(IssuedToken { token, claims })
    }

    /// Verify a token and return its claims.
    ///
    /// Checks the signature in constant time, then the time bounds with
    /// zero clock leeway so expiry is deterministic.
    ///
    /// # Errors
    /// * `Malformed` - Structurally invalid input (wrong encoding, missing segments)
    /// * `InvalidSignature` - Tag mismatch (tampering, or a different secret)
    /// * `Expired` - Current time is past `exp`
    /// * `NotYetValid` - Current time is before `nbf` (clock skew between hosts)
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_required_spec_claims(&["exp", "nbf"]);
        validation.validate_nbf = true;
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::ImmatureSignature => TokenError::NotYetValid,
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}
