use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Payload embedded in every access token.
///
/// Carries the authenticated subject (account id) and the token's time
/// bounds as Unix timestamps. Created by
/// [`TokenService::issue`](crate::TokenService::issue), consumed once per
/// request by [`TokenService::verify`](crate::TokenService::verify),
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated account identifier
    pub sub: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Not before (Unix timestamp); always equals `iat` in this design
    pub nbf: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Build claims for a subject, valid from `issued_at` for `lifetime`.
    pub fn new(sub: i64, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        let issued_at = issued_at.timestamp();
        Self {
            sub,
            iat: issued_at,
            nbf: issued_at,
            exp: issued_at + lifetime.num_seconds(),
        }
    }

    /// Expiration as a UTC timestamp, if representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
