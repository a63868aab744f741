use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// `POST /api/auth/refresh`
///
/// Issues a fresh 24-hour token for the already-authenticated subject.
/// The presented token was verified by the gate; no password check is
/// repeated here.
pub async fn refresh_token(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedAccount>,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    let issued = state
        .token_service
        .issue(auth.account_id.0)
        .map_err(|e| ApiError::InternalServerError(format!("Token generation failed: {}", e)))?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        RefreshResponseData {
            expires_at: issued.expires_at(),
            token: issued.token,
            token_type: "Bearer".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: String,
    #[serde(rename = "expiresAt")]
    pub expires_at: i64,
}
