use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// `PUT /api/accounts/me/password`
///
/// Replaces the caller's credential after verifying the old password.
pub async fn change_password(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedAccount>,
    Json(body): Json<ChangePasswordRequestBody>,
) -> Result<StatusCode, ApiError> {
    state
        .account_service
        .change_password(auth.account_id, &body.old_password, &body.new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequestBody {
    pub old_password: String,
    pub new_password: String,
}
