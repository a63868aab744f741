use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// `GET /api/accounts/me`
///
/// Returns the account the gate authenticated, without the digest.
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedAccount>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let account = state.account_service.get_account(auth.account_id).await?;

    Ok(ApiSuccess::new(StatusCode::OK, (&account).into()))
}
