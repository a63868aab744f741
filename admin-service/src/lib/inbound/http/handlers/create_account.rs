use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::AccountError;
use crate::account::models::CreateAccountCommand;
use crate::account::models::EmailAddress;
use crate::account::models::Username;
use crate::inbound::http::router::AppState;

/// `POST /api/accounts`
///
/// Registers a new account. The password is hashed before storage and
/// the created account starts in `active` status.
pub async fn create_account(
    State(state): State<AppState>,
    Json(body): Json<CreateAccountRequestBody>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let username = Username::new(body.username).map_err(AccountError::from)?;
    let email = EmailAddress::new(body.email).map_err(AccountError::from)?;

    let account = state
        .account_service
        .create_account(CreateAccountCommand::new(username, email, body.password))
        .await?;

    Ok(ApiSuccess::new(StatusCode::CREATED, (&account).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateAccountRequestBody {
    pub username: String,
    pub email: String,
    pub password: String,
}
