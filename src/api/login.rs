// Login endpoint issuing bearer tokens

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};

use crate::api::{AppState, error::ApiError, users::UserResponse};

/// Credentials accepted by `POST /login`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoginBody {
    pub username: String,
    pub password: String,
}

/// Successful login payload: the account and a fresh bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub token: String,
}

/// Authenticate with username and password and receive a signed token.
///
/// Unknown usernames and wrong passwords get the same 400 response, so
/// the endpoint cannot be used to probe which accounts exist.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<LoginResponse>, ApiError> {
    let outcome = state.auth.login(&body.username, &body.password).await?;

    Ok(Json(LoginResponse {
        user: outcome.user.into(),
        token: outcome.token,
    }))
}
