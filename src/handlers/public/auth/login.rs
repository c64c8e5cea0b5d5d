// handlers/public/auth/login.rs - POST /api/v1/users/login handler

use axum::extract::State;
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::validate::LOGIN_RULES;
use crate::middleware::{from_body, validate, ApiResponse, ApiResult, JsonBody, TokenBody};
use crate::state::AppState;

/// Same message for unknown email and wrong password.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/v1/users/login - Authenticate and receive a bearer token
///
/// Responds `200 { "success": true, "token": "..." }` or
/// `401 "Invalid credentials"` without saying which credential was wrong.
pub async fn login(State(state): State<AppState>, JsonBody(body): JsonBody) -> ApiResult<TokenBody> {
    validate(LOGIN_RULES, &body)?;
    let request: LoginRequest = from_body(body)?;

    let Some(user) = state.store.find_user_by_email(&request.email).await? else {
        tracing::debug!("Login rejected: unknown email");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    };

    if !state.credentials.verify_password(&request.password, &user.password).await? {
        tracing::debug!("Login rejected: password mismatch for user {}", user.id);
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = state.credentials.issue_token(user.id)?;

    tracing::info!("User logged in: {}", user.id);
    Ok(ApiResponse::success(TokenBody { token }))
}
