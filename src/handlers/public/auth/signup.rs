// handlers/public/auth/signup.rs - POST /api/v1/users/signup handler

use axum::extract::State;
use serde::Deserialize;

use crate::database::{NewUser, StoreError};
use crate::error::ApiError;
use crate::middleware::validate::SIGNUP_RULES;
use crate::middleware::{from_body, validate, ApiResponse, ApiResult, JsonBody, TokenBody};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// POST /api/v1/users/signup - Register a new user and receive a bearer token
///
/// Expected Input:
/// ```json
/// { "name": "Test User", "email": "test@example.com", "password": "password123" }
/// ```
///
/// Responds `201 { "success": true, "token": "..." }`. An email that is
/// already registered is rejected with `400 "User already exists"`.
pub async fn signup(State(state): State<AppState>, JsonBody(body): JsonBody) -> ApiResult<TokenBody> {
    validate(SIGNUP_RULES, &body)?;
    let request: SignupRequest = from_body(body)?;

    if state.store.find_user_by_email(&request.email).await?.is_some() {
        return Err(ApiError::conflict("User already exists"));
    }

    let password = state.credentials.hash_password(&request.password).await?;

    let user = state
        .store
        .create_user(NewUser {
            name: request.name,
            email: request.email,
            password,
        })
        .await
        .map_err(|e| match e {
            // lost a race with a concurrent signup for the same email
            StoreError::Duplicate(_) => ApiError::conflict("User already exists"),
            other => other.into(),
        })?;

    let token = state.credentials.issue_token(user.id)?;

    tracing::info!("User signed up: {}", user.id);
    Ok(ApiResponse::created(TokenBody { token }))
}
