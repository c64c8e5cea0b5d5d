// handlers/protected/auth/access.rs - GET /api/v1/users/protected-route handler

use axum::extract::Extension;

use crate::middleware::{ApiResponse, ApiResult, MessageBody, RequestContext};

/// GET /api/v1/users/protected-route - Probe that succeeds for any valid token
pub async fn access_check(Extension(ctx): Extension<RequestContext>) -> ApiResult<MessageBody> {
    let user = ctx.authenticated()?;
    tracing::debug!("Access granted to user {}", user.id);
    Ok(ApiResponse::message("Access granted"))
}
