use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::database::{StoreError, UserProfile};
use crate::error::ApiError;
use crate::state::AppState;

/// Per-request state carried between pipeline stages.
///
/// Stages never mutate a context in place; the authentication stage returns a
/// new one with the user attached.
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    user: Option<UserProfile>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_user(&self, user: UserProfile) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// The authenticated user, or a 401 if no stage attached one.
    pub fn authenticated(&self) -> Result<&UserProfile, ApiError> {
        self.user
            .as_ref()
            .ok_or_else(|| ApiError::unauthorized("Not authorized, token missing"))
    }

    pub fn user_id(&self) -> Result<Uuid, ApiError> {
        self.authenticated().map(|user| user.id)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.split_whitespace().next()?;
    Some(token)
}

/// Authentication stage: verify the bearer token and resolve it to a user.
pub async fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
    ctx: &RequestContext,
) -> Result<RequestContext, ApiError> {
    let token = bearer_token(headers).ok_or_else(|| ApiError::unauthorized("Not authorized, token missing"))?;

    let claims = state.credentials.verify_token(token)?;

    let user = match state.store.find_user(&claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::warn!("Token subject {} has no matching user", claims.sub);
            return Err(ApiError::not_found("Not authorized, user not found"));
        }
        // a correctly signed subject that is not an identity is treated as a bad token
        Err(StoreError::MalformedId(_)) => return Err(ApiError::unauthorized("Not authorized, token invalid")),
        Err(other) => return Err(other.into()),
    };

    tracing::debug!("Authenticated user {}", user.id);
    Ok(ctx.with_user(user))
}

/// Router-level guard running [`authenticate`] and storing the resulting
/// context in the request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx = request
        .extensions()
        .get::<RequestContext>()
        .cloned()
        .unwrap_or_default();

    let ctx = authenticate(&state, request.headers(), &ctx).await?;
    request.extensions_mut().insert(ctx);

    Ok(next.run(request).await)
}
