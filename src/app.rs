use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{protected, public};
use crate::middleware::require_auth;
use crate::state::AppState;

/// Prefix every API route is mounted under.
pub const API_PREFIX: &str = "/api/v1";

pub fn app(state: AppState) -> Router {
    let enable_cors = state.config.security.enable_cors;

    let router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .nest(API_PREFIX, api_routes(state.clone()))
        .with_state(state);

    let router = router.layer(TraceLayer::new_for_http());
    if enable_cors {
        router.layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
    } else {
        router
    }
}

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/users", user_routes(state.clone()))
        .nest("/contacts", contact_routes(state))
}

fn user_routes(state: AppState) -> Router<AppState> {
    let guarded = Router::new()
        .route("/protected-route", get(protected::access_check))
        .route_layer(from_fn_with_state(state, require_auth));

    Router::new()
        .route("/signup", post(public::auth::signup))
        .route("/login", post(public::auth::login))
        .merge(guarded)
}

fn contact_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(protected::contact_create).get(protected::contact_list))
        .route(
            "/:id",
            get(protected::contact_show)
                .put(protected::contact_update)
                .delete(protected::contact_delete),
        )
        // Protect all contact routes
        .route_layer(from_fn_with_state(state, require_auth))
}

async fn root() -> &'static str {
    "API is running..."
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "version": env!("CARGO_PKG_VERSION"),
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                })),
            )
        }
    }
}
