//! Contact management API: user signup/login with bearer tokens and
//! per-user contact records guarded by ownership checks.

pub mod app;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;

pub use app::app;
pub use config::AppConfig;
pub use error::ApiError;
pub use state::AppState;
