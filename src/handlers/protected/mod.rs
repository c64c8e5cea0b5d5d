// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Routes in this tier are mounted behind `middleware::require_auth`.

pub mod auth;     // Token probe
pub mod contacts; // Contact CRUD

pub use auth::*;
pub use contacts::*;
