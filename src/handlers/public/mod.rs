// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Every input is untrusted here; each handler runs its validation table
// before touching the store.

pub mod auth;

pub use auth::*;
