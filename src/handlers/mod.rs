// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (bearer token)
pub mod protected;
pub mod public;
