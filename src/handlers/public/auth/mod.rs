// handlers/public/auth/mod.rs - Public authentication handlers
//
// Token acquisition endpoints that do not require authentication.

pub mod login;  // POST /api/v1/users/login
pub mod signup; // POST /api/v1/users/signup

pub use login::login;
pub use signup::signup;
