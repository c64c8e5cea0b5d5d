pub mod auth;
pub mod extract;
pub mod ownership;
pub mod response;
pub mod validate;

pub use auth::{authenticate, require_auth, RequestContext};
pub use extract::{from_body, JsonBody};
pub use ownership::load_owned_contact;
pub use response::{ApiResponse, ApiResult, DataBody, MessageBody, TokenBody};
pub use validate::{validate, validate_contact_id, Predicate, Rule};
