use crate::database::{Contact, Store};
use crate::error::ApiError;

use super::auth::RequestContext;

/// Ownership stage for contact mutations.
///
/// Existence is checked before ownership: a missing contact is always a 404,
/// even for callers who could not have owned it.
pub async fn load_owned_contact(store: &dyn Store, ctx: &RequestContext, id: &str) -> Result<Contact, ApiError> {
    let user = ctx.authenticated()?;

    let contact = store
        .find_contact(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contact not found"))?;

    if contact.owner != user.id {
        tracing::warn!("User {} attempted to access contact {} owned by {}", user.id, contact.id, contact.owner);
        return Err(ApiError::unauthorized("Not authorized to access this contact"));
    }

    Ok(contact)
}
