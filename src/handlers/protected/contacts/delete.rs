// handlers/protected/contacts/delete.rs - DELETE /api/v1/contacts/:id handler

use axum::extract::{Extension, Path, State};

use crate::error::ApiError;
use crate::middleware::{load_owned_contact, validate_contact_id, ApiResponse, ApiResult, MessageBody, RequestContext};
use crate::state::AppState;

/// DELETE /api/v1/contacts/:id - Remove a contact owned by the caller
pub async fn contact_delete(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> ApiResult<MessageBody> {
    validate_contact_id(&id)?;

    let contact = load_owned_contact(state.store.as_ref(), &ctx, &id).await?;
    if !state.store.delete_contact(contact.id).await? {
        // removed by a concurrent request between the load and the delete
        return Err(ApiError::not_found("Contact not found"));
    }

    tracing::info!("Contact {} deleted", contact.id);
    Ok(ApiResponse::message("Contact deleted successfully"))
}
