// handlers/protected/contacts/show.rs - GET /api/v1/contacts/:id handler

use axum::extract::{Path, State};

use crate::database::Contact;
use crate::error::ApiError;
use crate::middleware::{validate_contact_id, ApiResponse, ApiResult, DataBody};
use crate::state::AppState;

/// GET /api/v1/contacts/:id - Fetch one contact
///
/// Any authenticated user can read any contact by id; only update and delete
/// check the owner.
pub async fn contact_show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<DataBody<Contact>> {
    validate_contact_id(&id)?;

    let contact = state
        .store
        .find_contact(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contact not found"))?;

    Ok(ApiResponse::data(contact))
}
