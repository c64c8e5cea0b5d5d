// handlers/protected/contacts/create.rs - POST /api/v1/contacts handler

use axum::extract::{Extension, State};

use crate::database::{Contact, NewContact};
use crate::middleware::validate::CONTACT_CREATE_RULES;
use crate::middleware::{from_body, validate, ApiResponse, ApiResult, DataBody, JsonBody, RequestContext};
use crate::state::AppState;

/// POST /api/v1/contacts - Create a contact owned by the caller
pub async fn contact_create(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    JsonBody(body): JsonBody,
) -> ApiResult<DataBody<Contact>> {
    validate(CONTACT_CREATE_RULES, &body)?;
    let fields: NewContact = from_body(body)?;

    let owner = ctx.user_id()?;
    let contact = state.store.create_contact(owner, fields).await?;

    tracing::info!("Contact {} created by user {}", contact.id, owner);
    Ok(ApiResponse::created(DataBody { data: contact }))
}
