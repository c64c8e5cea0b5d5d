// handlers/protected/contacts/update.rs - PUT /api/v1/contacts/:id handler

use axum::extract::{Extension, Path, State};
use chrono::Utc;

use crate::database::{Contact, ContactPatch, StoreError};
use crate::error::ApiError;
use crate::middleware::validate::CONTACT_UPDATE_RULES;
use crate::middleware::{
    from_body, load_owned_contact, validate, validate_contact_id, ApiResponse, ApiResult, DataBody, JsonBody,
    RequestContext,
};
use crate::state::AppState;

/// PUT /api/v1/contacts/:id - Partially update a contact owned by the caller
///
/// Stage order: id shape, body rules, existence, ownership, save.
pub async fn contact_update(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<DataBody<Contact>> {
    validate_contact_id(&id)?;
    validate(CONTACT_UPDATE_RULES, &body)?;
    let patch: ContactPatch = from_body(body)?;

    let mut contact = load_owned_contact(state.store.as_ref(), &ctx, &id).await?;
    contact.apply(patch, Utc::now());
    let updated = state.store.save_contact(&contact).await.map_err(saved_or_gone)?;

    tracing::info!("Contact {} updated", updated.id);
    Ok(ApiResponse::data(updated))
}

/// A row removed by a concurrent delete reads as 404, as in the delete handler.
fn saved_or_gone(err: StoreError) -> ApiError {
    match err {
        StoreError::Sqlx(sqlx::Error::RowNotFound) => ApiError::not_found("Contact not found"),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{ContactStore, MemoryStore, NewContact};
    use uuid::Uuid;

    fn new_contact() -> NewContact {
        NewContact {
            first_name: "John".into(),
            last_name: "Doe".into(),
            phone_number: "1234567890".into(),
            email: None,
            contact_type: None,
            address: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn saving_a_deleted_contact_is_404() {
        let store = MemoryStore::new();
        let contact = store.create_contact(Uuid::new_v4(), new_contact()).await.unwrap();
        assert!(store.delete_contact(contact.id).await.unwrap());

        let err = store.save_contact(&contact).await.map_err(saved_or_gone).unwrap_err();
        assert_eq!(err, ApiError::not_found("Contact not found"));
    }

    #[test]
    fn other_store_failures_stay_internal() {
        let err = saved_or_gone(StoreError::Sqlx(sqlx::Error::PoolTimedOut));
        assert_eq!(err.status_code(), 500);
    }
}
