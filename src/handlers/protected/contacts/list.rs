// handlers/protected/contacts/list.rs - GET /api/v1/contacts handler

use axum::extract::{Extension, State};

use crate::database::Contact;
use crate::middleware::{ApiResponse, ApiResult, DataBody, RequestContext};
use crate::state::AppState;

/// GET /api/v1/contacts - All contacts owned by the caller (possibly none)
pub async fn contact_list(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> ApiResult<DataBody<Vec<Contact>>> {
    let contacts = state.store.list_contacts(ctx.user_id()?).await?;
    Ok(ApiResponse::data(contacts))
}
