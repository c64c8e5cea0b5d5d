use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub mod memory;
pub mod models;
pub mod postgres;

pub use memory::MemoryStore;
pub use models::{Contact, ContactPatch, ContactType, NewContact, NewUser, User, UserProfile};
pub use postgres::PgStore;

/// Errors from the document store adapters
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Malformed identifier: {0}")]
    MalformedId(String),

    #[error("Duplicate value for unique field '{0}'")]
    Duplicate(&'static str),

    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Parse the textual form of a store identifier.
pub fn parse_id(raw: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(raw).map_err(|_| StoreError::MalformedId(raw.to_string()))
}

/// Whether `raw` has the shape of a store identifier.
pub fn is_valid_id(raw: &str) -> bool {
    Uuid::parse_str(raw).is_ok()
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look a user up by id. The projection never carries the password digest.
    async fn find_user(&self, id: &str) -> Result<Option<UserProfile>, StoreError>;

    /// Exact (case-sensitive) email match.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Fails with [`StoreError::Duplicate`] when the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;
}

#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn find_contact(&self, id: &str) -> Result<Option<Contact>, StoreError>;

    /// Every contact owned by `owner`, oldest first.
    async fn list_contacts(&self, owner: Uuid) -> Result<Vec<Contact>, StoreError>;

    async fn create_contact(&self, owner: Uuid, contact: NewContact) -> Result<Contact, StoreError>;

    /// Persist the mutable fields of an existing contact and return the stored record.
    async fn save_contact(&self, contact: &Contact) -> Result<Contact, StoreError>;

    /// Returns `false` when nothing was deleted.
    async fn delete_contact(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait Store: UserStore + ContactStore {
    async fn health_check(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_identifier_shape() {
        assert!(is_valid_id(&Uuid::new_v4().to_string()));
        assert!(!is_valid_id("not-a-valid-id"));
        assert!(!is_valid_id(""));
        assert!(matches!(parse_id("invalid-id"), Err(StoreError::MalformedId(id)) if id == "invalid-id"));
    }
}
