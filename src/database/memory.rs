use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{Contact, NewContact, NewUser, User, UserProfile};
use super::{parse_id, ContactStore, Store, StoreError, UserStore};

/// In-process store with the same semantics as the database adapter.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    // insertion order doubles as creation order
    contacts: RwLock<Vec<Contact>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users registered under `email`.
    pub async fn count_users_with_email(&self, email: &str) -> usize {
        self.users
            .read()
            .await
            .values()
            .filter(|u| u.email == email)
            .count()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user(&self, id: &str) -> Result<Option<UserProfile>, StoreError> {
        let id = parse_id(id)?;
        Ok(self.users.read().await.get(&id).map(User::profile))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate("email"));
        }

        let now = Utc::now();
        let record = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password: user.password,
            created_at: now,
            updated_at: now,
        };
        users.insert(record.id, record.clone());
        Ok(record)
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn find_contact(&self, id: &str) -> Result<Option<Contact>, StoreError> {
        let id = parse_id(id)?;
        let contacts = self.contacts.read().await;
        Ok(contacts.iter().find(|c| c.id == id).cloned())
    }

    async fn list_contacts(&self, owner: Uuid) -> Result<Vec<Contact>, StoreError> {
        let contacts = self.contacts.read().await;
        Ok(contacts.iter().filter(|c| c.owner == owner).cloned().collect())
    }

    async fn create_contact(&self, owner: Uuid, contact: NewContact) -> Result<Contact, StoreError> {
        let record = Contact::new(owner, contact, Utc::now());
        self.contacts.write().await.push(record.clone());
        Ok(record)
    }

    async fn save_contact(&self, contact: &Contact) -> Result<Contact, StoreError> {
        let mut contacts = self.contacts.write().await;
        let stored = contacts
            .iter_mut()
            .find(|c| c.id == contact.id)
            .ok_or_else(|| StoreError::Sqlx(sqlx::Error::RowNotFound))?;

        stored.first_name = contact.first_name.clone();
        stored.last_name = contact.last_name.clone();
        stored.phone_number = contact.phone_number.clone();
        stored.email = contact.email.clone();
        stored.contact_type = contact.contact_type;
        stored.address = contact.address.clone();
        stored.notes = contact.notes.clone();
        stored.updated_at = contact.updated_at;
        Ok(stored.clone())
    }

    async fn delete_contact(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut contacts = self.contacts.write().await;
        let before = contacts.len();
        contacts.retain(|c| c.id != id);
        Ok(contacts.len() != before)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{ContactPatch, ContactType};

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Test User".into(),
            email: email.into(),
            password: "$2b$04$digest".into(),
        }
    }

    fn new_contact(first: &str) -> NewContact {
        NewContact {
            first_name: first.into(),
            last_name: "Doe".into(),
            phone_number: "1234567890".into(),
            email: None,
            contact_type: None,
            address: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn rejects_duplicate_email() {
        let store = MemoryStore::new();
        store.create_user(new_user("test@example.com")).await.unwrap();

        let err = store.create_user(new_user("test@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate("email")));
        assert_eq!(store.count_users_with_email("test@example.com").await, 1);
    }

    #[tokio::test]
    async fn email_match_is_case_sensitive() {
        let store = MemoryStore::new();
        store.create_user(new_user("test@example.com")).await.unwrap();
        assert!(store.find_user_by_email("Test@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_user_returns_profile() {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("a@example.com")).await.unwrap();

        let profile = store.find_user(&user.id.to_string()).await.unwrap().unwrap();
        assert_eq!(profile, user.profile());
        assert!(store.find_user(&Uuid::new_v4().to_string()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_ids_are_cast_errors() {
        let store = MemoryStore::new();
        assert!(matches!(store.find_user("nope").await, Err(StoreError::MalformedId(_))));
        assert!(matches!(store.find_contact("nope").await, Err(StoreError::MalformedId(_))));
    }

    #[tokio::test]
    async fn lists_only_owned_contacts_in_creation_order() {
        let store = MemoryStore::new();
        let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());
        store.create_contact(alice, new_contact("First")).await.unwrap();
        store.create_contact(bob, new_contact("Other")).await.unwrap();
        store.create_contact(alice, new_contact("Second")).await.unwrap();

        let names: Vec<_> = store
            .list_contacts(alice)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.first_name)
            .collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert!(store.list_contacts(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_and_delete_round_trip() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let mut contact = store.create_contact(owner, new_contact("John")).await.unwrap();

        contact.apply(
            ContactPatch {
                contact_type: Some(ContactType::Professional),
                ..Default::default()
            },
            Utc::now(),
        );
        let saved = store.save_contact(&contact).await.unwrap();
        assert_eq!(saved.contact_type, ContactType::Professional);

        let reloaded = store.find_contact(&contact.id.to_string()).await.unwrap().unwrap();
        assert_eq!(reloaded, saved);

        assert!(store.delete_contact(contact.id).await.unwrap());
        assert!(!store.delete_contact(contact.id).await.unwrap());
        assert!(store.find_contact(&contact.id.to_string()).await.unwrap().is_none());
    }
}
