use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;
use uuid::Uuid;

use super::models::{Contact, NewContact, NewUser, User, UserProfile};
use super::{parse_id, ContactStore, Store, StoreError, UserStore};
use crate::config::{redact_url, DatabaseConfig};

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id          UUID PRIMARY KEY,
        name        TEXT NOT NULL,
        email       TEXT NOT NULL UNIQUE,
        password    TEXT NOT NULL,
        created_at  TIMESTAMPTZ NOT NULL,
        updated_at  TIMESTAMPTZ NOT NULL
    )
"#;

const CREATE_CONTACTS: &str = r#"
    CREATE TABLE IF NOT EXISTS contacts (
        id            UUID PRIMARY KEY,
        user_id       UUID NOT NULL REFERENCES users(id),
        first_name    TEXT NOT NULL,
        last_name     TEXT NOT NULL,
        phone_number  TEXT NOT NULL,
        email         TEXT,
        contact_type  TEXT NOT NULL DEFAULT 'personal',
        address       TEXT,
        notes         TEXT,
        created_at    TIMESTAMPTZ NOT NULL,
        updated_at    TIMESTAMPTZ NOT NULL
    )
"#;

const CREATE_CONTACTS_OWNER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS contacts_user_id_idx ON contacts (user_id, created_at)";

const CONTACT_COLUMNS: &str = "id, user_id, first_name, last_name, phone_number, email, \
     contact_type, address, notes, created_at, updated_at";

/// PostgreSQL-backed store
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect using the configured pool settings and make sure the tables exist.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let url = config
            .url
            .as_deref()
            .ok_or(StoreError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!("Database connected: {}", redact_url(url));

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        for statement in [CREATE_USERS, CREATE_CONTACTS, CREATE_CONTACTS_OWNER_INDEX] {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

fn map_unique_violation(err: sqlx::Error, field: &'static str) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Duplicate(field),
        _ => StoreError::Sqlx(err),
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user(&self, id: &str) -> Result<Option<UserProfile>, StoreError> {
        let id = parse_id(id)?;
        let profile = sqlx::query_as::<_, UserProfile>(
            "SELECT id, name, email, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password, created_at, updated_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let now = Utc::now();
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id, name, email, password, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "email"))
    }
}

#[async_trait]
impl ContactStore for PgStore {
    async fn find_contact(&self, id: &str) -> Result<Option<Contact>, StoreError> {
        let id = parse_id(id)?;
        let sql = format!("SELECT {} FROM contacts WHERE id = $1", CONTACT_COLUMNS);
        let contact = sqlx::query_as::<_, Contact>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(contact)
    }

    async fn list_contacts(&self, owner: Uuid) -> Result<Vec<Contact>, StoreError> {
        let sql = format!(
            "SELECT {} FROM contacts WHERE user_id = $1 ORDER BY created_at, id",
            CONTACT_COLUMNS
        );
        let contacts = sqlx::query_as::<_, Contact>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;
        Ok(contacts)
    }

    async fn create_contact(&self, owner: Uuid, contact: NewContact) -> Result<Contact, StoreError> {
        let record = Contact::new(owner, contact, Utc::now());
        let sql = format!(
            "INSERT INTO contacts ({cols}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING {cols}",
            cols = CONTACT_COLUMNS
        );
        let created = sqlx::query_as::<_, Contact>(&sql)
            .bind(record.id)
            .bind(record.owner)
            .bind(&record.first_name)
            .bind(&record.last_name)
            .bind(&record.phone_number)
            .bind(&record.email)
            .bind(record.contact_type.as_str())
            .bind(&record.address)
            .bind(&record.notes)
            .bind(record.created_at)
            .bind(record.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn save_contact(&self, contact: &Contact) -> Result<Contact, StoreError> {
        let sql = format!(
            r#"
            UPDATE contacts
            SET first_name = $2, last_name = $3, phone_number = $4, email = $5,
                contact_type = $6, address = $7, notes = $8, updated_at = $9
            WHERE id = $1
            RETURNING {}
            "#,
            CONTACT_COLUMNS
        );
        let saved = sqlx::query_as::<_, Contact>(&sql)
            .bind(contact.id)
            .bind(&contact.first_name)
            .bind(&contact.last_name)
            .bind(&contact.phone_number)
            .bind(&contact.email)
            .bind(contact.contact_type.as_str())
            .bind(&contact.address)
            .bind(&contact.notes)
            .bind(contact.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(saved)
    }

    async fn delete_contact(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Store for PgStore {
    /// Pings the pool to ensure connectivity
    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
