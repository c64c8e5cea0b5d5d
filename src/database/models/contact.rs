use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactType {
    #[default]
    Personal,
    Professional,
}

impl ContactType {
    pub const ALLOWED: &'static [&'static str] = &["personal", "professional"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactType::Personal => "personal",
            ContactType::Professional => "professional",
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown contact type '{0}'")]
pub struct UnknownContactType(String);

impl TryFrom<String> for ContactType {
    type Error = UnknownContactType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "personal" => Ok(ContactType::Personal),
            "professional" => Ok(ContactType::Professional),
            _ => Err(UnknownContactType(value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    /// Owning user. Set at creation and never rewritten.
    #[serde(rename = "user")]
    #[sqlx(rename = "user_id")]
    pub owner: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(try_from = "String")]
    pub contact_type: ContactType,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    pub fn new(owner: Uuid, fields: NewContact, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            first_name: fields.first_name,
            last_name: fields.last_name,
            phone_number: fields.phone_number,
            email: fields.email,
            contact_type: fields.contact_type.unwrap_or_default(),
            address: fields.address,
            notes: fields.notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the fields present in `patch`; everything else is kept.
    pub fn apply(&mut self, patch: ContactPatch, now: DateTime<Utc>) {
        if let Some(v) = patch.first_name {
            self.first_name = v;
        }
        if let Some(v) = patch.last_name {
            self.last_name = v;
        }
        if let Some(v) = patch.phone_number {
            self.phone_number = v;
        }
        if let Some(v) = patch.email {
            self.email = Some(v);
        }
        if let Some(v) = patch.contact_type {
            self.contact_type = v;
        }
        if let Some(v) = patch.address {
            self.address = v;
        }
        if let Some(v) = patch.notes {
            self.notes = v;
        }
        self.updated_at = now;
    }
}

/// Fields accepted when creating a contact.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: Option<String>,
    #[serde(rename = "type")]
    pub contact_type: Option<ContactType>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

/// Partial update. The owner and id are deliberately absent.
///
/// `address` and `notes` distinguish an absent field (`None`) from an
/// explicit `null` (`Some(None)`), which clears the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "type")]
    pub contact_type: Option<ContactType>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    pub notes: Option<Option<String>>,
}
