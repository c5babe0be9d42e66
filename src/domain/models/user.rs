use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::encoded_image::EncodedImage;

/// Identifier the document store assigns to a written record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Profile being edited on the sign-up screen.
///
/// Starts empty and is mutated one field at a time. Only the form
/// controller owns one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfileDraft {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub encoded_image: Option<EncodedImage>,
}

impl UserProfileDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the record to persist. Callers validate first.
    pub fn to_record(&self, image: EncodedImage) -> UserRecord {
        UserRecord {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            image,
        }
    }
}

/// Shape written to the `users` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    pub password: String,
    pub image: EncodedImage,
}

/// A user read back from the document store for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: DocumentId,
    name: String,
    email: String,
    image: EncodedImage,
}

impl User {
    pub fn new(id: DocumentId, name: String, email: String, image: EncodedImage) -> Self {
        Self {
            id,
            name,
            email,
            image,
        }
    }

    pub fn from_record(id: DocumentId, record: UserRecord) -> Self {
        Self {
            id,
            name: record.name,
            email: record.email,
            image: record.image,
        }
    }

    // getters only
    pub fn id(&self) -> DocumentId {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn image(&self) -> &EncodedImage {
        &self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_store_field_names() {
        let record = UserRecord {
            name: "Sam".to_string(),
            email: "sam@x.com".to_string(),
            password: "p1".to_string(),
            image: EncodedImage::new("AAA".to_string()),
        };

        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "name": "Sam",
                "email": "sam@x.com",
                "password": "p1",
                "image": "AAA",
            })
        );
    }

    #[test]
    fn draft_starts_empty() {
        let draft = UserProfileDraft::new();
        assert!(draft.name.is_empty());
        assert!(draft.encoded_image.is_none());
    }
}
