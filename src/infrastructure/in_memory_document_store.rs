use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::{
    error::RepositoryError,
    models::user::{DocumentId, User, UserRecord},
    repositories::user_repository::UserRepository,
};

type Collections = HashMap<String, Vec<(DocumentId, Value)>>;

/// Collection-keyed document store held in process memory.
///
/// Documents are kept as JSON values, the way a hosted document database
/// stores them, and mapped back into domain types on read.
#[derive(Clone)]
pub struct InMemoryDocumentStore {
    collection: String,
    collections: Arc<RwLock<Collections>>,
}

impl InMemoryDocumentStore {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            collections: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub async fn len(&self) -> usize {
        self.collections
            .read()
            .await
            .get(&self.collection)
            .map_or(0, Vec::len)
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Store an arbitrary document, bypassing the user schema
    pub async fn insert_raw(&self, document: Value) -> DocumentId {
        let id = DocumentId::new();
        self.collections
            .write()
            .await
            .entry(self.collection.clone())
            .or_default()
            .push((id, document));
        id
    }
}

#[async_trait]
impl UserRepository for InMemoryDocumentStore {
    async fn add_user(&self, record: &UserRecord) -> Result<DocumentId, RepositoryError> {
        let document =
            serde_json::to_value(record).map_err(|e| RepositoryError::Rejected(e.to_string()))?;
        let id = self.insert_raw(document).await;
        debug!(collection = %self.collection, document_id = %id, "document added");
        Ok(id)
    }

    async fn list_users(&self) -> Result<Vec<User>, RepositoryError> {
        let collections = self.collections.read().await;
        let Some(documents) = collections.get(&self.collection) else {
            return Ok(Vec::new());
        };

        let mut users = Vec::with_capacity(documents.len());
        for (id, document) in documents {
            match serde_json::from_value::<UserRecord>(document.clone()) {
                Ok(record) => users.push(User::from_record(*id, record)),
                Err(e) => warn!(document_id = %id, error = %e, "skipping malformed user document"),
            }
        }
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::encoded_image::EncodedImage;

    fn record(name: &str) -> UserRecord {
        UserRecord {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            password: "secret".to_string(),
            image: EncodedImage::new("AAA".to_string()),
        }
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let store = InMemoryDocumentStore::new("users");
        assert!(store.is_empty().await);

        let first = store.add_user(&record("Ann")).await.unwrap();
        let second = store.add_user(&record("Bob")).await.unwrap();
        assert_ne!(first, second);

        let users = store.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id(), first);
        assert_eq!(users[0].name(), "Ann");
        assert_eq!(users[1].email(), "bob@example.com");
    }

    #[tokio::test]
    async fn test_list_skips_malformed_documents() {
        let store = InMemoryDocumentStore::new("users");
        store.insert_raw(serde_json::json!({ "name": "no email" })).await;
        store.add_user(&record("Cat")).await.unwrap();

        let users = store.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name(), "Cat");
    }

    #[tokio::test]
    async fn test_collections_are_separate() {
        let users = InMemoryDocumentStore::new("users");
        let members = InMemoryDocumentStore {
            collection: "members".to_string(),
            collections: users.collections.clone(),
        };
        users.add_user(&record("Ann")).await.unwrap();

        assert_eq!(users.len().await, 1);
        assert!(members.list_users().await.unwrap().is_empty());
    }
}
