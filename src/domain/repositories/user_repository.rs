use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::user::{DocumentId, User, UserRecord},
};

/// Remote document collection holding registered users
#[async_trait]
pub trait UserRepository {
    /// Add one record. Every call is a single write attempt.
    async fn add_user(&self, record: &UserRecord) -> Result<DocumentId, RepositoryError>;

    async fn list_users(&self) -> Result<Vec<User>, RepositoryError>;
}
