//! User repository trait

use async_trait::async_trait;

use super::entity::{PendingUser, User, UserId};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Storage collaborator for users
///
/// Implementations assign the id, stamp the creation time through
/// [`PendingUser::materialize`] exactly once per inserted record, and enforce
/// email uniqueness at commit time.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a pending user, returning the persisted record
    async fn insert(&self, user: PendingUser) -> Result<User, DomainError>;

    /// Get a user by ID
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by email
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Update the mutable fields of an existing user
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Delete a user
    async fn delete(&self, id: &UserId) -> Result<bool, DomainError>;

    /// List all users ordered by ID
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Count users
    async fn count(&self) -> Result<usize, DomainError>;

    /// Check if a user ID exists
    async fn exists(&self, id: &UserId) -> Result<bool, DomainError> {
        Ok(self.get(id).await?.is_some())
    }

    /// Check if an email is already taken
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_email(email).await?.is_some())
    }
}
