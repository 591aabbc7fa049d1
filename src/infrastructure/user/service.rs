//! User service for user management

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::domain::user::{validate, PendingUser, User, UserId, UserRepository};
use crate::domain::DomainError;

/// Request for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

/// Request for updating a user
///
/// Both fields are replaced, as with a full `PUT` of the record.
#[derive(Debug, Clone)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
}

/// User service for managing users
#[derive(Debug)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new user service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create a new user
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        let pending = PendingUser::new(request.name, request.email);

        validate(&pending).inspect_err(|e| {
            debug!(field = e.field(), error = %e, "Rejected user");
        })?;

        // Cheap early check; the repository still enforces uniqueness on commit
        if self.repository.email_exists(pending.email()).await? {
            return Err(DomainError::conflict(format!(
                "Email '{}' already exists",
                pending.email()
            )));
        }

        let user = self.repository.insert(pending).await?;
        info!(id = %user.id(), "Created user");

        Ok(user)
    }

    /// Get a user by ID
    pub async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        self.repository.get(&id).await
    }

    /// Get a user by email
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.repository.get_by_email(email).await
    }

    /// List all users
    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.repository.list().await
    }

    /// Count users
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }

    /// Update a user's name and email
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: UserId,
        request: UpdateUserRequest,
    ) -> Result<User, DomainError> {
        let mut user = self
            .repository
            .get(&id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        user.set_name(request.name);
        user.set_email(request.email);
        user.validate()?;

        let user = self.repository.update(&user).await?;
        info!("Updated user");

        Ok(user)
    }

    /// Delete a user
    #[instrument(skip(self))]
    pub async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        if !self.repository.delete(&id).await? {
            warn!("Delete requested for unknown user");
            return Err(DomainError::not_found(format!("User '{}' not found", id)));
        }

        info!("Deleted user");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::ManualClock;
    use crate::domain::user::MockUserRepository;
    use crate::infrastructure::user::repository::InMemoryUserRepository;
    use chrono::{TimeZone, Utc};

    fn create_service() -> UserService<InMemoryUserRepository> {
        UserService::new(Arc::new(InMemoryUserRepository::new()))
    }

    fn create_request(name: &str, email: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    fn update_request(name: &str, email: &str) -> UpdateUserRequest {
        UpdateUserRequest {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = Arc::new(ManualClock::new(start));
        let service = UserService::new(Arc::new(InMemoryUserRepository::with_clock(clock)));

        let user = service
            .create(create_request("Alice", "alice@example.com"))
            .await
            .unwrap();

        assert_eq!(user.id(), UserId::new(1));
        assert_eq!(user.name(), "Alice");
        assert_eq!(user.email(), "alice@example.com");
        assert_eq!(user.created_at(), start);
    }

    #[tokio::test]
    async fn test_create_user_blank_name() {
        let service = create_service();

        let err = service
            .create(create_request("", "bob@example.com"))
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert!(err.to_string().contains("Name is required"));
        assert_eq!(service.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_user_invalid_email() {
        let service = create_service();

        let err = service
            .create(create_request("Bob", "not-an-email"))
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert!(err.to_string().contains("Email should be valid"));
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let service = create_service();

        service
            .create(create_request("Bob", "dup@example.com"))
            .await
            .unwrap();

        let err = service
            .create(create_request("Robert", "dup@example.com"))
            .await
            .unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(service.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_user_skips_storage_when_invalid() {
        let mut mock = MockUserRepository::new();
        mock.expect_email_exists().never();
        mock.expect_insert().never();

        let service = UserService::new(Arc::new(mock));

        let err = service
            .create(create_request("  ", "bob@example.com"))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_create_user_conflict_at_commit() {
        let mut mock = MockUserRepository::new();
        mock.expect_email_exists().returning(|_| Ok(false));
        mock.expect_insert()
            .times(1)
            .returning(|user| {
                Err(DomainError::conflict(format!(
                    "Email '{}' already exists",
                    user.email()
                )))
            });

        let service = UserService::new(Arc::new(mock));

        let err = service
            .create(create_request("Bob", "race@example.com"))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let mut mock = MockUserRepository::new();
        mock.expect_list()
            .returning(|| Err(DomainError::storage("connection lost")));

        let service = UserService::new(Arc::new(mock));

        let err = service.list().await.unwrap_err();
        assert!(matches!(err, DomainError::Storage { .. }));
    }

    #[tokio::test]
    async fn test_get_and_list() {
        let service = create_service();

        let alice = service
            .create(create_request("Alice", "alice@example.com"))
            .await
            .unwrap();
        service
            .create(create_request("Bob", "bob@example.com"))
            .await
            .unwrap();

        let found = service.get(alice.id()).await.unwrap();
        assert_eq!(found, Some(alice));

        let by_email = service.get_by_email("bob@example.com").await.unwrap();
        assert_eq!(by_email.unwrap().name(), "Bob");

        assert!(service.get(UserId::new(99)).await.unwrap().is_none());
        assert_eq!(service.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_user() {
        let service = create_service();
        let created = service
            .create(create_request("Alice", "alice@example.com"))
            .await
            .unwrap();

        let updated = service
            .update(created.id(), update_request("Alicia", "alicia@example.com"))
            .await
            .unwrap();

        assert_eq!(updated.id(), created.id());
        assert_eq!(updated.created_at(), created.created_at());
        assert_eq!(updated.name(), "Alicia");
        assert_eq!(updated.email(), "alicia@example.com");
    }

    #[tokio::test]
    async fn test_update_user_revalidates() {
        let service = create_service();
        let created = service
            .create(create_request("Alice", "alice@example.com"))
            .await
            .unwrap();

        let err = service
            .update(created.id(), update_request("Alice", "broken"))
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let stored = service.get(created.id()).await.unwrap().unwrap();
        assert_eq!(stored.email(), "alice@example.com");
    }

    #[tokio::test]
    async fn test_update_user_email_conflict() {
        let service = create_service();
        service
            .create(create_request("Alice", "alice@example.com"))
            .await
            .unwrap();
        let bob = service
            .create(create_request("Bob", "bob@example.com"))
            .await
            .unwrap();

        let err = service
            .update(bob.id(), update_request("Bob", "alice@example.com"))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let service = create_service();

        let err = service
            .update(UserId::new(5), update_request("X", "x@example.com"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_user() {
        let service = create_service();
        let user = service
            .create(create_request("Alice", "alice@example.com"))
            .await
            .unwrap();

        service.delete(user.id()).await.unwrap();
        assert!(service.get(user.id()).await.unwrap().is_none());

        let err = service.delete(user.id()).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
