//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::clock::{Clock, SystemClock};
use crate::domain::user::{PendingUser, User, UserId, UserRepository};
use crate::domain::DomainError;

const DEFAULT_FIRST_ID: i64 = 1;

#[derive(Debug)]
struct State {
    users: BTreeMap<UserId, User>,
    /// Index for email -> user ID lookup
    email_index: HashMap<String, UserId>,
    /// Next ID to hand out; only ever grows, `None` once the sequence is spent
    next_id: Option<i64>,
}

/// In-memory implementation of UserRepository
///
/// Records, the email index and the ID sequence share one lock, so the
/// uniqueness check and the commit happen atomically.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    state: RwLock<State>,
    clock: Arc<dyn Clock>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository using the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock::new()))
    }

    /// Create a new empty repository stamping creation times from `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::empty(clock, DEFAULT_FIRST_ID)
    }

    /// Create a new empty repository whose ID sequence starts at `first_id`
    ///
    /// IDs are positive, so `first_id` must be at least 1.
    pub fn with_first_id(clock: Arc<dyn Clock>, first_id: i64) -> Result<Self, DomainError> {
        if first_id < 1 {
            return Err(DomainError::validation(format!(
                "First user ID must be at least 1, got {}",
                first_id
            )));
        }

        Ok(Self::empty(clock, first_id))
    }

    fn empty(clock: Arc<dyn Clock>, first_id: i64) -> Self {
        Self {
            state: RwLock::new(State {
                users: BTreeMap::new(),
                email_index: HashMap::new(),
                next_id: Some(first_id),
            }),
            clock,
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: PendingUser) -> Result<User, DomainError> {
        let mut state = self.state.write().await;

        if state.email_index.contains_key(user.email()) {
            return Err(DomainError::conflict(format!(
                "Email '{}' already exists",
                user.email()
            )));
        }

        let next = state
            .next_id
            .ok_or_else(|| DomainError::storage("User ID sequence exhausted"))?;
        let id = UserId::new(next);
        state.next_id = next.checked_add(1);

        let user = user.materialize(id, self.clock.as_ref());
        debug!(id = %id, "Assigned user ID");

        state.email_index.insert(user.email().to_string(), id);
        state.users.insert(id, user.clone());

        Ok(user)
    }

    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let state = self.state.read().await;
        Ok(state.users.get(id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let state = self.state.read().await;

        Ok(state
            .email_index
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut state = self.state.write().await;
        let id = user.id();

        let (old_email, created_at) = match state.users.get(&id) {
            Some(existing) => (existing.email().to_string(), existing.created_at()),
            None => return Err(DomainError::not_found(format!("User '{}' not found", id))),
        };

        // The stored creation time is authoritative
        if created_at != user.created_at() {
            return Err(DomainError::validation(format!(
                "Creation time of user '{}' cannot change",
                id
            )));
        }

        let new_email = user.email().to_string();

        // If email changed, check uniqueness and update index
        if old_email != new_email {
            if state.email_index.contains_key(&new_email) {
                return Err(DomainError::conflict(format!(
                    "Email '{}' already exists",
                    new_email
                )));
            }

            state.email_index.remove(&old_email);
            state.email_index.insert(new_email, id);
        }

        state.users.insert(id, user.clone());

        Ok(user.clone())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;

        if let Some(user) = state.users.remove(id) {
            state.email_index.remove(user.email());
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let state = self.state.read().await;
        Ok(state.users.values().cloned().collect())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let state = self.state.read().await;
        Ok(state.users.len())
    }
}
