//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_user_fields, UserValidationError};
use crate::domain::clock::Clock;

/// User identifier assigned by the storage collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner integer value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user that has not been persisted yet
///
/// Carries neither an id nor a creation timestamp; both are fixed by
/// [`PendingUser::materialize`] when storage accepts the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingUser {
    name: String,
    email: String,
}

impl PendingUser {
    /// Create a new pending user
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Check the field constraints without touching storage
    pub fn validate(&self) -> Result<(), UserValidationError> {
        validate(self)
    }

    /// Turn this record into a persisted user
    ///
    /// Runs once per record: the pending value is consumed.
    pub fn materialize(self, id: UserId, clock: &dyn Clock) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            created_at: clock.now(),
        }
    }
}

/// Validate a pending user against the name and email rules
pub fn validate(candidate: &PendingUser) -> Result<(), UserValidationError> {
    validate_user_fields(&candidate.name, &candidate.email)
}

/// A persisted user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identifier assigned on insert, never changes
    id: UserId,
    name: String,
    /// Unique across all persisted users
    email: String,
    /// Set on insert, never changes
    created_at: DateTime<Utc>,
}

impl User {
    // Getters

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Re-check the field constraints, e.g. after an update
    pub fn validate(&self) -> Result<(), UserValidationError> {
        validate_user_fields(&self.name, &self.email)
    }

    // Mutators

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }
}
