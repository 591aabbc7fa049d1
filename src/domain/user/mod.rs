//! User domain
//!
//! This module provides the user record in its pending and persisted forms,
//! the validation rules for its fields, and the storage collaborator trait.

mod entity;
mod repository;
mod validation;

pub use entity::{validate, PendingUser, User, UserId};
pub use repository::UserRepository;
pub use validation::{
    collect_violations, validate_email, validate_name, validate_user_fields, UserValidationError,
};

#[cfg(test)]
pub use repository::MockUserRepository;
