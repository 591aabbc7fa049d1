//! User Registry
//!
//! A user record with an explicit two-state lifecycle:
//! - `PendingUser` carries name and email only
//! - `User` is produced by the storage collaborator, which assigns the ID and
//!   stamps the creation time from an injected clock
//!
//! Field rules are checked by a plain validation function, independent of
//! any storage.

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    collect_violations, validate, Clock, DomainError, ManualClock, PendingUser, SystemClock, User,
    UserId, UserRepository, UserValidationError,
};
pub use infrastructure::user::{
    CreateUserRequest, InMemoryUserRepository, UpdateUserRequest, UserService,
};
