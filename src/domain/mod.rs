//! Domain layer - Core entities, validation and collaborator traits

pub mod clock;
pub mod error;
pub mod user;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::DomainError;
pub use user::{
    collect_violations, validate, PendingUser, User, UserId, UserRepository, UserValidationError,
};
