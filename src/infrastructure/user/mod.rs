//! User infrastructure module
//!
//! This module provides the in-memory storage collaborator for users and the
//! user service that validates input before it reaches storage.

mod repository;
mod service;

pub use repository::InMemoryUserRepository;
pub use service::{CreateUserRequest, UpdateUserRequest, UserService};
