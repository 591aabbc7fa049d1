//! Infrastructure layer - Storage collaborator, services and logging

pub mod logging;
pub mod user;
