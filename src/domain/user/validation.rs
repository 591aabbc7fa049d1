//! User validation utilities

use thiserror::Error;
use validator::ValidateEmail;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    #[error("Name is required")]
    BlankName,

    #[error("Email is required")]
    BlankEmail,

    #[error("Email should be valid: '{0}'")]
    InvalidEmail(String),
}

impl UserValidationError {
    /// Name of the field whose constraint was violated
    pub fn field(&self) -> &'static str {
        match self {
            Self::BlankName => "name",
            Self::BlankEmail | Self::InvalidEmail(_) => "email",
        }
    }
}

/// Validate a user name
///
/// Rules:
/// - Cannot be blank (empty after trimming whitespace)
pub fn validate_name(name: &str) -> Result<(), UserValidationError> {
    if name.trim().is_empty() {
        return Err(UserValidationError::BlankName);
    }

    Ok(())
}

/// Validate an email address
///
/// Rules:
/// - Cannot be blank (empty after trimming whitespace)
/// - Must be a syntactically valid address (local part, `@`, domain)
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.trim().is_empty() {
        return Err(UserValidationError::BlankEmail);
    }

    if !email.validate_email() {
        return Err(UserValidationError::InvalidEmail(email.to_string()));
    }

    Ok(())
}

/// Validate both user fields, stopping at the first violation
///
/// The name is checked before the email.
pub fn validate_user_fields(name: &str, email: &str) -> Result<(), UserValidationError> {
    validate_name(name)?;
    validate_email(email)
}

/// Collect every violated rule, at most one per field
pub fn collect_violations(name: &str, email: &str) -> Vec<UserValidationError> {
    [validate_name(name), validate_email(email)]
        .into_iter()
        .filter_map(Result::err)
        .collect()
}
