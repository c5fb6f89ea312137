//! Signup input validation
//!
//! Storage enforces uniqueness; these checks only reject input that could
//! never be a valid account.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

use crate::models::NewUser;

/// A rejected signup field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be between {min} and {max} characters long")]
    Length {
        field: &'static str,
        min: usize,
        max: usize,
    },

    #[error("Name can only contain letters, numbers, and underscores")]
    NameCharacters,

    #[error("Invalid email format")]
    EmailFormat,

    #[error("Password must contain at least one {0}")]
    PasswordClass(&'static str),
}

fn check_length(field: &'static str, value: &str, min: usize, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len == 0 {
        return Err(ValidationError::Missing { field });
    }
    if len < min || len > max {
        return Err(ValidationError::Length { field, min, max });
    }
    Ok(())
}

/// Validate a user name: 3-32 characters of `[A-Za-z0-9_]`
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    check_length("Name", name, 3, 32)?;

    static NAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = NAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("Failed to compile name regex"));

    if !regex.is_match(name) {
        return Err(ValidationError::NameCharacters);
    }

    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    check_length("Email", email, 3, 254)?;

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err(ValidationError::EmailFormat);
    }

    Ok(())
}

/// Validate password strength: 8-128 characters mixing upper and lower case
/// letters, digits and symbols
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    check_length("Password", password, 8, 128)?;

    let classes: [(&'static str, fn(&char) -> bool); 4] = [
        ("uppercase letter", char::is_ascii_uppercase),
        ("lowercase letter", char::is_ascii_lowercase),
        ("digit", char::is_ascii_digit),
        ("special character", |c| !c.is_alphanumeric()),
    ];

    for (class, matches) in classes {
        if !password.chars().any(|c| matches(&c)) {
            return Err(ValidationError::PasswordClass(class));
        }
    }

    Ok(())
}

/// Validate every field of a signup payload, stopping at the first failure
pub fn validate_new_user(new_user: &NewUser) -> Result<(), ValidationError> {
    validate_name(&new_user.name)?;
    validate_email(&new_user.email)?;
    validate_password(&new_user.password)
}
