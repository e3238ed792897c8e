//! Request field validation.
//!
//! All checks run before any storage access; failures are collected per
//! field and reported together as one 400 response.

use crate::error::{ApiError, FieldError};

/// Special characters a password must draw from
const PASSWORD_SPECIALS: &str = "!@#$%^&*";

pub fn validate_name(name: &str) -> Option<FieldError> {
    let len = name.chars().count();
    if !(20..=60).contains(&len) {
        return Some(FieldError::new("name", "Name must be 20-60 characters"));
    }
    None
}

/// Accepts `local@label.tld` shapes: word/dash/dot local part, dotted
/// word/dash domain labels, 2-4 character TLD.
pub fn validate_email(email: &str) -> Option<FieldError> {
    fn is_word(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_'
    }

    let well_formed = (|| {
        let (local, domain) = email.split_once('@')?;
        if local.is_empty() || !local.chars().all(|c| is_word(c) || c == '-' || c == '.') {
            return None;
        }
        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() < 2 {
            return None;
        }
        for label in &labels {
            if label.is_empty() || !label.chars().all(|c| is_word(c) || c == '-') {
                return None;
            }
        }
        let tld = labels.last()?;
        if !(2..=4).contains(&tld.len()) {
            return None;
        }
        Some(())
    })()
    .is_some();

    if !well_formed {
        return Some(FieldError::new("email", "Invalid email format"));
    }
    None
}

pub fn validate_address(address: Option<&str>) -> Option<FieldError> {
    if let Some(address) = address {
        if address.chars().count() > 400 {
            return Some(FieldError::new("address", "Address must be under 400 characters"));
        }
    }
    None
}

/// 8-16 characters with at least one uppercase letter and one special
/// character from the fixed set.
pub fn validate_password(password: &str) -> Option<FieldError> {
    let len = password.chars().count();
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_special = password.chars().any(|c| PASSWORD_SPECIALS.contains(c));

    if !(8..=16).contains(&len) || !has_upper || !has_special {
        return Some(FieldError::new(
            "password",
            "Password must be 8-16 characters with at least one uppercase letter and one special character",
        ));
    }
    None
}

/// Fail with a single Validation error carrying every check that did not pass
pub fn collect(checks: Vec<Option<FieldError>>) -> Result<(), ApiError> {
    let errors: Vec<FieldError> = checks.into_iter().flatten().collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation(errors))
    }
}
