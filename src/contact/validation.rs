//! Field validators.
//!
//! Each validator is a pure check over the raw field value. Writing the
//! resulting message into the page is the form controller's job.

use super::field::Field;
use crate::config::ContactConfig;
use regex::Regex;

/// Letters (ASCII and the Latin-1 accented range) and whitespace only.
const NAME_PATTERN: &str = r"^[a-zA-ZÀ-ÿ\s]+$";

/// Something, an at sign, something, a dot, something. No whitespace or
/// extra at signs in any part.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Length as the browser reports it for a form value: UTF-16 code units.
///
pub fn text_length(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Reasons a field value can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("value is required")]
    Required,

    #[error("value must be at least {min} characters")]
    TooShort { min: usize },

    #[error("value has an invalid format")]
    InvalidFormat,

    #[error("no option selected")]
    InvalidSelection,
}

/// Compiled patterns and length limits for the contact form fields.
///
#[derive(Debug, Clone)]
pub struct Validator {
    name_pattern: Regex,
    email_pattern: Regex,
    name_min_len: usize,
    message_min_len: usize,
}

impl Validator {
    pub fn new(config: &ContactConfig) -> Result<Self, regex::Error> {
        Ok(Validator {
            name_pattern: Regex::new(NAME_PATTERN)?,
            email_pattern: Regex::new(EMAIL_PATTERN)?,
            name_min_len: config.name_min_len,
            message_min_len: config.message_min_len,
        })
    }

    pub fn message_min_len(&self) -> usize {
        self.message_min_len
    }

    /// Dispatch to the validator for `field`.
    ///
    pub fn check(&self, field: Field, value: &str) -> Result<(), ValidationError> {
        match field {
            Field::Name => self.name(value),
            Field::Email => self.email(value),
            Field::Subject => self.subject(value),
            Field::Message => self.message(value),
        }
    }

    pub fn name(&self, value: &str) -> Result<(), ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Required);
        }
        if text_length(trimmed) < self.name_min_len {
            return Err(ValidationError::TooShort {
                min: self.name_min_len,
            });
        }
        if !self.name_pattern.is_match(trimmed) {
            return Err(ValidationError::InvalidFormat);
        }
        Ok(())
    }

    pub fn email(&self, value: &str) -> Result<(), ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Required);
        }
        if !self.email_pattern.is_match(trimmed) {
            return Err(ValidationError::InvalidFormat);
        }
        Ok(())
    }

    pub fn subject(&self, value: &str) -> Result<(), ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::InvalidSelection);
        }
        Ok(())
    }

    pub fn message(&self, value: &str) -> Result<(), ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Required);
        }
        if text_length(trimmed) < self.message_min_len {
            return Err(ValidationError::TooShort {
                min: self.message_min_len,
            });
        }
        Ok(())
    }
}
