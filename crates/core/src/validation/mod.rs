//! Local input validation for forms
//!
//! Every form is validated before submission. Errors are collected per field
//! so they can be shown inline next to the offending input.

mod forms;

use serde::Serialize;

use crate::{Error, Result};

pub use forms::{
    CardExpiry, CommentForm, ForumForm, LoginForm, PasswordResetForm, PaymentMethodForm,
    SignupForm,
};

/// A single field failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// First message recorded for `field`
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self))
        }
    }

    pub(crate) fn required(&mut self, field: &'static str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.push(field, "This field is required");
            false
        } else {
            true
        }
    }

    pub(crate) fn length(&mut self, field: &'static str, value: &str, min: usize, max: usize) {
        let len = value.trim().chars().count();
        if len < min {
            self.push(field, format!("Must be at least {} characters", min));
        } else if len > max {
            self.push(field, format!("Must be at most {} characters", max));
        }
    }

    pub(crate) fn email(&mut self, field: &'static str, value: &str) {
        if self.required(field, value) && !is_email(value.trim()) {
            self.push(field, "Enter a valid email address");
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Implemented by every submittable form
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}
