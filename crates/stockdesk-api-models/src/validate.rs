//! Field rules shared by the create/update form schemas.
//!
//! Every form collects all violations instead of stopping at the first one so a
//! UI can flag each field in one pass.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

static EMAIL_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .ok()
});

/// A single failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Dotted path to the offending field (`transaction_items.0.unit_price`).
    pub path: String,
    /// Human-readable description of the failure.
    pub message: String,
}

/// All violations reported for one form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct FormErrors {
    errors: Vec<FieldError>,
}

impl FormErrors {
    /// Violations in the order they were detected.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// First message recorded for `path`, if any.
    #[must_use]
    pub fn message_for(&self, path: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.path == path)
            .map(|error| error.message.as_str())
    }

    /// Whether `path` has at least one violation.
    #[must_use]
    pub fn has(&self, path: &str) -> bool {
        self.message_for(path).is_some()
    }
}

/// Implemented by every form payload.
pub trait Validate {
    /// Check every field rule.
    ///
    /// # Errors
    ///
    /// Returns [`FormErrors`] listing each violated rule.
    fn validate(&self) -> Result<(), FormErrors>;
}

/// Accumulator used by the form implementations.
#[derive(Debug, Default)]
pub(crate) struct Rules {
    errors: Vec<FieldError>,
}

impl Rules {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            path: path.into(),
            message: message.into(),
        });
    }

    /// A `min(1)` string rule; whitespace counts as content.
    pub(crate) fn required(&mut self, path: &str, value: &str, message: &str) {
        if value.is_empty() {
            self.push(path, message);
        }
    }

    pub(crate) fn length(
        &mut self,
        path: &str,
        value: &str,
        min: usize,
        max: Option<usize>,
        messages: (Option<&str>, Option<&str>),
    ) {
        let count = value.chars().count();
        if count < min {
            let message = messages
                .0
                .map_or_else(|| format!("must be at least {min} characters"), str::to_string);
            self.push(path, message);
        } else if let Some(max) = max.filter(|max| count > *max) {
            let message = messages
                .1
                .map_or_else(|| format!("must be at most {max} characters"), str::to_string);
            self.push(path, message);
        }
    }

    pub(crate) fn email(&mut self, path: &str, value: &str, message: &str) {
        if !is_email(value) {
            self.push(path, message);
        }
    }

    pub(crate) fn uuid(&mut self, path: &str, value: &str, message: &str) {
        if Uuid::parse_str(value).is_err() {
            self.push(path, message);
        }
    }

    pub(crate) fn finish(self) -> Result<(), FormErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(FormErrors {
                errors: self.errors,
            })
        }
    }
}

/// Structural email check used by the forms.
#[must_use]
pub fn is_email(value: &str) -> bool {
    if value.starts_with('.') || value.contains("..") {
        return false;
    }
    EMAIL_PATTERN.as_ref().map_or_else(
        || {
            value
                .split_once('@')
                .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'))
        },
        |pattern| pattern.is_match(value),
    )
}

/// Whether an optional string carries non-whitespace content.
pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|value| value.trim().is_empty())
}
