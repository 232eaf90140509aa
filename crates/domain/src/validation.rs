//! Validation capability shared by every validated type.
//!
//! A [`Validator`] inspects a value and appends one message per broken rule
//! to a [`Violations`] sink. Validators never stop at the first problem, so
//! a caller always sees the full list.

use std::fmt;

use crate::error::ValidationError;

/// Ordered collection of human-readable violation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<String>);

impl Violations {
    /// Record one violation.
    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the messages in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Turn the collected messages into a result.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Rejected`] when at least one violation
    /// was recorded.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Rejected(self))
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

/// Checks a value of type `T` against a set of rules.
pub trait Validator<T: ?Sized> {
    /// Append one message to `errors` for every rule `target` breaks.
    fn validate(&self, target: &T, errors: &mut Violations);

    /// Run [`validate`](Self::validate) into a fresh sink.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Rejected`] carrying every violation found.
    fn check(&self, target: &T) -> Result<(), ValidationError> {
        let mut errors = Violations::default();
        self.validate(target, &mut errors);
        errors.into_result()
    }
}
