//! Outcome: the pass/fail verdict of one validation pass.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Returned by [`Outcome::into_result`] when validation failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation failed: {message}")]
pub struct ValidationFailed {
    /// The joined failure messages
    pub message: String,
}

/// The result of a validation pass.
///
/// Only [`Validator::execute`](crate::Validator::execute) creates outcomes.
/// The message is empty when the outcome is valid; otherwise it holds every
/// accumulated failure message, in order, joined by the configured
/// separator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    is_valid: bool,
    message: String,
}

impl Outcome {
    pub(crate) fn from_errors(errors: &[String], separator: &str) -> Self {
        if errors.is_empty() {
            Self {
                is_valid: true,
                message: String::new(),
            }
        } else {
            Self {
                is_valid: false,
                message: errors.join(separator),
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Always `!self.is_valid()`.
    pub fn failed(&self) -> bool {
        !self.is_valid
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// `Ok(())` when valid, otherwise the message as an error.
    pub fn into_result(self) -> Result<(), ValidationFailed> {
        if self.is_valid {
            Ok(())
        } else {
            Err(ValidationFailed {
                message: self.message,
            })
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid {
            f.write_str("validation passed")
        } else {
            f.write_str(&self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_outcome() {
        let outcome = Outcome::from_errors(&[], "<br>");
        assert!(outcome.is_valid());
        assert!(!outcome.failed());
        assert_eq!(outcome.message(), "");
        assert!(outcome.into_result().is_ok());
    }

    #[test]
    fn test_failed_outcome_joins_messages() {
        let errors = vec!["a is bad".to_string(), "b is bad".to_string()];
        let outcome = Outcome::from_errors(&errors, "<br>");

        assert!(!outcome.is_valid());
        assert!(outcome.failed());
        assert_eq!(outcome.message(), "a is bad<br>b is bad");
        assert_eq!(outcome.to_string(), "a is bad<br>b is bad");
    }

    #[test]
    fn test_into_result_error() {
        let outcome = Outcome::from_errors(&["x is required".to_string()], "\n");
        let err = outcome.into_result().unwrap_err();
        assert_eq!(err.message, "x is required");
        assert_eq!(err.to_string(), "Validation failed: x is required");
    }

    #[test]
    fn test_serialize() {
        let outcome = Outcome::from_errors(&[], "<br>");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json, serde_json::json!({"is_valid": true, "message": ""}));
    }
}
