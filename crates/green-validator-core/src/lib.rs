//! # green-validator-core
//!
//! Declarative validation with pipe-delimited rule strings.
//!
//! Callers pair each value with a rule spec such as `"string|min:6|max:15"`.
//! The validator runs every rule of every spec, collects a human-readable
//! message for each failure and reports an overall verdict.
//!
//! ## Key Guarantees
//!
//! 1. **No short-circuit**: every rule atom is evaluated, so all failures are reported
//! 2. **No panics on bad input**: failing rules and malformed rule arguments become messages
//! 3. **Bounded matching**: `regex` rules run on a linear-time engine with a size cap
//!
//! ## Example
//!
//! ```rust
//! use green_validator_core::Validator;
//!
//! let outcome = Validator::new()
//!     .validate([
//!         ("john.doe@example.com", "required|email"),
//!         ("JohnDoe123", "required|alphanumeric|min:6|max:20"),
//!         ("25", "required|number|between:18,100"),
//!     ])
//!     .execute();
//!
//! assert!(outcome.is_valid());
//! ```
//!
//! ## Built-in Rules
//!
//! - **Simple**: `email`, `string`, `number`, `float`, `alpha`, `alphanumeric`,
//!   `url`, `ip`, `ipv4`, `ipv6`, `json`, `date`, `boolean`, `required`
//! - **Parameterized**: `min:N`, `max:N`, `between:lo,hi`, `in:a,b,c`,
//!   `regex:/pattern/flags`, `date:format`, `confirmed:field`

pub mod config;
pub mod legacy;
pub mod outcome;
pub mod rules;
pub mod subject;
pub mod validator;

// Re-export main types at crate root
pub use config::{ConfigError, UnknownRulePolicy, ValidatorConfig};
pub use legacy::{GreenValidator, Validation};
pub use outcome::{Outcome, ValidationFailed};
pub use rules::{PatternError, Rule, RuleSpec};
pub use subject::Subject;
pub use validator::Validator;

/// Validate `(subject, rule spec)` pairs with a fresh default validator.
///
/// Shorthand for `Validator::new().validate(requests).execute()`.
pub fn validate<I, S, R>(requests: I) -> Outcome
where
    I: IntoIterator<Item = (S, R)>,
    S: Into<Subject>,
    R: AsRef<str>,
{
    Validator::new().validate(requests).execute()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_validation() {
        let outcome = validate([
            ("John Doe", "string|min:5|max:20"),
            ("test@example.com", "email"),
            ("12345", "number"),
        ]);

        assert!(outcome.is_valid());
    }

    #[test]
    fn test_between_failure() {
        let outcome = validate([("999", "between:0,100")]);

        assert!(outcome.failed());
        assert!(outcome.message().contains("must be between 0 and 100"));
    }
}
