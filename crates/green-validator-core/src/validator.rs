//! The validator: parses rule specs, runs built-in rules, accumulates
//! failure messages.
//!
//! ## Accumulation
//!
//! Messages accumulate across calls to [`Validator::validate`] for the life
//! of the instance. Two passes over one validator report the failures of
//! both. Use [`Validator::reset`] or a fresh validator to start over.
//!
//! ## Unknown rules
//!
//! | Atom | Default handling |
//! |------|------------------|
//! | unknown `name` | ignored, no message |
//! | unknown `name:args` | `Unknown validation rule: name` |
//!
//! The first row can be switched to reporting with
//! [`UnknownRulePolicy::Report`].

use crate::config::{UnknownRulePolicy, ValidatorConfig};
use crate::outcome::Outcome;
use crate::rules::table::RuleContext;
use crate::rules::{table, PatternCache, Rule, RuleSpec};
use crate::subject::Subject;

/// Accumulates failure messages from rule specs.
///
/// Every atom of every spec is evaluated; a failing rule appends a message
/// and evaluation continues.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
    errors: Vec<String>,
    patterns: PatternCache,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            config,
            errors: Vec::new(),
            patterns: PatternCache::new(),
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate each `(subject, rule spec)` pair, in iteration order.
    ///
    /// Accepts any map or sequence of pairs. A map cannot hold the same
    /// subject twice; pass a `Vec` of pairs when one value needs two specs.
    ///
    /// ```rust
    /// use green_validator_core::Validator;
    ///
    /// let outcome = Validator::new()
    ///     .validate([("John Doe", "string|min:5|max:20"), ("12345", "number")])
    ///     .execute();
    /// assert!(outcome.is_valid());
    /// ```
    pub fn validate<I, S, R>(&mut self, requests: I) -> &mut Self
    where
        I: IntoIterator<Item = (S, R)>,
        S: Into<Subject>,
        R: AsRef<str>,
    {
        for (subject, spec) in requests {
            self.validate_subject(subject, spec.as_ref());
        }
        self
    }

    /// Validate one subject against one rule spec.
    pub fn validate_subject(&mut self, subject: impl Into<Subject>, spec: &str) -> &mut Self {
        let subject = subject.into();
        for rule in &RuleSpec::parse(spec) {
            self.apply_rule(&subject, rule);
        }
        self
    }

    /// Apply a single rule atom.
    fn apply_rule(&mut self, subject: &Subject, rule: &Rule) {
        let failure = match rule {
            Rule::Parameterized { name, args } => match table::parameterized(name) {
                Some(handler) => {
                    let mut ctx = RuleContext {
                        config: &self.config,
                        patterns: &mut self.patterns,
                    };
                    handler(subject, args, &mut ctx)
                }
                None => {
                    tracing::warn!(rule = %name, "Unknown parameterized validation rule");
                    Some(unknown_rule_message(name))
                }
            },
            Rule::Simple { name } => match table::simple(name) {
                Some(simple) => simple.apply(subject),
                None => match self.config.unknown_simple_rules {
                    UnknownRulePolicy::Ignore => {
                        tracing::trace!(rule = %name, "Ignoring unknown simple validation rule");
                        None
                    }
                    UnknownRulePolicy::Report => Some(unknown_rule_message(name)),
                },
            },
        };

        if let Some(message) = failure {
            tracing::debug!(rule = %rule.name(), message = %message, "Validation rule failed");
            self.errors.push(message);
        }
    }

    /// Build an outcome from the messages accumulated so far.
    ///
    /// Does not consume or clear anything; calling it twice gives equal
    /// outcomes.
    pub fn execute(&self) -> Outcome {
        Outcome::from_errors(&self.errors, &self.config.separator)
    }

    /// The accumulated failure messages, in order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn passes(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fails(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Drop every accumulated message.
    pub fn reset(&mut self) -> &mut Self {
        self.errors.clear();
        self
    }
}

fn unknown_rule_message(name: &str) -> String {
    format!("Unknown validation rule: {}", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        let outcome = Validator::new()
            .validate([("test@example.com", "email")])
            .execute();

        assert!(outcome.is_valid());
        assert_eq!(outcome.message(), "");
    }

    #[test]
    fn test_invalid_email_message() {
        let outcome = Validator::new()
            .validate([("invalid-email", "email")])
            .execute();

        assert!(outcome.failed());
        assert_eq!(outcome.message(), "invalid-email is not a valid email");
    }

    #[test]
    fn test_all_atoms_evaluated() {
        let mut validator = Validator::new();
        validator.validate([("a!", "alpha|alphanumeric|min:5")]);

        assert_eq!(
            validator.errors(),
            &[
                "a! must contain only letters",
                "a! must be alphanumeric",
                "a! must be at least 5 characters",
            ]
        );
    }

    #[test]
    fn test_unknown_simple_rule_ignored() {
        let mut validator = Validator::new();
        validator.validate([("anything", "nonsense|also_nonsense")]);
        assert!(validator.passes());
    }

    #[test]
    fn test_unknown_parameterized_rule_reported() {
        let mut validator = Validator::new();
        validator.validate([("anything", "size:10")]);
        assert_eq!(validator.errors(), &["Unknown validation rule: size"]);
    }

    #[test]
    fn test_unknown_simple_rule_report_policy() {
        let config = ValidatorConfig::new().with_unknown_simple_rules(UnknownRulePolicy::Report);
        let mut validator = Validator::with_config(config);
        validator.validate([("anything", "nonsense")]);
        assert_eq!(validator.errors(), &["Unknown validation rule: nonsense"]);
    }

    #[test]
    fn test_custom_separator() {
        let config = ValidatorConfig::new().with_separator("\n");
        let outcome = Validator::with_config(config)
            .validate([("abc", "number|email")])
            .execute();

        assert_eq!(
            outcome.message(),
            "abc is not a valid number\nabc is not a valid email"
        );
    }

    #[test]
    fn test_reset_clears_errors() {
        let mut validator = Validator::new();
        validator.validate([("abc", "number")]);
        assert!(validator.fails());

        validator.reset();
        assert!(validator.passes());
        assert!(validator.execute().is_valid());
    }

    #[test]
    fn test_regex_compiled_once_per_pattern() {
        let mut validator = Validator::new();
        validator.validate([
            ("ABC123", "regex:/^[A-Z]{3}[0-9]{3}$/"),
            ("XYZ789", "regex:/^[A-Z]{3}[0-9]{3}$/"),
            ("abc000", "regex:/^[A-Z]{3}[0-9]{3}$/"),
            ("abc", "regex:/^[a-c]+$/i"),
        ]);

        assert_eq!(validator.patterns.len(), 2);
        assert_eq!(
            validator.errors(),
            &["abc000 does not match required pattern"]
        );
    }

    #[test]
    fn test_confirmed_passes() {
        let mut validator = Validator::new();
        validator.validate([("secret", "required|confirmed:secret_confirmation")]);
        assert!(validator.passes());
    }

    #[test]
    fn test_non_text_subjects() {
        let mut validator = Validator::new();
        validator
            .validate_subject(25, "number|between:18,65")
            .validate_subject(true, "boolean|required")
            .validate_subject(None::<&str>, "required");

        assert_eq!(validator.errors(), &[" is required"]);
    }
}
