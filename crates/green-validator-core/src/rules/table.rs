//! Rule lookup tables.
//!
//! Simple rules map a name to a predicate and the reason appended after the
//! subject on failure. Parameterized rules map a name to a handler that
//! receives the raw argument string and returns the failure message, if any.
//! Adding a built-in rule means adding a table entry; the validator itself
//! never matches on rule names.

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::pattern::PatternCache;
use super::{checks, patterns};
use crate::config::ValidatorConfig;
use crate::subject::Subject;

/// A rule without arguments.
#[derive(Clone, Copy)]
pub(crate) struct SimpleRule {
    pub check: fn(&Subject) -> bool,
    pub reason: &'static str,
}

impl SimpleRule {
    /// Failure message for `subject`, or `None` when it passes.
    pub fn apply(&self, subject: &Subject) -> Option<String> {
        if (self.check)(subject) {
            None
        } else {
            Some(format!("{} {}", subject, self.reason))
        }
    }
}

/// What a parameterized rule may consult besides its subject and argument.
pub(crate) struct RuleContext<'a> {
    pub config: &'a ValidatorConfig,
    pub patterns: &'a mut PatternCache,
}

/// A rule taking the text after the first `:` of its atom.
pub(crate) type ParameterizedRule = fn(&Subject, &str, &mut RuleContext<'_>) -> Option<String>;

lazy_static! {
    static ref SIMPLE_RULES: HashMap<&'static str, SimpleRule> = {
        let entries: [(&'static str, fn(&Subject) -> bool, &'static str); 14] = [
            ("email", checks::email, "is not a valid email"),
            ("string", checks::string_only, "is not a valid string"),
            ("number", checks::number, "is not a valid number"),
            ("float", checks::float, "is not a valid float"),
            ("alpha", checks::alpha, "must contain only letters"),
            ("alphanumeric", checks::alphanumeric, "must be alphanumeric"),
            ("url", checks::url, "is not a valid URL"),
            ("ip", checks::ip, "is not a valid IP address"),
            ("ipv4", checks::ipv4, "is not a valid IPv4 address"),
            ("ipv6", checks::ipv6, "is not a valid IPv6 address"),
            ("json", checks::json, "is not valid JSON"),
            ("date", checks::date, "is not a valid date"),
            ("boolean", checks::boolean, "is not a valid boolean"),
            ("required", checks::required, "is required"),
        ];

        entries
            .into_iter()
            .map(|(name, check, reason)| (name, SimpleRule { check, reason }))
            .collect()
    };

    static ref PARAMETERIZED_RULES: HashMap<&'static str, ParameterizedRule> = {
        let entries: [(&'static str, ParameterizedRule); 7] = [
            ("min", min_rule),
            ("max", max_rule),
            ("between", between_rule),
            ("in", in_rule),
            ("regex", regex_rule),
            ("date", date_rule),
            ("confirmed", confirmed_rule),
        ];

        entries.into_iter().collect()
    };
}

pub(crate) fn simple(name: &str) -> Option<&'static SimpleRule> {
    SIMPLE_RULES.get(name)
}

pub(crate) fn parameterized(name: &str) -> Option<ParameterizedRule> {
    PARAMETERIZED_RULES.get(name).copied()
}

/// Names of the built-in simple rules, sorted.
pub fn simple_rule_names() -> Vec<&'static str> {
    let mut names: Vec<_> = SIMPLE_RULES.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Names of the built-in parameterized rules, sorted.
pub fn parameterized_rule_names() -> Vec<&'static str> {
    let mut names: Vec<_> = PARAMETERIZED_RULES.keys().copied().collect();
    names.sort_unstable();
    names
}

fn min_rule(subject: &Subject, args: &str, _ctx: &mut RuleContext<'_>) -> Option<String> {
    if checks::min_length(subject, patterns::leading_int(args)) {
        None
    } else {
        Some(format!("{} must be at least {} characters", subject, args))
    }
}

fn max_rule(subject: &Subject, args: &str, _ctx: &mut RuleContext<'_>) -> Option<String> {
    if checks::max_length(subject, patterns::leading_int(args)) {
        None
    } else {
        Some(format!("{} must be at most {} characters", subject, args))
    }
}

fn between_rule(subject: &Subject, args: &str, _ctx: &mut RuleContext<'_>) -> Option<String> {
    let bounds: Vec<&str> = args.split(',').collect();
    let [low, high] = bounds.as_slice() else {
        return Some("Invalid between rule format".to_string());
    };

    let min = patterns::leading_float(low.trim());
    let max = patterns::leading_float(high.trim());

    if checks::between(subject, min, max) {
        None
    } else {
        Some(format!("{} must be between {} and {}", subject, min, max))
    }
}

fn in_rule(subject: &Subject, args: &str, _ctx: &mut RuleContext<'_>) -> Option<String> {
    let allowed: Vec<&str> = args.split(',').map(str::trim).collect();

    if checks::one_of(subject, &allowed) {
        None
    } else {
        Some(format!("{} must be one of: {}", subject, allowed.join(", ")))
    }
}

fn regex_rule(subject: &Subject, args: &str, ctx: &mut RuleContext<'_>) -> Option<String> {
    let matched = match ctx.patterns.compile(args, ctx.config.regex_size_limit) {
        Ok(re) => re.is_match(&subject.to_string()),
        Err(e) => {
            tracing::warn!(pattern = %args, error = %e, "Unusable regex pattern, treating as no match");
            false
        }
    };

    if matched {
        None
    } else {
        Some(format!("{} does not match required pattern", subject))
    }
}

fn date_rule(subject: &Subject, args: &str, _ctx: &mut RuleContext<'_>) -> Option<String> {
    if checks::date_with_format(subject, args) {
        None
    } else {
        Some(format!("{} is not a valid date with format {}", subject, args))
    }
}

/// Comparing against a second subject cannot be expressed in a single
/// subject-to-spec entry, so this rule always passes.
fn confirmed_rule(_subject: &Subject, _args: &str, _ctx: &mut RuleContext<'_>) -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(name: &str, subject: &str, args: &str) -> Option<String> {
        let rule = parameterized(name).unwrap();
        let config = ValidatorConfig::default();
        let mut patterns = PatternCache::new();
        let mut ctx = RuleContext {
            config: &config,
            patterns: &mut patterns,
        };
        rule(&Subject::from(subject), args, &mut ctx)
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(simple_rule_names().len(), 14);
        assert_eq!(
            parameterized_rule_names(),
            vec!["between", "confirmed", "date", "in", "max", "min", "regex"]
        );
        assert!(simple("uuid").is_none());
        assert!(parameterized("size").is_none());
    }

    #[test]
    fn test_simple_rule_message() {
        let rule = simple("email").unwrap();
        assert_eq!(
            rule.apply(&Subject::from("invalid-email")).as_deref(),
            Some("invalid-email is not a valid email")
        );
        assert_eq!(rule.apply(&Subject::from("test@example.com")), None);
    }

    #[test]
    fn test_min_max_messages() {
        assert_eq!(run("min", "Hello", "3"), None);
        assert_eq!(
            run("min", "Hi", "3").as_deref(),
            Some("Hi must be at least 3 characters")
        );
        assert_eq!(
            run("max", "Hello World", "5").as_deref(),
            Some("Hello World must be at most 5 characters")
        );
    }

    #[test]
    fn test_min_with_garbage_argument() {
        // Unparsable lengths count as zero.
        assert_eq!(run("min", "", "abc"), None);
    }

    #[test]
    fn test_between_messages() {
        assert_eq!(run("between", "25", "18,65"), None);
        assert_eq!(run("between", "25", " 18 , 65 "), None);
        assert_eq!(
            run("between", "999", "0,100").as_deref(),
            Some("999 must be between 0 and 100")
        );
        assert_eq!(
            run("between", "1", "1.5,2.5").as_deref(),
            Some("1 must be between 1.5 and 2.5")
        );
    }

    #[test]
    fn test_between_bad_format() {
        assert_eq!(
            run("between", "5", "1").as_deref(),
            Some("Invalid between rule format")
        );
        assert_eq!(
            run("between", "5", "1,2,3").as_deref(),
            Some("Invalid between rule format")
        );
    }

    #[test]
    fn test_in_messages() {
        assert_eq!(run("in", "active", "active, inactive ,pending"), None);
        assert_eq!(
            run("in", "superuser", "admin,user, guest").as_deref(),
            Some("superuser must be one of: admin, user, guest")
        );
    }

    #[test]
    fn test_regex_rule() {
        assert_eq!(run("regex", "ABC123", "/^[A-Z]{3}[0-9]{3}$/"), None);
        assert_eq!(
            run("regex", "abc123", "/^[A-Z]{3}[0-9]{3}$/").as_deref(),
            Some("abc123 does not match required pattern")
        );
        // Broken patterns never match.
        assert_eq!(
            run("regex", "abc", "no-delimiters").as_deref(),
            Some("abc does not match required pattern")
        );
    }

    #[test]
    fn test_regex_rule_compiles_once() {
        let rule = parameterized("regex").unwrap();
        let config = ValidatorConfig::default();
        let mut patterns = PatternCache::new();
        let mut ctx = RuleContext {
            config: &config,
            patterns: &mut patterns,
        };

        for code in ["ABC123", "XYZ789", "abc000"] {
            rule(&Subject::from(code), "/^[A-Z]{3}[0-9]{3}$/", &mut ctx);
        }
        assert_eq!(patterns.len(), 1);
    }

    #[test]
    fn test_date_rule() {
        assert_eq!(run("date", "25/12/2023", "d/m/Y"), None);
        assert_eq!(
            run("date", "2023-12-25", "d/m/Y").as_deref(),
            Some("2023-12-25 is not a valid date with format d/m/Y")
        );
    }

    #[test]
    fn test_confirmed_is_noop() {
        assert_eq!(run("confirmed", "anything", "password_confirmation"), None);
        assert_eq!(run("confirmed", "", ""), None);
    }
}
