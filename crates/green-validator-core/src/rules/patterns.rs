//! Shared regex patterns for the built-in rules.
//!
//! Every pattern is anchored at both ends: rules test whole values, never
//! search inside them.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // =========================================================================
    // CHARACTER CLASS PATTERNS
    // =========================================================================

    /// Letters, digits and spaces (the `string` rule).
    pub static ref STRING_PATTERN: Regex = Regex::new(r"^[a-zA-Z0-9 ]+$").unwrap();

    /// Letters and spaces (the `alpha` rule).
    pub static ref ALPHA_PATTERN: Regex = Regex::new(r"^[a-zA-Z ]+$").unwrap();

    /// Letters and digits, no spaces (the `alphanumeric` rule).
    pub static ref ALPHANUMERIC_PATTERN: Regex = Regex::new(r"^[a-zA-Z0-9]+$").unwrap();

    /// Non-negative integer literal (the `number` rule).
    pub static ref DIGITS_PATTERN: Regex = Regex::new(r"^[0-9]+$").unwrap();

    // =========================================================================
    // NUMERIC PATTERNS
    // =========================================================================

    /// Decimal number with optional sign, fraction and exponent.
    pub static ref NUMERIC_PATTERN: Regex = Regex::new(
        r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$"
    ).unwrap();

    /// Longest numeric prefix, used for lenient argument parsing.
    pub static ref NUMERIC_PREFIX_PATTERN: Regex = Regex::new(
        r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?"
    ).unwrap();

    /// Longest integer prefix, used for lenient argument parsing.
    pub static ref INTEGER_PREFIX_PATTERN: Regex = Regex::new(r"^[+-]?[0-9]+").unwrap();

    // =========================================================================
    // ADDRESS PATTERNS
    // =========================================================================

    /// Email address: dot-atom local part, dotted hostname domain.
    pub static ref EMAIL_PATTERN: Regex = Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$"
    ).unwrap();
}

/// Longest local part an email address may carry.
pub const EMAIL_LOCAL_PART_MAX: usize = 64;

/// Check if content is made of letters, digits and spaces.
pub fn is_string_only(content: &str) -> bool {
    STRING_PATTERN.is_match(content)
}

/// Check if content is made of letters and spaces.
pub fn is_alpha(content: &str) -> bool {
    ALPHA_PATTERN.is_match(content)
}

/// Check if content is made of letters and digits.
pub fn is_alphanumeric(content: &str) -> bool {
    ALPHANUMERIC_PATTERN.is_match(content)
}

/// Check if content is a plain run of digits.
pub fn is_digits(content: &str) -> bool {
    DIGITS_PATTERN.is_match(content)
}

/// Check if content is a well-formed email address.
pub fn is_email(content: &str) -> bool {
    let local_ok = content
        .split_once('@')
        .is_some_and(|(local, _)| local.len() <= EMAIL_LOCAL_PART_MAX);

    local_ok && EMAIL_PATTERN.is_match(content)
}

/// Parse the integer at the start of `content`, or 0.
///
/// Leading whitespace is skipped and anything after the digits is ignored,
/// so `"6"`, `" 6"` and `"6px"` all give 6. Out-of-range values saturate.
pub fn leading_int(content: &str) -> i64 {
    let trimmed = content.trim_start();
    match INTEGER_PREFIX_PATTERN.find(trimmed) {
        Some(m) => {
            let digits = m.as_str();
            digits.parse().unwrap_or(if digits.starts_with('-') {
                i64::MIN
            } else {
                i64::MAX
            })
        }
        None => 0,
    }
}

/// Parse the number at the start of `content`, or 0.0.
pub fn leading_float(content: &str) -> f64 {
    let trimmed = content.trim_start();
    NUMERIC_PREFIX_PATTERN
        .find(trimmed)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0)
}
