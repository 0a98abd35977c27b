//! Built-in predicates.
//!
//! Each predicate answers one question about a [`Subject`] and never fails:
//! inputs that cannot be checked simply do not pass. The rule tables in
//! [`super::table`] wire these predicates to rule names and messages.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use serde::de::IgnoredAny;
use url::Url;

use super::date;
use super::patterns;
use crate::subject::{is_ascii_space, Subject};

/// Schemes that only make sense with a host part.
const HOST_SCHEMES: &[&str] = &["http", "https", "ftp", "ws", "wss"];

/// Characters trimmed before the emptiness test of `required`.
const REQUIRED_TRIM: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Boolean spellings accepted by `boolean`, compared case-insensitively.
const BOOLEAN_WORDS: &[&str] = &["true", "false", "1", "0"];

pub fn email(subject: &Subject) -> bool {
    patterns::is_email(&subject.to_string())
}

/// Letters, digits and spaces only.
pub fn string_only(subject: &Subject) -> bool {
    patterns::is_string_only(&subject.to_string())
}

/// Numeric and written as a plain run of digits.
pub fn number(subject: &Subject) -> bool {
    subject.is_numeric() && patterns::is_digits(&subject.to_string())
}

/// Integers count as floats.
pub fn float(subject: &Subject) -> bool {
    match subject {
        Subject::Int(_) => true,
        Subject::Float(value) => value.is_finite(),
        Subject::Null | Subject::List(_) => false,
        other => patterns::NUMERIC_PATTERN.is_match(other.to_string().trim_matches(is_ascii_space)),
    }
}

pub fn alpha(subject: &Subject) -> bool {
    patterns::is_alpha(&subject.to_string())
}

pub fn alphanumeric(subject: &Subject) -> bool {
    patterns::is_alphanumeric(&subject.to_string())
}

/// Absolute URL with a scheme, and a host where the scheme needs one.
///
/// The URL parser repairs `http:host`, `http:/host` and backslashes, so
/// host schemes must be written with a literal `scheme://` and backslashes
/// are rejected before parsing.
pub fn url(subject: &Subject) -> bool {
    let text = subject.to_string();
    if text.is_empty() || text.contains('\\') || text.chars().any(char::is_whitespace) {
        return false;
    }

    let parsed = match Url::parse(&text) {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };

    if !HOST_SCHEMES.contains(&parsed.scheme()) {
        return true;
    }

    let authority_written = text
        .split_once(':')
        .is_some_and(|(_, rest)| rest.starts_with("//"));

    authority_written && parsed.host_str().is_some_and(|host| !host.is_empty())
}

pub fn ip(subject: &Subject) -> bool {
    subject.to_string().parse::<IpAddr>().is_ok()
}

pub fn ipv4(subject: &Subject) -> bool {
    subject.to_string().parse::<Ipv4Addr>().is_ok()
}

pub fn ipv6(subject: &Subject) -> bool {
    subject.to_string().parse::<Ipv6Addr>().is_ok()
}

/// Only strings can hold JSON documents.
pub fn json(subject: &Subject) -> bool {
    subject
        .as_text()
        .is_some_and(|text| serde_json::from_str::<IgnoredAny>(text).is_ok())
}

/// A date in the default `Y-m-d` format.
pub fn date(subject: &Subject) -> bool {
    date_with_format(subject, date::DEFAULT_DATE_FORMAT)
}

pub fn date_with_format(subject: &Subject, format: &str) -> bool {
    subject
        .as_text()
        .is_some_and(|text| date::is_date(text, format))
}

pub fn boolean(subject: &Subject) -> bool {
    match subject {
        Subject::Bool(_) => true,
        Subject::Int(value) => *value == 0 || *value == 1,
        Subject::Float(value) => *value == 0.0 || *value == 1.0,
        Subject::Text(text) => {
            let word = text.trim_matches(is_ascii_space);
            BOOLEAN_WORDS
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(word))
        }
        _ => false,
    }
}

/// Present and not blank. `false`, `0` and `"0"` are present.
pub fn required(subject: &Subject) -> bool {
    match subject {
        Subject::Null => false,
        Subject::Text(text) => !text.trim_matches(REQUIRED_TRIM).is_empty(),
        Subject::List(items) => !items.is_empty(),
        _ => true,
    }
}

/// Byte length of the string form is at least `min`.
pub fn min_length(subject: &Subject, min: i64) -> bool {
    byte_len(subject) >= min
}

/// Byte length of the string form is at most `max`.
pub fn max_length(subject: &Subject, max: i64) -> bool {
    byte_len(subject) <= max
}

fn byte_len(subject: &Subject) -> i64 {
    i64::try_from(subject.to_string().len()).unwrap_or(i64::MAX)
}

/// Numeric and inside `[min, max]`, both ends inclusive.
pub fn between(subject: &Subject, min: f64, max: f64) -> bool {
    subject
        .as_f64()
        .is_some_and(|value| value >= min && value <= max)
}

/// Strictly equal to one of `allowed`. Only text can equal a list element.
pub fn one_of<S: AsRef<str>>(subject: &Subject, allowed: &[S]) -> bool {
    subject
        .as_text()
        .is_some_and(|text| allowed.iter().any(|candidate| candidate.as_ref() == text))
}

/// Strict equality of two subjects (a value and its confirmation).
pub fn confirmed(subject: &Subject, confirmation: &Subject) -> bool {
    subject == confirmation
}
