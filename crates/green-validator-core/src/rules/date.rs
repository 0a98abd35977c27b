//! Date checks with `date()`-style format strings.
//!
//! Formats use single-letter codes (`Y-m-d`, `d/m/Y`, `H:i:s`, ...). A value
//! is a valid date when it parses with the format AND formatting the parsed
//! value with the same format gives back the exact input. The round trip
//! rejects overflowing fields like `2023-13-32` and unpadded fields like
//! `2023-1-5` when the format asks for padding. Fields the format leaves
//! out take fixed defaults, so partial formats such as `m/Y` or `Y-m` work.

use std::fmt::Write;

use chrono::format::{parse, Item, Parsed, StrftimeItems};
use chrono::NaiveDateTime;

/// Format used by the bare `date` rule.
pub const DEFAULT_DATE_FORMAT: &str = "Y-m-d";

/// Translate a `date()`-style format into a chrono strftime format.
///
/// Returns `None` when the format uses a letter with no supported meaning.
pub fn translate_format(format: &str) -> Option<String> {
    let mut out = String::with_capacity(format.len() * 2);
    let mut chars = format.chars();

    while let Some(c) = chars.next() {
        let spec = match c {
            'd' => "%d",
            'j' => "%-d",
            'm' => "%m",
            'n' => "%-m",
            'Y' => "%Y",
            'y' => "%y",
            'H' => "%H",
            'G' => "%-H",
            'h' => "%I",
            'g' => "%-I",
            'i' => "%M",
            's' => "%S",
            'D' => "%a",
            'l' => "%A",
            'M' => "%b",
            'F' => "%B",
            'A' => "%p",
            'a' => "%P",
            '\\' => {
                if let Some(escaped) = chars.next() {
                    push_literal(&mut out, escaped);
                }
                continue;
            }
            other if other.is_ascii_alphabetic() => return None,
            other => {
                push_literal(&mut out, other);
                continue;
            }
        };
        out.push_str(spec);
    }

    Some(out)
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

/// Year assumed when the format has no year field. A leap year, so `m-d`
/// formats accept `02-29`.
const DEFAULT_YEAR: i64 = 2000;

/// Whether the format carries a year letter outside `\\` escapes.
fn has_year_field(format: &str) -> bool {
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            'Y' | 'y' => return true,
            _ => {}
        }
    }
    false
}

/// Fill every field the format left out: year 2000, January, the 1st,
/// midnight. Setters refuse to overwrite a parsed value, so a failed set
/// means the field was already present.
fn fill_missing_fields(parsed: &mut Parsed, has_year: bool) {
    if !has_year {
        let _ = parsed.set_year(DEFAULT_YEAR);
    }
    let _ = parsed.set_month(1);
    let _ = parsed.set_day(1);
    let _ = parsed.set_ampm(false);
    let _ = parsed.set_hour12(12);
    let _ = parsed.set_minute(0);
    let _ = parsed.set_second(0);
}

/// Check that `value` is a date written in `format`.
pub fn is_date(value: &str, format: &str) -> bool {
    let Some(strftime) = translate_format(format) else {
        return false;
    };

    let items: Vec<Item<'_>> = StrftimeItems::new(&strftime).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return false;
    }

    let mut parsed = Parsed::new();
    if parse(&mut parsed, value, items.iter()).is_err() {
        return false;
    }
    fill_missing_fields(&mut parsed, has_year_field(format));

    let (Ok(date), Ok(time)) = (parsed.to_naive_date(), parsed.to_naive_time()) else {
        return false;
    };

    let mut rendered = String::with_capacity(value.len());
    let written = write!(
        rendered,
        "{}",
        NaiveDateTime::new(date, time).format_with_items(items.iter())
    );

    written.is_ok() && rendered == value
}
