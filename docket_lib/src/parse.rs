//! Value parsers applied to located text. Each returns `None` on anything
//! it does not recognise.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use docket_types::types::Precinct;
use regex::Regex;
use rust_decimal::Decimal;

use crate::html::normalize;

static RE_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}:\d{2} [AP]M").expect("invalid regex: hearing time"));

static RE_ZIP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i), tx \d{5}(-\d{4})?").expect("invalid regex: texas zip")
});

static RE_PRECINCT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:precinct|pct\.?)\s*(\w+)(?:\W+place\s*(\w+))?")
        .expect("invalid regex: precinct")
});

static RE_CASE_PRECINCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"J(\d)(\d)$").expect("invalid regex: case number precinct"));

const OFFICER_MARKER: &str = "Judicial Officer";

/// Parses the portal's `MM/DD/YYYY` dates.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let cleaned = normalize(raw);
    NaiveDate::parse_from_str(&cleaned, "%m/%d/%Y").ok()
}

/// Parses currency text such as `$5,163.35` into an exact decimal.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    if !raw.contains('$') {
        return None;
    }
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let digits = digits.trim_matches('.');
    if digits.is_empty() {
        return None;
    }
    Decimal::from_str(digits).ok()
}

/// Number words used in precinct names, or plain digits.
fn precinct_word(word: &str) -> Option<u8> {
    match word.to_ascii_lowercase().as_str() {
        "one" => Some(1),
        "two" => Some(2),
        "three" => Some(3),
        "four" => Some(4),
        "five" => Some(5),
        other => other.parse().ok(),
    }
}

/// "Precinct Two" -> 2. A trailing "Place One" is ignored here.
pub fn parse_precinct_number(text: &str) -> Option<u8> {
    let caps = RE_PRECINCT.captures(text)?;
    precinct_word(&caps[1])
}

/// Precinct with its place, e.g. "Justice of the Peace Pct 1, Place 2".
pub fn parse_precinct_with_place(text: &str) -> Option<Precinct> {
    let caps = RE_PRECINCT.captures(text)?;
    let number = precinct_word(&caps[1])?;
    let place = caps.get(2).and_then(|m| precinct_word(m.as_str()));
    Some(Precinct { number, place })
}

/// Precinct and place from a case number ending in `J<precinct><place>`,
/// e.g. "F21-006J11".
pub fn precinct_from_case_number(case_number: &str) -> Option<Precinct> {
    let caps = RE_CASE_PRECINCT.captures(case_number.trim())?;
    let number = caps[1].parse().ok()?;
    let place = caps[2].parse().ok()?;
    Some(Precinct::with_place(number, place))
}

/// First "H:MM AM" style time in the text.
pub fn parse_time(text: &str) -> Option<String> {
    let text = normalize(text);
    RE_TIME.find(&text).map(|m| m.as_str().to_string())
}

/// Officer name following the "Judicial Officer" marker, without the
/// closing parenthesis.
pub fn parse_officer(text: &str) -> Option<String> {
    let text = normalize(text);
    let (_, name) = text.split_once(OFFICER_MARKER)?;
    let name = name.trim().trim_matches(')').trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Zip code from an address line containing ", TX 78701".
pub fn parse_zip(text: &str) -> Option<String> {
    let text = normalize(text);
    let found = RE_ZIP.find(&text)?;
    found
        .as_str()
        .split_whitespace()
        .last()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(" 05/14/2020\u{a0}"),
            NaiveDate::from_ymd_opt(2020, 5, 14)
        );
        assert_eq!(parse_date("14/05/2020"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$5,163.35"), Some(Decimal::new(516335, 2)));
        assert_eq!(parse_amount("$1,200.00."), Some(Decimal::new(120000, 2)));
        assert_eq!(parse_amount("Comment: 3 days"), None);
        assert_eq!(parse_amount("$"), None);
    }

    #[test]
    fn test_parse_precinct_number() {
        assert_eq!(parse_precinct_number("Precinct One"), Some(1));
        assert_eq!(parse_precinct_number("Precinct Five"), Some(5));
        assert_eq!(parse_precinct_number("Precinct 3"), Some(3));
        assert_eq!(parse_precinct_number("County Court"), None);
    }

    #[test]
    fn test_parse_precinct_with_place() {
        assert_eq!(
            parse_precinct_with_place("Justice of the Peace Pct 1, Place 2"),
            Some(Precinct::with_place(1, 2))
        );
        assert_eq!(
            parse_precinct_with_place("Precinct Three"),
            Some(Precinct::new(3))
        );
    }

    #[test]
    fn test_precinct_from_case_number() {
        assert_eq!(
            precinct_from_case_number("F21-006J11"),
            Some(Precinct::with_place(1, 1))
        );
        assert_eq!(precinct_from_case_number("J1-CV-20-001590"), None);
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(
            parse_time("(11:00 AM) (Judicial Officer Williams, Yvonne M.)").as_deref(),
            Some("11:00 AM")
        );
        assert_eq!(parse_time("\u{a0}(9:30\u{a0}PM)").as_deref(), Some("9:30 PM"));
        assert_eq!(parse_time("no time"), None);
    }

    #[test]
    fn test_parse_officer() {
        assert_eq!(
            parse_officer("(11:00 AM) (Judicial Officer Williams, Yvonne M.)").as_deref(),
            Some("Williams, Yvonne M.")
        );
        assert_eq!(parse_officer("(10:00 AM)"), None);
    }

    #[test]
    fn test_parse_zip() {
        assert_eq!(parse_zip("Austin, TX 78741").as_deref(), Some("78741"));
        assert_eq!(parse_zip("San Marcos, tx 78666-1234").as_deref(), Some("78666-1234"));
        assert_eq!(parse_zip("Austin, TX\u{a0}78745").as_deref(), Some("78745"));
        assert_eq!(parse_zip("Denver, CO 80111"), None);
    }
}
