//! Field normalization and validation for the check-in form.
//!
//! Everything here is a pure function, total over arbitrary input text. The
//! UI shell runs the formatters on every keystroke; the flow controller runs
//! the validators when a screen tries to advance.

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

fn date_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}-\d{2}-\d{4}$").expect("date pattern compiles"))
}

fn email_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
}

/// Strip to digits only.
pub fn digits_of(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Progressive `MM-DD-YYYY` input mask.
///
/// Strips non-digits, keeps at most 8 digits, and inserts `-` separators as
/// digits accumulate: 1-2 digits plain, 3-4 as `MM-D…`, 5+ as `MM-DD-Y…`.
/// Idempotent: reapplying to its own output is a no-op.
pub fn format_date_input(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).take(8).collect();
    match digits.len() {
        0..=2 => digits,
        3..=4 => format!("{}-{}", &digits[..2], &digits[2..]),
        _ => format!("{}-{}-{}", &digits[..2], &digits[2..4], &digits[4..]),
    }
}

/// Progressive `NNN-NNN-NNNN` input mask (10 digits max).
pub fn format_phone_input(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).take(10).collect();
    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("{}-{}", &digits[..3], &digits[3..]),
        _ => format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}

/// Validate a display-form date of birth (`MM-DD-YYYY`).
///
/// Requires the exact shape, month 1-12, day 1-31, year 1900-2100, and that
/// the triple names a real calendar date. The last check constructs the date
/// and compares the parts back, which rejects day-of-month overflow like
/// `02-30-2024`.
pub fn is_valid_date(text: &str) -> bool {
    if !date_shape().is_match(text) {
        return false;
    }
    let mut parts = text.split('-');
    let (Some(mm), Some(dd), Some(yyyy)) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    let (Ok(month), Ok(day), Ok(year)) =
        (mm.parse::<u32>(), dd.parse::<u32>(), yyyy.parse::<i32>())
    else {
        return false;
    };
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) || !(1900..=2100).contains(&year) {
        return false;
    }
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date.year() == year && date.month() == month && date.day() == day,
        None => false,
    }
}

/// Shape-only email check: non-whitespace local part, `@`, and a domain
/// containing at least one dot. Not a deliverability check.
pub fn is_valid_email(text: &str) -> bool {
    email_shape().is_match(text)
}

/// Reorder display `MM-DD-YYYY` into canonical `YYYY-MM-DD`.
///
/// Returns `None` unless the input splits into exactly three `-` parts.
pub fn to_canonical_date(display: &str) -> Option<String> {
    let parts: Vec<&str> = display.split('-').collect();
    if parts.len() != 3 {
        return None;
    }
    Some(format!("{}-{}-{}", parts[2], parts[0], parts[1]))
}

/// Reorder canonical `YYYY-MM-DD` back into display `MM-DD-YYYY`.
pub fn to_display_date(canonical: &str) -> Option<String> {
    let parts: Vec<&str> = canonical.split('-').collect();
    if parts.len() != 3 {
        return None;
    }
    Some(format!("{}-{}-{}", parts[1], parts[2], parts[0]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn date_mask_grows_with_digit_count() {
        assert_eq!(format_date_input(""), "");
        assert_eq!(format_date_input("0"), "0");
        assert_eq!(format_date_input("02"), "02");
        assert_eq!(format_date_input("020"), "02-0");
        assert_eq!(format_date_input("0203"), "02-03");
        assert_eq!(format_date_input("02031"), "02-03-1");
        assert_eq!(format_date_input("02031990"), "02-03-1990");
    }

    #[test]
    fn date_mask_strips_junk_and_truncates() {
        assert_eq!(format_date_input("02/03/1990"), "02-03-1990");
        assert_eq!(format_date_input("0203199055"), "02-03-1990");
        assert_eq!(format_date_input("ab"), "");
    }

    #[test]
    fn phone_mask_grows_with_digit_count() {
        assert_eq!(format_phone_input("555"), "555");
        assert_eq!(format_phone_input("5551"), "555-1");
        assert_eq!(format_phone_input("5551234"), "555-123-4");
        assert_eq!(format_phone_input("5551234567"), "555-123-4567");
        assert_eq!(format_phone_input("(555) 123-4567 x9"), "555-123-4567");
    }

    #[test]
    fn date_validation_requires_real_calendar_dates() {
        assert!(is_valid_date("02-29-2024"));
        assert!(!is_valid_date("02-30-2024"));
        assert!(!is_valid_date("02-29-2023"));
        assert!(is_valid_date("12-31-1900"));
        assert!(!is_valid_date("13-01-2000"));
        assert!(!is_valid_date("00-10-2000"));
        assert!(!is_valid_date("01-00-2000"));
        assert!(!is_valid_date("01-01-1899"));
        assert!(!is_valid_date("01-01-2101"));
        assert!(!is_valid_date("1-1-2000"));
        assert!(!is_valid_date("01-01-2000 "));
        assert!(!is_valid_date(""));
    }

    #[test]
    fn email_validation_is_shape_only() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last+tag@sub.domain.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("@c.com"));
        assert!(!is_valid_email("a@"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn canonical_reorder_round_trips() {
        assert_eq!(to_canonical_date("02-29-2024").as_deref(), Some("2024-02-29"));
        assert_eq!(to_display_date("2024-02-29").as_deref(), Some("02-29-2024"));
        assert_eq!(to_canonical_date("02-1990"), None);
        assert_eq!(to_canonical_date("02031990"), None);
        assert_eq!(to_display_date("1990"), None);
    }

    #[test]
    fn digits_of_strips_formatting() {
        assert_eq!(digits_of("555-123-4567"), "5551234567");
        assert_eq!(digits_of("(555) 123 4567"), "5551234567");
        assert_eq!(digits_of("none"), "");
    }

    proptest! {
        #[test]
        fn date_formatter_is_idempotent(raw in ".*") {
            let once = format_date_input(&raw);
            prop_assert_eq!(format_date_input(&once), once);
        }

        #[test]
        fn phone_formatter_is_idempotent(raw in ".*") {
            let once = format_phone_input(&raw);
            prop_assert_eq!(format_phone_input(&once), once);
        }

        #[test]
        fn date_mask_preserves_digits(digits in "[0-9]{0,8}") {
            let masked = format_date_input(&digits);
            prop_assert_eq!(digits_of(&masked), digits);
        }

        #[test]
        fn phone_mask_preserves_digits(digits in "[0-9]{0,10}") {
            let masked = format_phone_input(&digits);
            prop_assert_eq!(digits_of(&masked), digits);
        }

        #[test]
        fn display_round_trip_is_lossless(
            year in 1900i32..=2100,
            month in 1u32..=12,
            day in 1u32..=28,
        ) {
            let canonical = format!("{year:04}-{month:02}-{day:02}");
            let display = to_display_date(&canonical).expect("three parts");
            prop_assert!(is_valid_date(&display));
            prop_assert_eq!(to_canonical_date(&display), Some(canonical));
        }
    }
}
