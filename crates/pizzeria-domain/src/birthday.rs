//! Birthday promotion eligibility.

use chrono::{Datelike, NaiveDate};

/// Date format accepted for customer birth dates.
pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

/// True when `today` falls on the month and day of `birth_date`.
///
/// A 29 February birth date only matches in leap years.
pub fn is_birthday(birth_date: NaiveDate, today: NaiveDate) -> bool {
    birth_date.month() == today.month() && birth_date.day() == today.day()
}

/// Parse a `YYYY-MM-DD` birth date.
pub fn parse_birth_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, BIRTH_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn should_match_same_month_and_day_in_any_year() {
        assert!(is_birthday(date(1990, 6, 15), date(2026, 6, 15)));
    }

    #[test]
    fn should_not_match_other_days() {
        assert!(!is_birthday(date(1990, 6, 15), date(2026, 6, 16)));
        assert!(!is_birthday(date(1990, 6, 15), date(2026, 7, 15)));
    }

    #[test]
    fn should_match_leap_day_only_in_leap_years() {
        assert!(is_birthday(date(2000, 2, 29), date(2028, 2, 29)));
        assert!(!is_birthday(date(2000, 2, 29), date(2027, 2, 28)));
    }

    #[test]
    fn should_parse_iso_dates_and_reject_garbage() {
        assert_eq!(parse_birth_date("1999-12-31"), Some(date(1999, 12, 31)));
        assert_eq!(parse_birth_date("31-12-1999"), None);
        assert_eq!(parse_birth_date("1999-02-30"), None);
        assert_eq!(parse_birth_date(""), None);
    }
}
