use chrono::NaiveDate;

const DATE_FORMATS: &[&str] = &["%d.%m.%Y", "%Y-%m-%d", "%d.%m.%y"];

/// Parses the date formats seen on publisher pages. Trailing periods and
/// internal whitespace are stripped first, so "23. 10. 2025." becomes
/// "23.10.2025". Returns None instead of an error when nothing matches.
pub fn try_parse_date(raw: &str) -> Option<NaiveDate> {
    let compact: String = raw
        .trim()
        .trim_matches('.')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if compact.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&compact, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_spaced_local_format() {
        assert_eq!(try_parse_date("23. 10. 2025."), Some(date(2025, 10, 23)));
        assert_eq!(try_parse_date("23.10.2025"), Some(date(2025, 10, 23)));
    }

    #[test]
    fn parses_iso_format() {
        assert_eq!(try_parse_date("2025-10-23"), Some(date(2025, 10, 23)));
    }

    #[test]
    fn parses_two_digit_year() {
        assert_eq!(try_parse_date("23.10.25"), Some(date(2025, 10, 23)));
    }

    #[test]
    fn unparsable_input_is_absent_not_fatal() {
        assert_eq!(try_parse_date("not a date"), None);
        assert_eq!(try_parse_date(""), None);
        assert_eq!(try_parse_date("99.99.2025"), None);
    }
}
