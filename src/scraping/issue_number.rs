use regex::Regex;

/// Canonicalizes an issue designator: digit strings lose leading zeros,
/// a literal zero means "absent", anything else passes through untouched.
pub fn normalize_issue_number(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if value.chars().all(|c| c.is_ascii_digit()) {
        let stripped = value.trim_start_matches('0');
        if stripped.is_empty() {
            // "0" (and "000") mark an absent number
            return None;
        }
        return Some(stripped.to_string());
    }
    Some(value.to_string())
}

/// Pulls an issue number out of free text.
///
/// Tries, in order: a number following an abbreviation marker ("br.", "n.",
/// "#"), then the last 1-4 digit run that is not a percentage badge or a
/// negative offset ("-30%" style discount labels must not win).
pub fn extract_issue_number(text: &str) -> Option<String> {
    let marker = Regex::new(r"(?i)(?:\bbr\.?|\bn\.|#)\s*(\d{1,4})").unwrap();
    if let Some(caps) = marker.captures(text) {
        return normalize_issue_number(&caps[1]);
    }

    let digits = Regex::new(r"\d+").unwrap();
    let mut last: Option<&str> = None;
    for m in digits.find_iter(text) {
        if m.as_str().len() > 4 {
            continue;
        }
        let preceded_by_badge = text[..m.start()]
            .chars()
            .next_back()
            .map(|c| c == '%' || c == '-')
            .unwrap_or(false);
        if preceded_by_badge {
            continue;
        }
        last = Some(m.as_str());
    }
    last.and_then(normalize_issue_number)
}

/// Best-effort split of a listing-card title into (title, issue number).
/// The title is kept verbatim (trimmed); the number is a guess.
pub fn parse_title_and_number(raw_title: &str) -> (String, Option<String>) {
    let title = raw_title.trim().to_string();
    if title.is_empty() {
        return (title, None);
    }
    let number = extract_issue_number(&title);
    (title, number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_leading_zeros() {
        assert_eq!(normalize_issue_number("007"), Some("7".to_string()));
        assert_eq!(normalize_issue_number(" 231 "), Some("231".to_string()));
    }

    #[test]
    fn normalize_treats_zero_as_absent() {
        assert_eq!(normalize_issue_number("0"), None);
        assert_eq!(normalize_issue_number("000"), None);
        assert_eq!(normalize_issue_number(""), None);
        assert_eq!(normalize_issue_number("   "), None);
    }

    #[test]
    fn normalize_passes_free_text_through() {
        assert_eq!(normalize_issue_number("123abc"), Some("123abc".to_string()));
        assert_eq!(normalize_issue_number("specijal"), Some("specijal".to_string()));
    }

    #[test]
    fn normalize_is_idempotent() {
        for s in ["007", "231", "123abc", "0", ""] {
            let once = normalize_issue_number(s);
            let twice = once.as_deref().and_then(normalize_issue_number);
            assert_eq!(twice, once);
        }
    }

    #[test]
    fn extract_prefers_marker_numbers() {
        assert_eq!(extract_issue_number("br. 123"), Some("123".to_string()));
        assert_eq!(extract_issue_number("Zagor #45: Naslov"), Some("45".to_string()));
        assert_eq!(extract_issue_number("n. 700 Tex"), Some("700".to_string()));
    }

    #[test]
    fn extract_skips_discount_badges() {
        // "-30%" must not be read as issue 30
        assert_eq!(
            extract_issue_number("Zagor 231 akcija -30%"),
            Some("231".to_string())
        );
        assert_eq!(extract_issue_number("-30%"), None);
    }

    #[test]
    fn extract_takes_last_plain_number() {
        assert_eq!(extract_issue_number("Zlatna serija 12, Zagor 231"), Some("231".to_string()));
        assert_eq!(extract_issue_number("nema broja"), None);
        // five-digit runs are not issue numbers
        assert_eq!(extract_issue_number("ISBN 86123"), None);
    }

    #[test]
    fn parse_title_keeps_raw_title() {
        let (title, number) = parse_title_and_number("  Zagor 231: Osveta bez kraja ");
        assert_eq!(title, "Zagor 231: Osveta bez kraja");
        assert_eq!(number, Some("231".to_string()));
    }
}
