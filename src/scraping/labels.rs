use regex::Regex;

use crate::scraping::normalize::clean_text;

/// The label synonyms for one extraction target, in the order they are
/// tried. Keeping these as data (rather than ad hoc regexes at each call
/// site) keeps the extraction rules auditable and testable in isolation.
pub struct LabelSpec {
    pub labels: &'static [&'static str],
}

pub const RELEASE_DATE: LabelSpec = LabelSpec {
    labels: &["datum objavljivanja", "datum izdavanja", "datum objave"],
};

pub const ORIGINAL_ISSUE_NUMBER: LabelSpec = LabelSpec {
    labels: &["broj originala", "brojevi originala", "original #", "original broj"],
};

pub const ORIGINAL_TITLE: LabelSpec = LabelSpec {
    labels: &["naslov originala", "naslovi originala", "original naslov", "original title"],
};

/// Labels that terminate a captured value: whatever metadata block follows
/// the one being read. Shared by every label-anchored extraction.
pub const FOLLOWER_LABELS: &[&str] = &[
    "datum objavljivanja",
    "naslovna strana",
    "tekst",
    "crtež",
    "broj originala",
    "brojevi originala",
    "naslov originala",
    "naslovi originala",
    "edicija",
    "izdavač",
];

/// Scans free text for "Label: value", capturing up to the next known
/// follower label, a newline, or the end of the text.
pub fn extract_labeled_value(full_text: &str, spec: &LabelSpec) -> Option<String> {
    let label_re = Regex::new(&format!(r"(?i)\b(?:{})\s*:\s*", alternation(spec.labels))).unwrap();
    let follower_re = Regex::new(&format!(r"(?i)\b(?:{})\s*:", alternation(FOLLOWER_LABELS))).unwrap();

    let start = label_re.find(full_text)?.end();
    let rest = &full_text[start..];

    let mut end = rest.len();
    if let Some(m) = follower_re.find(rest) {
        end = end.min(m.start());
    }
    if let Some(pos) = rest.find('\n') {
        end = end.min(pos);
    }

    let value = clean_text(&rest[..end]);
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Builds a regex alternation from label phrases, with flexible whitespace
/// between words.
fn alternation(labels: &[&str]) -> String {
    labels
        .iter()
        .map(|label| {
            label
                .split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect::<Vec<_>>()
        .join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_TEXT: &str = "Zagor 231\nDatum objavljivanja: 23. 10. 2025. \
Broj originala: 731 Naslov originala: La vendetta senza fine Izdavač: Veseli Četvrtak";

    #[test]
    fn captures_up_to_next_label() {
        assert_eq!(
            extract_labeled_value(PAGE_TEXT, &RELEASE_DATE).as_deref(),
            Some("23. 10. 2025.")
        );
        assert_eq!(
            extract_labeled_value(PAGE_TEXT, &ORIGINAL_ISSUE_NUMBER).as_deref(),
            Some("731")
        );
        assert_eq!(
            extract_labeled_value(PAGE_TEXT, &ORIGINAL_TITLE).as_deref(),
            Some("La vendetta senza fine")
        );
    }

    #[test]
    fn captures_up_to_newline() {
        let text = "Datum objave: 1.2.2024\nostatak opisa";
        assert_eq!(extract_labeled_value(text, &RELEASE_DATE).as_deref(), Some("1.2.2024"));
    }

    #[test]
    fn label_match_is_case_insensitive() {
        let text = "DATUM IZDAVANJA: 05.06.2024.";
        assert_eq!(extract_labeled_value(text, &RELEASE_DATE).as_deref(), Some("05.06.2024."));
    }

    #[test]
    fn missing_label_yields_absent() {
        assert_eq!(extract_labeled_value("nema metapodataka", &RELEASE_DATE), None);
        assert_eq!(extract_labeled_value("Datum objave:   ", &RELEASE_DATE), None);
    }
}
