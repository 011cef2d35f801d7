use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Collapses runs of whitespace into single spaces and trims the ends.
/// Used for every value that ends up stored or displayed.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercase ASCII approximation used only for matching, never for storage.
/// NFKD-decomposes and drops combining marks, so "Četvrtak" folds to "cetvrtak".
pub fn fold(text: &str) -> String {
    text.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

pub fn has_alpha(text: &str) -> bool {
    text.chars().any(|c| c.is_alphabetic())
}

/// Case- and diacritic-insensitive equality for edition/series names.
pub fn fold_equals(a: &str, b: &str) -> bool {
    fold(a) == fold(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  Osveta \t bez\n kraja  "), "Osveta bez kraja");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn clean_text_is_idempotent() {
        for s in ["", "  a  b ", "Zagor 231: Osveta bez kraja", "x\n\ny"] {
            let once = clean_text(s);
            assert_eq!(clean_text(&once), once);
        }
    }

    #[test]
    fn fold_strips_diacritics_and_lowercases() {
        assert_eq!(fold("Veseli Četvrtak"), "veseli cetvrtak");
        assert_eq!(fold("Martin Mystère"), "martin mystere");
        assert_eq!(fold("IZDAVAČ"), "izdavac");
    }

    #[test]
    fn fold_is_idempotent() {
        for s in ["Četvrtak", "mystère", "plain ascii"] {
            let once = fold(s);
            assert_eq!(fold(&once), once);
        }
    }

    #[test]
    fn fold_equals_ignores_case_and_diacritics() {
        assert!(fold_equals("Zagor - specijal", "ZAGOR - SPECIJAL"));
        assert!(fold_equals("Veseli Četvrtak", "veseli cetvrtak"));
        assert!(!fold_equals("Zagor", "Tex"));
    }

    #[test]
    fn has_alpha_rejects_digit_only_titles() {
        assert!(!has_alpha("231"));
        assert!(!has_alpha("-30%"));
        assert!(has_alpha("Zagor 231"));
    }
}
