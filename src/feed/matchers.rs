use crate::scraping::normalize::fold;

/// Maps a display series name to the keywords that identify it in feed
/// titles. Kept as an ordered list: the first matching series wins, so
/// iteration order is significant and caller-controlled.
#[derive(Debug, Clone)]
pub struct SeriesMatcher {
    pub name: String,
    pub keywords: Vec<String>,
}

/// The series followed by default, with both the original and the
/// localized spellings as keywords.
pub fn default_series() -> Vec<SeriesMatcher> {
    [
        ("Dylan Dog", &["dylan dog", "dilan dog"][..]),
        ("Martin Mystere", &["martin mystere", "marti misterija"][..]),
        ("Zagor", &["zagor"][..]),
    ]
    .into_iter()
    .map(|(name, keywords)| SeriesMatcher {
        name: name.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    })
    .collect()
}

/// Builds matchers from caller-supplied series names; each name matches
/// its own folded form.
pub fn from_overrides(names: &[String]) -> Vec<SeriesMatcher> {
    names
        .iter()
        .map(|name| SeriesMatcher {
            name: name.clone(),
            keywords: vec![fold(name)],
        })
        .collect()
}

/// Substring match against the folded title; first matching series wins.
pub fn match_series<'a>(matchers: &'a [SeriesMatcher], title: &str) -> Option<&'a str> {
    let folded = fold(title);
    matchers
        .iter()
        .find(|m| m.keywords.iter().any(|k| folded.contains(k.as_str())))
        .map(|m| m.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_are_diacritic_insensitive() {
        let matchers = default_series();
        assert_eq!(
            match_series(&matchers, "Martin Mystère 400: Ritorno"),
            Some("Martin Mystere")
        );
    }

    #[test]
    fn first_matching_series_wins() {
        let matchers = vec![
            SeriesMatcher {
                name: "A".to_string(),
                keywords: vec!["zagor".to_string()],
            },
            SeriesMatcher {
                name: "B".to_string(),
                keywords: vec!["zagor".to_string()],
            },
        ];
        assert_eq!(match_series(&matchers, "Zagor 700"), Some("A"));
    }

    #[test]
    fn unmatched_titles_yield_none() {
        let matchers = default_series();
        assert_eq!(match_series(&matchers, "Tex 700"), None);
    }

    #[test]
    fn overrides_match_their_own_folded_name() {
        let matchers = from_overrides(&["Čiko".to_string()]);
        assert_eq!(match_series(&matchers, "CIKO specijal 3"), Some("Čiko"));
    }
}
