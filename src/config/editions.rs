use std::fmt;

use crate::scraping::normalize::fold_equals;

pub const BASE_URL: &str = "https://veselicetvrtak.com";
pub const DEFAULT_EDITION_SLUG: &str = "zagor-redovna-serija";

/// Fallback publisher when the detail page does not name one.
pub const DEFAULT_PUBLISHER: &str = "Veseli Četvrtak";

/// One publication line of the catalog: a stable slug, a display name and
/// the grid URL its issues are listed on.
#[derive(Debug, Clone, Copy)]
pub struct Edition {
    pub slug: &'static str,
    pub name: &'static str,
    pub list_url: &'static str,
}

pub const EDITIONS: &[Edition] = &[
    Edition {
        slug: "zagor-redovna-serija",
        name: "Zagor - redovna serija",
        list_url: "https://veselicetvrtak.com/izdanja/?filter_edicija=zagor-redovna-serija&per_page=12",
    },
    Edition {
        slug: "zagor-odabrane-price",
        name: "Zagor - odabrane price",
        list_url: "https://veselicetvrtak.com/izdanja/?filter_edicija=zagor-odabrane-price&per_page=12",
    },
    Edition {
        slug: "zagor-specijal",
        name: "Zagor - specijal",
        list_url: "https://veselicetvrtak.com/izdanja/?filter_edicija=zagor-specijal&per_page=12",
    },
    Edition {
        slug: "zagor-biblioteka",
        name: "Zagor - biblioteka",
        list_url: "https://veselicetvrtak.com/izdanja/?filter_edicija=biblioteka-zagor&per_page=12",
    },
    Edition {
        slug: "zagor-ciko",
        name: "Zagor - Ciko",
        list_url: "https://veselicetvrtak.com/izdanja/?filter_edicija=ciko&per_page=12",
    },
    Edition {
        slug: "marti-redovna-serija",
        name: "Marti Misterija - redovna serija",
        list_url: "https://veselicetvrtak.com/izdanja/?filter_edicija=marti-misterija-redovna-serija&per_page=12",
    },
    Edition {
        slug: "marti-biblioteka",
        name: "Marti Misterija - biblioteka",
        list_url: "https://veselicetvrtak.com/izdanja/?filter_edicija=biblioteka-marti-misterija&per_page=12",
    },
    Edition {
        slug: "dilan-dog-redovna-serija",
        name: "Dilan Dog - redovna serija",
        list_url: "https://veselicetvrtak.com/izdanja/?filter_edicija=dilan-dog-redovna-serija&per_page=12",
    },
    Edition {
        slug: "dilan-dog-super-book",
        name: "Dilan Dog - Super Book",
        list_url: "https://veselicetvrtak.com/izdanja/?filter_edicija=dilan-dog-super-book&per_page=12",
    },
    Edition {
        slug: "dilan-dog-planeta-mrtvih",
        name: "Dilan Dog - Planeta mrtvih",
        list_url: "https://veselicetvrtak.com/izdanja/?filter_edicija=dilan-dog-planeta-mrtvih&per_page=12",
    },
    Edition {
        slug: "dilan-dog-biblioteka",
        name: "Dilan Dog - Biblioteka",
        list_url: "https://veselicetvrtak.com/izdanja/?filter_edicija=biblioteka-dilan-dog&per_page=12",
    },
    Edition {
        slug: "dilan-dog-predstavlja",
        name: "Dilan Dog predstavlja - Price iz nekog drugog sutra",
        list_url: "https://veselicetvrtak.com/katalog/dilan-dog/dilan-dog-predstavlja-price-iz-nekog-drugog-sutra?per_page=12",
    },
    Edition {
        slug: "biblioteka-obojeni-program",
        name: "Biblioteka - Obojeni program",
        list_url: "https://veselicetvrtak.com/izdanja/?filter_edicija=biblioteka-obojeni-program&per_page=12",
    },
    Edition {
        slug: "zlatna-serija",
        name: "Nova Zlatna Serija",
        list_url: "https://veselicetvrtak.com/izdanja/?filter_edicija=zlatna-serija&per_page=12",
    },
];

/// A caller named an edition the catalog does not know. Reported as user
/// input validation, before any network or database work happens.
#[derive(Debug)]
pub struct UnknownEdition(pub String);

impl fmt::Display for UnknownEdition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown edition: {}", self.0)
    }
}

impl std::error::Error for UnknownEdition {}

/// Matches a slug exactly, or a display name case/diacritic-insensitively.
pub fn match_edition(value: &str) -> Option<&'static Edition> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    EDITIONS
        .iter()
        .find(|e| e.slug == value)
        .or_else(|| EDITIONS.iter().find(|e| fold_equals(e.name, value)))
}

/// Empty input falls back to the default edition; anything else must name
/// a known edition.
pub fn resolve_edition_with_default(value: Option<&str>) -> Result<&'static Edition, UnknownEdition> {
    match value.map(str::trim) {
        None | Some("") => Ok(default_edition()),
        Some(v) => match_edition(v).ok_or_else(|| UnknownEdition(v.to_string())),
    }
}

/// None stays None (no filter); a non-empty value must name a known
/// edition; whitespace-only input is also no filter.
pub fn resolve_optional_edition(
    value: Option<&str>,
) -> Result<Option<&'static Edition>, UnknownEdition> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => match_edition(v)
            .map(Some)
            .ok_or_else(|| UnknownEdition(v.to_string())),
    }
}

pub fn default_edition() -> &'static Edition {
    EDITIONS
        .iter()
        .find(|e| e.slug == DEFAULT_EDITION_SLUG)
        .unwrap_or(&EDITIONS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_by_slug_and_by_folded_name() {
        assert_eq!(match_edition("zagor-specijal").unwrap().name, "Zagor - specijal");
        assert_eq!(
            match_edition("ZAGOR - SPECIJAL").unwrap().slug,
            "zagor-specijal"
        );
        assert!(match_edition("nepostojeca edicija").is_none());
        assert!(match_edition("   ").is_none());
    }

    #[test]
    fn empty_input_resolves_to_default() {
        assert_eq!(
            resolve_edition_with_default(None).unwrap().slug,
            DEFAULT_EDITION_SLUG
        );
        assert_eq!(
            resolve_edition_with_default(Some("  ")).unwrap().slug,
            DEFAULT_EDITION_SLUG
        );
    }

    #[test]
    fn unknown_edition_is_a_validation_error() {
        let err = resolve_edition_with_default(Some("Teks Viler")).unwrap_err();
        assert!(err.to_string().contains("Teks Viler"));
        assert!(resolve_optional_edition(Some("Teks Viler")).is_err());
    }

    #[test]
    fn optional_resolution_passes_none_through() {
        assert!(resolve_optional_edition(None).unwrap().is_none());
        assert_eq!(
            resolve_optional_edition(Some("zlatna-serija"))
                .unwrap()
                .unwrap()
                .name,
            "Nova Zlatna Serija"
        );
    }
}
