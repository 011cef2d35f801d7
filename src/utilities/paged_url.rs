use url::Url;

/// Sets (or replaces) one query parameter, leaving the rest of the URL
/// intact. A URL that does not parse is returned unchanged.
pub fn with_query_param(url: &str, key: &str, value: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return url.to_string();
    };
    let mut kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(k, _)| k != key)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    kept.push((key.to_string(), value.to_string()));

    let mut rebuilt = parsed.clone();
    rebuilt
        .query_pairs_mut()
        .clear()
        .extend_pairs(kept.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    rebuilt.to_string()
}

/// Feed pagination: WordPress feeds page with a `paged` query parameter.
/// Page 1 is the bare URL.
pub fn with_paged(url: &str, page: u32) -> String {
    if page <= 1 {
        return url.to_string();
    }
    with_query_param(url, "paged", &page.to_string())
}

/// Listing-archive pagination uses a `page` query parameter.
pub fn with_page(url: &str, page: u32) -> String {
    if page <= 1 {
        return url.to_string();
    }
    with_query_param(url, "page", &page.to_string())
}

/// Overrides the grid page size on a listing URL.
pub fn with_per_page(url: &str, per_page: Option<u32>) -> String {
    match per_page {
        Some(n) => with_query_param(url, "per_page", &n.to_string()),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_parameter_preserving_existing_query() {
        let url = "https://veselicetvrtak.com/izdanja/?filter_edicija=zagor-redovna-serija&per_page=12";
        let paged = with_paged(url, 3);
        assert!(paged.contains("filter_edicija=zagor-redovna-serija"));
        assert!(paged.contains("paged=3"));
    }

    #[test]
    fn replaces_existing_parameter() {
        let url = "https://example.com/?per_page=12";
        let rewritten = with_per_page(url, Some(24));
        assert!(rewritten.contains("per_page=24"));
        assert!(!rewritten.contains("per_page=12"));
    }

    #[test]
    fn page_one_is_the_bare_url() {
        let url = "https://example.com/feed/";
        assert_eq!(with_paged(url, 1), url);
        assert_eq!(with_page(url, 0), url);
    }

    #[test]
    fn unparsable_url_passes_through() {
        assert_eq!(with_paged("not a url", 2), "not a url");
    }
}
