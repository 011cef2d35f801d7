use std::collections::HashMap;

use anyhow::Result;
use scraper::{Html, Selector};
use url::Url;

use crate::scraping::fetch::HttpClient;
use crate::scraping::normalize::{clean_text, has_alpha};
use crate::utilities::paged_url::with_page;

/// One entry discovered on a listing page: a guessed title and the
/// absolute detail-page URL.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub title: String,
    pub url: String,
}

/// Accepts only `/izdanja/<slug>/` style URLs, which is what detail pages
/// look like. Pagination links, filter queries and everything else on the
/// grid are rejected.
pub fn is_issue_detail_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    if parsed.query().is_some() {
        return false;
    }
    let segments: Vec<&str> = parsed
        .path()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    if segments.len() < 2 || segments[0] != "izdanja" {
        return false;
    }
    if segments[1].eq_ignore_ascii_case("page") {
        return false;
    }
    true
}

/// Extracts de-duplicated (title, url) candidates from one listing page.
///
/// The title is guessed from the link text, its `title`/`aria-label`
/// attributes or a nested image's `title`/`alt`, preferring the longest
/// guess that contains at least one letter. On a duplicate URL the
/// first-seen ordering is kept but the longer title wins.
pub fn extract_candidates(html: &str, base_url: &str) -> Vec<Candidate> {
    let document = Html::parse_document(html);
    let anchor_selector = Selector::parse("a[href]").unwrap();
    let img_selector = Selector::parse("img").unwrap();
    let base = Url::parse(base_url).ok();

    let mut seen: HashMap<String, String> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for anchor in document.select(&anchor_selector) {
        let Some(raw_href) = anchor.value().attr("href") else {
            continue;
        };
        let href = match &base {
            Some(base) => match base.join(raw_href) {
                Ok(joined) => joined.to_string(),
                Err(_) => continue,
            },
            None => raw_href.to_string(),
        };
        if !is_issue_detail_url(&href) {
            continue;
        }

        let mut guesses: Vec<String> = Vec::new();
        guesses.push(clean_text(&anchor.text().collect::<Vec<_>>().join(" ")));
        for attr in ["title", "aria-label"] {
            if let Some(value) = anchor.value().attr(attr) {
                guesses.push(clean_text(value));
            }
        }
        if let Some(img) = anchor.select(&img_selector).next() {
            for attr in ["title", "alt"] {
                if let Some(value) = img.value().attr(attr) {
                    guesses.push(clean_text(value));
                }
            }
        }
        let title = guesses
            .into_iter()
            .filter(|g| has_alpha(g))
            .max_by_key(String::len)
            .unwrap_or_default();

        match seen.get_mut(&href) {
            None => {
                seen.insert(href.clone(), title);
                order.push(href);
            }
            Some(existing) => {
                if !title.is_empty() && title.len() > existing.len() {
                    *existing = title;
                }
            }
        }
    }

    order
        .into_iter()
        .map(|url| Candidate {
            title: seen[&url].clone(),
            url,
        })
        .collect()
}

/// Crawls a paginated listing, page by page, until the configured number of
/// consecutive pages yields nothing new. A page whose fetch fails (after
/// the fetch layer's own retries) aborts the whole crawl.
pub async fn crawl_listing(
    client: &HttpClient,
    list_url: &str,
    base_url: &str,
    max_empty_pages: u32,
) -> Result<Vec<Candidate>> {
    let mut candidates: Vec<Candidate> = Vec::new();
    let mut index_by_url: HashMap<String, usize> = HashMap::new();
    let mut page = 1u32;
    let mut empty_pages = 0u32;

    loop {
        let page_url = with_page(list_url, page);
        let body = client.get_text(&page_url).await?;
        let mut new_on_page = 0usize;

        for candidate in extract_candidates(&body, base_url) {
            match index_by_url.get(&candidate.url) {
                None => {
                    index_by_url.insert(candidate.url.clone(), candidates.len());
                    candidates.push(candidate);
                    new_on_page += 1;
                }
                Some(&i) => {
                    if !candidate.title.is_empty()
                        && candidate.title.len() > candidates[i].title.len()
                    {
                        candidates[i].title = candidate.title;
                    }
                }
            }
        }

        if new_on_page == 0 {
            empty_pages += 1;
            if empty_pages >= max_empty_pages {
                break;
            }
        } else {
            empty_pages = 0;
        }

        page += 1;
        client.pause().await;
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://veselicetvrtak.com";

    #[test]
    fn detail_url_shape_is_enforced() {
        assert!(is_issue_detail_url("https://veselicetvrtak.com/izdanja/zagor-231/"));
        assert!(!is_issue_detail_url(
            "https://veselicetvrtak.com/izdanja/?filter_edicija=zagor-redovna-serija"
        ));
        assert!(!is_issue_detail_url("https://veselicetvrtak.com/izdanja/page/2/"));
        assert!(!is_issue_detail_url("https://veselicetvrtak.com/izdanja/"));
        assert!(!is_issue_detail_url("https://veselicetvrtak.com/katalog/zagor/"));
        assert!(!is_issue_detail_url("not a url"));
    }

    #[test]
    fn listing_yields_only_detail_candidates() {
        let mut html = String::from("<html><body>");
        for i in 1..=12 {
            html.push_str(&format!(
                "<article><a href=\"/izdanja/zagor-{i}/\">Zagor {i}: Naslov {i}</a></article>"
            ));
        }
        // pagination and filter artifacts that must be rejected
        html.push_str("<a href=\"/izdanja/page/2/\">2</a>");
        html.push_str("<a href=\"/izdanja/page/3/\">3</a>");
        html.push_str("<a href=\"/izdanja/?filter_edicija=zagor-specijal\">Filter</a>");
        html.push_str("</body></html>");

        let candidates = extract_candidates(&html, BASE);
        assert_eq!(candidates.len(), 12);
        assert_eq!(candidates[0].url, "https://veselicetvrtak.com/izdanja/zagor-1/");
        assert_eq!(candidates[0].title, "Zagor 1: Naslov 1");
    }

    #[test]
    fn duplicate_url_keeps_first_order_and_longest_title() {
        let html = concat!(
            "<a href=\"/izdanja/zagor-231/\">Zagor 231</a>",
            "<a href=\"/izdanja/drugi/\">Drugi</a>",
            "<a href=\"/izdanja/zagor-231/\">Zagor 231: Osveta bez kraja</a>",
        );
        let candidates = extract_candidates(html, BASE);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].url, "https://veselicetvrtak.com/izdanja/zagor-231/");
        assert_eq!(candidates[0].title, "Zagor 231: Osveta bez kraja");
        assert_eq!(candidates[1].title, "Drugi");
    }

    #[test]
    fn title_falls_back_to_image_attributes() {
        let html = r#"<a href="/izdanja/zagor-232/"><img alt="Zagor 232: Povratak" src="x.jpg"></a>"#;
        let candidates = extract_candidates(html, BASE);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title, "Zagor 232: Povratak");
    }

    #[test]
    fn digit_only_titles_are_dropped() {
        let html = r#"<a href="/izdanja/zagor-233/">233</a>"#;
        let candidates = extract_candidates(html, BASE);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title, "");
    }
}
