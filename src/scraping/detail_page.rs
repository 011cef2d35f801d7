use anyhow::Result;
use chrono::NaiveDate;
use regex::Regex;
use scraper::{Html, Selector};

use crate::scraping::extract_field_by_label::{extract_field_by_label, page_text};
use crate::scraping::fetch::HttpClient;
use crate::scraping::issue_number::{extract_issue_number, normalize_issue_number};
use crate::scraping::labels;
use crate::scraping::normalize::clean_text;
use crate::scraping::parse_date::try_parse_date;

const HEADING_SELECTORS: &str = "h1.entry-title, h1.elementor-heading-title, article h1, h1";
const DESCRIPTION_SELECTORS: &str =
    ".entry-content, .post-content, article .content, .post-entry, .elementor-widget-theme-post-content";

/// Everything extractable from one detail page. The caller supplies the
/// URL; every field degrades independently to absent or a fallback. The
/// edition always carries a value: pages without an `Edicija` label get
/// the caller's edition name, never some other line's.
#[derive(Debug, Clone)]
pub struct IssueDetails {
    pub title: String,
    pub issue_number: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub original_issue_number: Option<String>,
    pub original_title: Option<String>,
    pub publisher: Option<String>,
    pub edition: String,
}

/// Fetches one issue page and runs the extractors. Only the fetch itself
/// can fail; parse misses never do.
pub async fn scrape_detail(
    client: &HttpClient,
    url: &str,
    default_edition_name: &str,
) -> Result<IssueDetails> {
    let body = client.get_text(url).await?;
    Ok(parse_detail(&body, default_edition_name))
}

pub fn parse_detail(html: &str, default_edition_name: &str) -> IssueDetails {
    let document = Html::parse_document(html);

    let heading = extract_heading(&document);
    let series = series_token(default_edition_name);
    let (title, issue_number) = split_heading(&heading, &series);

    let description = extract_description(&document);

    let full_text = page_text(&document, "\n");
    let release_date = labels::extract_labeled_value(&full_text, &labels::RELEASE_DATE)
        .as_deref()
        .and_then(try_parse_date);
    let original_issue_number =
        labels::extract_labeled_value(&full_text, &labels::ORIGINAL_ISSUE_NUMBER);
    let original_title = labels::extract_labeled_value(&full_text, &labels::ORIGINAL_TITLE);

    let publisher = extract_field_by_label(&document, &["Izdavač", "Publisher"]);
    let edition = extract_field_by_label(&document, &["Edicija", "Serija"])
        .unwrap_or_else(|| default_edition_name.to_string());

    IssueDetails {
        title,
        issue_number,
        description,
        release_date,
        original_issue_number,
        original_title,
        publisher,
        edition,
    }
}

fn extract_heading(document: &Html) -> String {
    let heading_selector = Selector::parse(HEADING_SELECTORS).unwrap();
    if let Some(node) = document.select(&heading_selector).next() {
        return clean_text(&node.text().collect::<Vec<_>>().join(" "));
    }
    let title_selector = Selector::parse("title").unwrap();
    document
        .select(&title_selector)
        .next()
        .map(|node| clean_text(&node.text().collect::<Vec<_>>().join(" ")))
        .unwrap_or_default()
}

fn extract_description(document: &Html) -> Option<String> {
    let selector = Selector::parse(DESCRIPTION_SELECTORS).unwrap();
    let block = document.select(&selector).next()?;
    let text = clean_text(&block.text().collect::<Vec<_>>().join(" "));
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// The series word(s) of an edition name, e.g. "Zagor - specijal" -> "Zagor".
fn series_token(edition_name: &str) -> String {
    edition_name
        .split(" - ")
        .next()
        .unwrap_or(edition_name)
        .trim()
        .to_string()
}

/// Splits a page heading into (title, issue number) using an ordered list
/// of strategies, first match wins:
///
/// 1. `SeriesName <num> [sep] <rest>` anchored at the start,
/// 2. a generic `<num> [sep] <rest>` anywhere in the heading,
/// 3. the positional issue-number extractor, splitting the heading at the
///    number's first occurrence.
///
/// When nothing matches the full heading is the title and the number is
/// absent.
fn split_heading(heading: &str, series: &str) -> (String, Option<String>) {
    if heading.is_empty() {
        return (String::new(), None);
    }

    let primary = Regex::new(&format!(
        r"(?i)^\s*{}\s+(?:[^\d]*?)?(\d{{1,4}})\s*[:\-–]?\s*(.+)$",
        regex::escape(series)
    ))
    .unwrap();
    if let Some(caps) = primary.captures(heading) {
        let number = normalize_issue_number(&caps[1]);
        let title = clean_text(&caps[2]);
        if !title.is_empty() {
            return (title, number);
        }
    }

    let inline = Regex::new(r"(\d{1,4})\s*[:\-–]\s*(.+)$").unwrap();
    if let Some(caps) = inline.captures(heading) {
        let number = normalize_issue_number(&caps[1]);
        let title = clean_text(&caps[2]);
        if !title.is_empty() {
            return (title, number);
        }
    }

    if let Some(number) = extract_issue_number(heading) {
        if let Some(idx) = heading.find(&number) {
            let rest = heading[idx + number.len()..]
                .trim_start_matches([' ', ':', '–', '-'])
                .trim();
            if !rest.is_empty() {
                return (clean_text(rest), Some(number));
            }
        }
        return (heading.trim().to_string(), Some(number));
    }

    (heading.trim().to_string(), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn heading_with_series_prefix_is_split() {
        let (title, number) = split_heading("Zagor 231: Osveta bez kraja", "Zagor");
        assert_eq!(title, "Osveta bez kraja");
        assert_eq!(number, Some("231".to_string()));
    }

    #[test]
    fn heading_with_generic_number_separator() {
        let (title, number) = split_heading("Specijal 12 - Grad duhova", "Zagor");
        assert_eq!(title, "Grad duhova");
        assert_eq!(number, Some("12".to_string()));
    }

    #[test]
    fn heading_without_separator_uses_positional_split() {
        let (title, number) = split_heading("Dilan Dog 45 Dolina smrti", "Dilan Dog");
        assert_eq!(number, Some("45".to_string()));
        assert_eq!(title, "Dolina smrti");
    }

    #[test]
    fn heading_without_number_is_kept_verbatim() {
        let (title, number) = split_heading("Ciko u snegu", "Zagor");
        assert_eq!(title, "Ciko u snegu");
        assert_eq!(number, None);
    }

    #[test]
    fn series_token_takes_leading_words() {
        assert_eq!(series_token("Zagor - redovna serija"), "Zagor");
        assert_eq!(series_token("Dilan Dog - Super Book"), "Dilan Dog");
        assert_eq!(series_token("Nova Zlatna Serija"), "Nova Zlatna Serija");
    }

    #[test]
    fn full_detail_page_is_parsed() {
        let html = r#"
        <html><head><title>Zagor 231</title></head><body>
          <article>
            <h1 class="entry-title">Zagor 231: Osveta bez kraja</h1>
            <div class="entry-content"><p>Zagor se vraća u Darkwood.</p></div>
            <dl>
              <dt>Edicija</dt><dd>zagor - redovna serija</dd>
            </dl>
            <p>Datum objavljivanja: 23. 10. 2025.</p>
            <p>Broj originala: 731</p>
            <p>Naslov originala: La vendetta senza fine</p>
          </article>
        </body></html>"#;

        let details = parse_detail(html, "Zagor - redovna serija");
        assert_eq!(details.title, "Osveta bez kraja");
        assert_eq!(details.issue_number, Some("231".to_string()));
        assert_eq!(details.description, Some("Zagor se vraća u Darkwood.".to_string()));
        assert_eq!(
            details.release_date,
            Some(NaiveDate::from_ymd_opt(2025, 10, 23).unwrap())
        );
        assert_eq!(details.original_issue_number, Some("731".to_string()));
        assert_eq!(details.original_title, Some("La vendetta senza fine".to_string()));
        assert_eq!(details.edition, "zagor - redovna serija");
        assert_eq!(details.publisher, None);
    }

    #[test]
    fn edition_falls_back_to_caller_supplied_name() {
        let html = r#"
        <html><body>
          <article>
            <h1 class="entry-title">Dilan Dog 150: Kuca duhova</h1>
            <div class="entry-content"><p>Opis epizode.</p></div>
          </article>
        </body></html>"#;

        let details = parse_detail(html, "Dilan Dog - redovna serija");
        assert_eq!(details.edition, "Dilan Dog - redovna serija");
        assert_eq!(details.issue_number, Some("150".to_string()));
    }

    #[test]
    fn heading_falls_back_to_document_title() {
        let html = "<html><head><title>Zagor 100: Jubilej</title></head><body><p>x</p></body></html>";
        let details = parse_detail(html, "Zagor");
        assert_eq!(details.title, "Jubilej");
        assert_eq!(details.issue_number, Some("100".to_string()));
    }
}
