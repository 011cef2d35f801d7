use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::scraping::normalize::clean_text;

/// Extracts a "Label: value" field from a detail page.
///
/// Two layers, tried in order:
/// 1. a text-level search of the whole page for "Label: value",
/// 2. a structural pass over definition-list/table markup, where a label
///    node (`dt`/`th`/`b`/`strong`) is followed by an adjacent value node
///    (`dd`/`td`).
///
/// Returns None when neither layer finds anything; callers supply their own
/// fallback constants.
pub fn extract_field_by_label(document: &Html, labels: &[&str]) -> Option<String> {
    let text = page_text(document, " ");
    for label in labels {
        let pattern = format!(
            r"(?i){}\s*[:\-]\s*(.+?)\s{{1,3}}(?:[A-ZĆČŠĐŽ]|Datum|Broj|Naslov|Opis|Izdava|Edic|Autor|Scenar|Crt|$)",
            regex::escape(label)
        );
        let re = Regex::new(&pattern).unwrap();
        if let Some(caps) = re.captures(&text) {
            let value = clean_text(&caps[1]);
            if !value.is_empty() {
                return Some(value);
            }
        }
    }

    let label_selector = Selector::parse("dt, th, b, strong").unwrap();
    for node in document.select(&label_selector) {
        let label_text = clean_text(&node.text().collect::<Vec<_>>().join(" "));
        if label_text.is_empty() {
            continue;
        }
        let label_lower = label_text.to_lowercase();
        if !labels.iter().any(|l| label_lower.contains(&l.to_lowercase())) {
            continue;
        }
        if let Some(value) = adjacent_value(node) {
            return Some(value);
        }
    }
    None
}

/// Finds the value node adjacent to a label node: the next `dd` or `td`
/// sibling, or failing that the first `td` following the label's parent.
fn adjacent_value(label_node: ElementRef) -> Option<String> {
    if let Some(value) = next_sibling_value(label_node) {
        return Some(value);
    }
    let parent = label_node.parent().and_then(ElementRef::wrap)?;
    next_sibling_value(parent)
}

fn next_sibling_value(node: ElementRef) -> Option<String> {
    for sibling in node.next_siblings() {
        if let Some(element) = ElementRef::wrap(sibling) {
            let name = element.value().name();
            if name == "dd" || name == "td" {
                let value = clean_text(&element.text().collect::<Vec<_>>().join(" "));
                if !value.is_empty() {
                    return Some(value);
                }
            }
        }
    }
    None
}

/// Joins all text nodes of the document with the given separator, trimming
/// each fragment. Approximates "get the visible text of the page".
pub fn page_text(document: &Html, separator: &str) -> String {
    document
        .root_element()
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}
