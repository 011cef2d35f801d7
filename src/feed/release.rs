use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One release announced in a publisher feed. Ephemeral: emitted as
/// text/JSON/CSV, never stored in the comics table.
#[derive(Debug, Clone, Serialize)]
pub struct Release {
    pub series: String,
    pub title: String,
    pub link: String,
    pub published: Option<DateTime<Utc>>,
}

impl Release {
    /// De-duplication identity across pages and runs.
    pub fn key(&self) -> (String, String, String) {
        (self.series.clone(), self.title.clone(), self.link.clone())
    }
}

/// Newest first; releases without a publish date sort as oldest, never as
/// most recent.
pub fn sort_releases(releases: &mut [Release]) {
    releases.sort_by_key(|r| std::cmp::Reverse(r.published.unwrap_or(DateTime::<Utc>::MIN_UTC)));
}

/// Plain-text listing. The date format is per tool: the Bonelli output
/// has always used dashes, the Veseli Četvrtak one slashes.
pub fn format_releases_text(releases: &[Release], date_format: &str) -> String {
    releases
        .iter()
        .map(|r| {
            let date_part = r
                .published
                .map(|d| d.format(date_format).to_string())
                .unwrap_or_else(|| "Unknown date".to_string());
            format!("{} | {} | {} | {}", date_part, r.series, r.title, r.link)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn releases_to_json(releases: &[Release]) -> Result<String> {
    Ok(serde_json::to_string_pretty(releases)?)
}
