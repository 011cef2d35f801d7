use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;

use crate::feed::csv_log::append_releases_csv;
use crate::feed::fetch_feed::fetch_feed;
use crate::feed::matchers::SeriesMatcher;
use crate::feed::parse_feed::parse_feed;
use crate::feed::release::{format_releases_text, releases_to_json, sort_releases, Release};
use crate::scraping::fetch::HttpClient;
use crate::utilities::paged_url::with_paged;

pub struct FeedRun {
    pub feed_url: String,
    pub fallbacks: Vec<String>,
    pub series: Vec<SeriesMatcher>,
    pub json: bool,
    pub limit: Option<usize>,
    pub paged: u32,
    pub csv: Option<PathBuf>,
    /// strftime pattern for the text output's date column.
    pub date_format: &'static str,
}

/// Runs one feed tool invocation: fetch page(s), filter by series, sort,
/// optionally log to CSV, print. Returns the process exit code.
///
/// A failure on page 1 is fatal ("source unreachable"); failures on later
/// pages are reported and skipped, matching the behaviour the tools have
/// always had.
pub async fn run_feed_tool(client: &HttpClient, run: &FeedRun) -> Result<i32> {
    let page_count = run.paged.max(1);
    let mut all_releases: Vec<Release> = Vec::new();
    let mut seen: HashSet<(String, String, String)> = HashSet::new();

    for page in 1..=page_count {
        let mut candidates = vec![with_paged(&run.feed_url, page)];
        candidates.extend(run.fallbacks.iter().map(|u| with_paged(u, page)));

        let body = match fetch_feed(client, &candidates).await {
            Ok(body) => body,
            Err(e) => {
                eprintln!(
                    "{} {:#}",
                    format!("Failed to download feed page {}:", page).red(),
                    e
                );
                if page == 1 {
                    return Ok(1);
                }
                continue;
            }
        };

        for release in parse_feed(&body, &run.series)? {
            let key = release.key();
            if seen.insert(key) {
                all_releases.push(release);
            }
        }

        if page < page_count {
            client.pause().await;
        }
    }

    if all_releases.is_empty() {
        return Ok(0);
    }

    sort_releases(&mut all_releases);
    if let Some(limit) = run.limit {
        all_releases.truncate(limit);
    }

    if let Some(path) = &run.csv {
        let written = append_releases_csv(path, &all_releases)?;
        eprintln!("{} {} new row(s) logged to {}", "✓".green(), written, path.display());
    }

    if run.json {
        println!("{}", releases_to_json(&all_releases)?);
    } else {
        println!("{}", format_releases_text(&all_releases, run.date_format));
    }
    Ok(0)
}
