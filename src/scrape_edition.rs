use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use url::Url;

use crate::config::config::AppConfig;
use crate::config::editions::Edition;
use crate::scraping::detail_page::{scrape_detail, IssueDetails};
use crate::scraping::fetch::HttpClient;
use crate::scraping::issue_number::parse_title_and_number;
use crate::scraping::list_page::{crawl_listing, Candidate};
use crate::scraping::normalize::has_alpha;
use crate::utilities::database::upsert_comic::upsert_comic;
use crate::utilities::database::{ComicIssue, Database};
use crate::utilities::paged_url::with_per_page;

/// What one scrape run did, small enough to return over the API or print
/// from the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeSummary {
    pub edition_slug: String,
    pub edition_name: String,
    pub list_url: String,
    pub per_page: Option<u32>,
    pub found: usize,
    pub imported_or_updated: usize,
    pub sample: Vec<SampleItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SampleItem {
    pub title: String,
    pub issue_number: Option<String>,
    pub url: String,
}

const SAMPLE_SIZE: usize = 5;

/// Crawls one edition's listing, scrapes every discovered detail page and
/// upserts the results. `found` is the candidate count; zero found means
/// the listing gave us nothing and the caller decides how loudly to fail.
pub async fn scrape_edition(
    client: &HttpClient,
    db: &Database,
    config: &AppConfig,
    edition: &Edition,
    per_page: Option<u32>,
) -> Result<ScrapeSummary> {
    let list_url = with_per_page(edition.list_url, per_page);
    let effective_per_page = per_page.or_else(|| per_page_from_url(&list_url));

    println!(
        "{} {} ({})",
        "Scraping".cyan(),
        edition.name.bold(),
        list_url
    );

    let candidates = crawl_listing(
        client,
        &list_url,
        crate::config::editions::BASE_URL,
        config.http.max_empty_pages,
    )
    .await?;

    println!("{} {} candidates", "Found".cyan(), candidates.len());

    let mut imported = 0usize;
    let mut sample: Vec<SampleItem> = Vec::new();

    for candidate in &candidates {
        client.pause().await;

        // An exhausted fetch aborts the whole run; every page that does
        // answer is stored, even when the title guesses came up empty.
        let details = scrape_detail(client, &candidate.url, edition.name).await?;
        let issue = build_issue(candidate, &details);

        upsert_comic(db, &issue).await?;
        imported += 1;

        if sample.len() < SAMPLE_SIZE {
            sample.push(SampleItem {
                title: issue.title.clone(),
                issue_number: issue.issue_number.clone(),
                url: issue.url.clone(),
            });
        }
        println!(
            "  {} {} ({})",
            "Saved".green(),
            issue.title,
            issue.issue_number.as_deref().unwrap_or("-")
        );
    }

    Ok(ScrapeSummary {
        edition_slug: edition.slug.to_string(),
        edition_name: edition.name.to_string(),
        list_url,
        per_page: effective_per_page,
        found: candidates.len(),
        imported_or_updated: imported,
        sample,
    })
}

/// Assembles the stored record from one candidate and its scraped page.
/// The listing-card title (and the number parsed out of it) backs up the
/// page heading when that gave nothing alphabetic.
fn build_issue(candidate: &Candidate, details: &IssueDetails) -> ComicIssue {
    let (card_title, card_number) = parse_title_and_number(&candidate.title);
    let title = if has_alpha(&details.title) {
        details.title.clone()
    } else {
        card_title
    };
    ComicIssue {
        edition: details.edition.clone(),
        title,
        issue_number: details.issue_number.clone().or(card_number),
        url: candidate.url.clone(),
        release_date: details.release_date,
        original_issue_number: details.original_issue_number.clone(),
        original_title: details.original_title.clone(),
        description: details.description.clone(),
        publisher: details.publisher.clone(),
    }
}

fn per_page_from_url(url: &str) -> Option<u32> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(k, _)| k == "per_page")
        .and_then(|(_, v)| v.parse().ok())
}
