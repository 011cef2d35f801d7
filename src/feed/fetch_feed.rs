use anyhow::{anyhow, Result};

use crate::scraping::fetch::HttpClient;

/// Fetches the first feed URL that answers, trying fallback candidates in
/// order. Every candidate's failure reason is kept; if all of them fail
/// the reasons are aggregated into a single error.
pub async fn fetch_feed(client: &HttpClient, candidates: &[String]) -> Result<String> {
    let mut errors: Vec<String> = Vec::new();
    for candidate in candidates {
        match client.get_text(candidate).await {
            Ok(body) => return Ok(body),
            Err(e) => errors.push(format!("{} -> {:#}", candidate, e)),
        }
    }
    Err(anyhow!("All feed URLs failed:\n{}", errors.join("\n")))
}
