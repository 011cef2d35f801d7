use std::collections::HashSet;
use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};

use crate::feed::release::Release;

const CSV_HEADER: [&str; 5] = ["fetched_at", "series", "title", "link", "published"];

/// Appends releases to the historical CSV log, stamping each row with the
/// fetch time. Rows whose (series, title, link) key is already present in
/// the log are skipped, so repeated runs do not duplicate. Returns the
/// number of rows actually written.
pub fn append_releases_csv(path: &Path, releases: &[Release]) -> Result<usize> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
    }

    let mut existing: HashSet<(String, String, String)> = HashSet::new();
    let file_has_rows = path.exists() && std::fs::metadata(path)?.len() > 0;
    if file_has_rows {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to read CSV log {}", path.display()))?;
        for record in reader.records() {
            let record = record.context("Malformed row in CSV log")?;
            existing.insert((
                record.get(1).unwrap_or("").to_string(),
                record.get(2).unwrap_or("").to_string(),
                record.get(3).unwrap_or("").to_string(),
            ));
        }
    }

    let fetched_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut new_rows: Vec<[String; 5]> = Vec::new();
    for release in releases {
        let key = release.key();
        if existing.contains(&key) {
            continue;
        }
        existing.insert(key);
        new_rows.push([
            fetched_at.clone(),
            release.series.clone(),
            release.title.clone(),
            release.link.clone(),
            release
                .published
                .map(|d| d.to_rfc3339_opts(SecondsFormat::Secs, true))
                .unwrap_or_default(),
        ]);
    }

    if new_rows.is_empty() {
        return Ok(0);
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open CSV log {}", path.display()))?;
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);

    if !file_has_rows {
        writer.write_record(CSV_HEADER)?;
    }
    let written = new_rows.len();
    for row in new_rows {
        writer.write_record(&row)?;
    }
    writer.flush().context("Failed to flush CSV log")?;

    Ok(written)
}
