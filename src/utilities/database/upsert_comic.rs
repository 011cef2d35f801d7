use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use crate::config::editions::{default_edition, DEFAULT_PUBLISHER};
use crate::utilities::database::{ComicIssue, Database};

/// Inserts or updates one record, keyed by `url`, inside a single
/// transaction. On update a column is only overwritten when the newly
/// scraped value is non-empty: a parse miss never erases data a previous
/// run managed to extract.
pub async fn upsert_comic(db: &Database, issue: &ComicIssue) -> Result<()> {
    let mut conn = db.conn.lock().await;
    let tx = conn.transaction().context("Failed to begin transaction")?;

    let existing: Option<ComicIssue> = tx
        .query_row(
            "SELECT edicija, naslov, broj, url, datum_objavljivanja,
                    broj_originala, naslov_originala, opis, izdavac
             FROM comics WHERE url = ?1",
            params![issue.url],
            row_to_issue,
        )
        .optional()
        .context("Failed to look up record by URL")?;

    match existing {
        None => {
            tx.execute(
                "INSERT INTO comics (edicija, naslov, broj, url, datum_objavljivanja,
                                     broj_originala, naslov_originala, opis, izdavac)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    non_empty(&issue.edition).unwrap_or_else(|| default_edition().name.to_string()),
                    issue.title,
                    issue.issue_number,
                    issue.url,
                    issue.release_date.map(|d| d.to_string()),
                    issue.original_issue_number,
                    issue.original_title,
                    issue.description,
                    issue
                        .publisher
                        .as_deref()
                        .and_then(non_empty)
                        .unwrap_or_else(|| DEFAULT_PUBLISHER.to_string()),
                ],
            )
            .context("Failed to insert record")?;
        }
        Some(old) => {
            let merged = merge(&old, issue);
            tx.execute(
                "UPDATE comics
                 SET edicija = ?1, naslov = ?2, broj = ?3, datum_objavljivanja = ?4,
                     broj_originala = ?5, naslov_originala = ?6, opis = ?7, izdavac = ?8
                 WHERE url = ?9",
                params![
                    merged.edition,
                    merged.title,
                    merged.issue_number,
                    merged.release_date.map(|d| d.to_string()),
                    merged.original_issue_number,
                    merged.original_title,
                    merged.description,
                    merged.publisher,
                    issue.url,
                ],
            )
            .context("Failed to update record")?;
        }
    }

    tx.commit().context("Failed to commit upsert")?;
    Ok(())
}

/// New non-empty values win; everything else keeps the stored value.
fn merge(old: &ComicIssue, new: &ComicIssue) -> ComicIssue {
    ComicIssue {
        edition: non_empty(&new.edition).unwrap_or_else(|| old.edition.clone()),
        title: non_empty(&new.title).unwrap_or_else(|| old.title.clone()),
        issue_number: pick(&new.issue_number, &old.issue_number),
        url: old.url.clone(),
        release_date: new.release_date.or(old.release_date),
        original_issue_number: pick(&new.original_issue_number, &old.original_issue_number),
        original_title: pick(&new.original_title, &old.original_title),
        description: pick(&new.description, &old.description),
        publisher: pick(&new.publisher, &old.publisher),
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn pick(new: &Option<String>, old: &Option<String>) -> Option<String> {
    new.as_deref().and_then(non_empty).or_else(|| old.clone())
}

pub(crate) fn row_to_issue(row: &rusqlite::Row<'_>) -> rusqlite::Result<ComicIssue> {
    let date_raw: Option<String> = row.get(4)?;
    Ok(ComicIssue {
        edition: row.get(0)?,
        title: row.get(1)?,
        issue_number: row.get(2)?,
        url: row.get(3)?,
        release_date: date_raw.and_then(|d| d.parse().ok()),
        original_issue_number: row.get(5)?,
        original_title: row.get(6)?,
        description: row.get(7)?,
        publisher: row.get(8)?,
    })
}
