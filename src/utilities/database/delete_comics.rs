use anyhow::{Context, Result};
use rusqlite::params;

use crate::config::editions::Edition;
use crate::utilities::database::Database;

/// Deletes records of one edition, optionally narrowed to a single issue
/// number. Returns how many rows went away; zero means nothing matched
/// and callers report that as not found.
pub async fn delete_comics(
    db: &Database,
    edition: &Edition,
    issue_number: Option<&str>,
) -> Result<usize> {
    let conn = db.conn.lock().await;
    let deleted = match issue_number {
        Some(number) => conn
            .execute(
                "DELETE FROM comics WHERE edicija = ?1 AND broj = ?2",
                params![edition.name, number],
            )
            .context("Failed to delete records")?,
        None => conn
            .execute("DELETE FROM comics WHERE edicija = ?1", params![edition.name])
            .context("Failed to delete records")?,
    };
    Ok(deleted)
}
