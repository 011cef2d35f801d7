use anyhow::{Context, Result};

use crate::config::editions::Edition;
use crate::scraping::list_page::is_issue_detail_url;
use crate::scraping::normalize::fold_equals;
use crate::utilities::database::upsert_comic::row_to_issue;
use crate::utilities::database::{ComicIssue, Database};

/// Returns stored records, newest insert last. Rows whose URL no longer
/// looks like an issue detail page are filtered out: old runs occasionally
/// stored listing artifacts and those should never reach the API or the
/// CSV export. The optional edition filter compares display names with
/// case/diacritic folding.
pub async fn list_comics(db: &Database, edition: Option<&Edition>) -> Result<Vec<ComicIssue>> {
    let conn = db.conn.lock().await;
    let mut stmt = conn
        .prepare(
            "SELECT edicija, naslov, broj, url, datum_objavljivanja,
                    broj_originala, naslov_originala, opis, izdavac
             FROM comics ORDER BY id",
        )
        .context("Failed to prepare listing query")?;

    let rows = stmt
        .query_map([], row_to_issue)
        .context("Failed to query records")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read record rows")?;

    Ok(rows
        .into_iter()
        .filter(|issue| is_issue_detail_url(&issue.url))
        .filter(|issue| match edition {
            Some(e) => fold_equals(&issue.edition, e.name),
            None => true,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::editions::match_edition;
    use crate::utilities::database::init::init_in_memory;
    use crate::utilities::database::upsert_comic::upsert_comic;

    fn record(edition: &str, title: &str, url: &str) -> ComicIssue {
        ComicIssue {
            edition: edition.to_string(),
            title: title.to_string(),
            issue_number: None,
            url: url.to_string(),
            release_date: None,
            original_issue_number: None,
            original_title: None,
            description: None,
            publisher: None,
        }
    }

    #[tokio::test]
    async fn filters_by_edition_name_with_folding() {
        let db = init_in_memory().unwrap();
        upsert_comic(
            &db,
            &record(
                "Zagor - specijal",
                "Crna mocvara",
                "https://veselicetvrtak.com/izdanja/zagor-specijal-20/",
            ),
        )
        .await
        .unwrap();
        upsert_comic(
            &db,
            &record(
                "Dilan Dog - redovna serija",
                "Kuca duhova",
                "https://veselicetvrtak.com/izdanja/dilan-dog-150/",
            ),
        )
        .await
        .unwrap();

        let edition = match_edition("zagor-specijal").unwrap();
        let rows = list_comics(&db, Some(edition)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Crna mocvara");

        let all = list_comics(&db, None).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn listing_artifact_urls_are_hidden() {
        let db = init_in_memory().unwrap();
        upsert_comic(
            &db,
            &record(
                "Zagor - redovna serija",
                "Osveta bez kraja",
                "https://veselicetvrtak.com/izdanja/zagor-231/",
            ),
        )
        .await
        .unwrap();
        upsert_comic(
            &db,
            &record(
                "Zagor - redovna serija",
                "Strana 2",
                "https://veselicetvrtak.com/izdanja/page/2/",
            ),
        )
        .await
        .unwrap();

        let rows = list_comics(&db, None).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Osveta bez kraja");
    }
}
