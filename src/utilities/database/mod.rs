pub mod delete_comics;
pub mod init;
pub mod list_comics;
pub mod seatapp;
pub mod upsert_comic;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use init::Database;

/// The canonical record one extraction pass produces. Identity is the
/// detail-page URL: two passes over the same URL merge into one row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComicIssue {
    pub edition: String,
    pub title: String,
    pub issue_number: Option<String>,
    pub url: String,
    pub release_date: Option<NaiveDate>,
    pub original_issue_number: Option<String>,
    pub original_title: Option<String>,
    pub description: Option<String>,
    pub publisher: Option<String>,
}
