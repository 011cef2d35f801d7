use serde::{Deserialize, Serialize};

/// Body of `POST /scrape`. Both fields are optional: the edition falls
/// back to the default catalog entry and `per_page` to whatever the
/// listing URL already carries. Aliases keep older clients working.
#[derive(Debug, Default, Deserialize)]
pub struct ScrapeRequest {
    #[serde(alias = "edicija", alias = "slug", alias = "edition_slug")]
    pub edition: Option<String>,
    #[serde(alias = "perPage")]
    pub per_page: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ComicsQuery {
    pub edicija: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub edicija: Option<String>,
    pub broj: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: usize,
    pub edicija: String,
    pub broj: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: i64,
    pub upn: String,
    pub name: Option<String>,
    pub dept: Option<String>,
    pub roles: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeatsQuery {
    #[serde(rename = "floorId")]
    pub floor_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub user_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub user_id: i64,
    pub from: String,
    pub to: String,
    pub office: i64,
    pub remote: i64,
    pub no_show: i64,
}
