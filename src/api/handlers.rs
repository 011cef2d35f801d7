use actix_web::{web, HttpRequest, HttpResponse};

use crate::api::auth::{authenticate, internal_error};
use crate::api::models::{
    ComicsQuery, DeleteQuery, DeleteResponse, ErrorBody, ScrapeRequest, SeatsQuery,
};
use crate::api::sessions::SessionStore;
use crate::config::config::AppConfig;
use crate::config::editions::{resolve_edition_with_default, resolve_optional_edition};
use crate::scrape_edition::scrape_edition;
use crate::scraping::fetch::HttpClient;
use crate::scraping::issue_number::normalize_issue_number;
use crate::utilities::database::delete_comics::delete_comics;
use crate::utilities::database::list_comics::list_comics;
use crate::utilities::database::seatapp::{list_floors, list_seats};
use crate::utilities::database::{ComicIssue, Database};

/// Liveness check that goes through the store: a broken database file or
/// a wedged connection must not report healthy.
pub async fn health(db: web::Data<Database>) -> HttpResponse {
    let conn = db.conn.lock().await;
    match conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0)) {
        Ok(1) => HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })),
        _ => HttpResponse::InternalServerError().json(ErrorBody::new("Database unavailable")),
    }
}

/// `POST /scrape`: runs one edition crawl synchronously and reports what
/// it did. An empty listing is an upstream problem, not a success.
pub async fn scrape(
    db: web::Data<Database>,
    config: web::Data<AppConfig>,
    client: web::Data<HttpClient>,
    body: Option<web::Json<ScrapeRequest>>,
) -> HttpResponse {
    let request = body.map(web::Json::into_inner).unwrap_or_default();

    let per_page = match request.per_page {
        None => None,
        Some(n) => match u32::try_from(n) {
            Ok(n) if n >= 1 => Some(n),
            _ => {
                return HttpResponse::BadRequest()
                    .json(ErrorBody::new("per_page must be a positive integer"))
            }
        },
    };

    let edition = match resolve_edition_with_default(request.edition.as_deref()) {
        Ok(edition) => edition,
        Err(e) => return HttpResponse::BadRequest().json(ErrorBody::new(e.to_string())),
    };

    let summary = match scrape_edition(&client, &db, &config, edition, per_page).await {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("scrape failed: {:#}", e);
            return HttpResponse::BadGateway()
                .json(ErrorBody::new(format!("Scrape failed: {:#}", e)));
        }
    };

    if summary.found == 0 {
        return HttpResponse::BadGateway().json(ErrorBody::new(format!(
            "Listing page yielded no issues for {}",
            summary.edition_name
        )));
    }

    HttpResponse::Ok().json(summary)
}

pub async fn comics(db: web::Data<Database>, query: web::Query<ComicsQuery>) -> HttpResponse {
    let edition = match resolve_optional_edition(query.edicija.as_deref()) {
        Ok(edition) => edition,
        Err(e) => return HttpResponse::BadRequest().json(ErrorBody::new(e.to_string())),
    };
    match list_comics(&db, edition).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => internal_error(e),
    }
}

const EXPORT_COLUMNS: [&str; 9] = [
    "naslov izdavacke kuce",
    "edicija",
    "broj",
    "naslov",
    "broj originala",
    "naslov originala",
    "datum objavljivanja",
    "url",
    "opis",
];

fn export_row(issue: &ComicIssue) -> [String; 9] {
    [
        issue.publisher.clone().unwrap_or_default(),
        issue.edition.clone(),
        issue.issue_number.clone().unwrap_or_default(),
        issue.title.clone(),
        issue.original_issue_number.clone().unwrap_or_default(),
        issue.original_title.clone().unwrap_or_default(),
        issue
            .release_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        issue.url.clone(),
        issue.description.clone().unwrap_or_default(),
    ]
}

/// `GET /export.csv`: the whole store (or one edition) as a CSV download.
pub async fn export_csv(db: web::Data<Database>, query: web::Query<ComicsQuery>) -> HttpResponse {
    let edition = match resolve_optional_edition(query.edicija.as_deref()) {
        Ok(edition) => edition,
        Err(e) => return HttpResponse::BadRequest().json(ErrorBody::new(e.to_string())),
    };

    let all = match list_comics(&db, None).await {
        Ok(rows) => rows,
        Err(e) => return internal_error(e),
    };
    if all.is_empty() {
        return HttpResponse::BadRequest().json(ErrorBody::new("Database is empty"));
    }

    let rows = match list_comics(&db, edition).await {
        Ok(rows) => rows,
        Err(e) => return internal_error(e),
    };
    if rows.is_empty() {
        return HttpResponse::NotFound().json(ErrorBody::new("No records match the filter"));
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    if writer.write_record(EXPORT_COLUMNS).is_err() {
        return internal_error(anyhow::anyhow!("CSV serialization failed"));
    }
    for issue in &rows {
        if writer.write_record(export_row(issue)).is_err() {
            return internal_error(anyhow::anyhow!("CSV serialization failed"));
        }
    }
    let bytes = match writer.into_inner() {
        Ok(bytes) => bytes,
        Err(_) => return internal_error(anyhow::anyhow!("CSV serialization failed")),
    };

    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"export.csv\"",
        ))
        .body(bytes)
}

/// `DELETE /comics?edicija=&broj=`: `broj=*` clears the whole edition,
/// anything else targets one normalized issue number.
pub async fn delete(db: web::Data<Database>, query: web::Query<DeleteQuery>) -> HttpResponse {
    let Some(edicija) = query.edicija.as_deref().map(str::trim).filter(|s| !s.is_empty())
    else {
        return HttpResponse::BadRequest().json(ErrorBody::new("edicija is required"));
    };
    let Some(broj) = query.broj.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
        return HttpResponse::BadRequest().json(ErrorBody::new("broj is required"));
    };

    let edition = match resolve_optional_edition(Some(edicija)) {
        Ok(Some(edition)) => edition,
        Ok(None) | Err(_) => {
            return HttpResponse::BadRequest()
                .json(ErrorBody::new(format!("Unknown edition: {edicija}")))
        }
    };

    let issue_number = if broj == "*" {
        None
    } else {
        match normalize_issue_number(broj) {
            Some(number) => Some(number),
            None => {
                return HttpResponse::BadRequest()
                    .json(ErrorBody::new(format!("Invalid issue number: {broj}")))
            }
        }
    };

    let deleted = match delete_comics(&db, edition, issue_number.as_deref()).await {
        Ok(deleted) => deleted,
        Err(e) => return internal_error(e),
    };
    if deleted == 0 {
        return HttpResponse::NotFound().json(ErrorBody::new("Nothing to delete"));
    }

    HttpResponse::Ok().json(DeleteResponse {
        deleted,
        edicija: edition.name.to_string(),
        broj: broj.to_string(),
    })
}

pub async fn floors(
    req: HttpRequest,
    db: web::Data<Database>,
    store: web::Data<dyn SessionStore>,
) -> HttpResponse {
    match authenticate(&req, store.get_ref(), &db).await {
        Ok(Some(_)) => {}
        Ok(None) => return HttpResponse::Unauthorized().json(ErrorBody::new("Not logged in")),
        Err(e) => return internal_error(e),
    }
    match list_floors(&db).await {
        Ok(floors) => HttpResponse::Ok().json(floors),
        Err(e) => internal_error(e),
    }
}

pub async fn seats(
    req: HttpRequest,
    db: web::Data<Database>,
    store: web::Data<dyn SessionStore>,
    query: web::Query<SeatsQuery>,
) -> HttpResponse {
    match authenticate(&req, store.get_ref(), &db).await {
        Ok(Some(_)) => {}
        Ok(None) => return HttpResponse::Unauthorized().json(ErrorBody::new("Not logged in")),
        Err(e) => return internal_error(e),
    }
    let Some(floor_id) = query.floor_id else {
        return HttpResponse::BadRequest().json(ErrorBody::new("floorId is required"));
    };
    match list_seats(&db, floor_id).await {
        Ok(seats) => HttpResponse::Ok().json(seats),
        Err(e) => internal_error(e),
    }
}
