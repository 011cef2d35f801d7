use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{Datelike, Duration, NaiveDate, Utc};

use crate::api::auth::{authenticate, internal_error};
use crate::api::models::{ErrorBody, ReportQuery, ReportResponse};
use crate::api::sessions::SessionStore;
use crate::utilities::database::seatapp::attendance_counts;
use crate::utilities::database::Database;

/// Monday through Sunday of the week containing `today`.
pub fn week_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
    (monday, monday + Duration::days(6))
}

/// First through last day of the calendar month containing `today`.
pub fn month_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = today.with_day(1).unwrap_or(today);
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    let last = next_month
        .map(|d| d - Duration::days(1))
        .unwrap_or(today);
    (first, last)
}

/// January 1st through December 31st of the year containing `today`.
pub fn year_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
    let last = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);
    (first, last)
}

async fn report(
    req: HttpRequest,
    db: web::Data<Database>,
    store: web::Data<dyn SessionStore>,
    query: web::Query<ReportQuery>,
    range: (NaiveDate, NaiveDate),
) -> HttpResponse {
    let user = match authenticate(&req, store.get_ref(), &db).await {
        Ok(Some(user)) => user,
        Ok(None) => return HttpResponse::Unauthorized().json(ErrorBody::new("Not logged in")),
        Err(e) => return internal_error(e),
    };
    let user_id = query.user_id.unwrap_or(user.id);

    let (from, to) = range;
    match attendance_counts(&db, user_id, from, to).await {
        Ok(counts) => HttpResponse::Ok().json(ReportResponse {
            user_id,
            from: from.to_string(),
            to: to.to_string(),
            office: counts.office,
            remote: counts.remote,
            no_show: counts.no_show,
        }),
        Err(e) => internal_error(e),
    }
}

pub async fn weekly(
    req: HttpRequest,
    db: web::Data<Database>,
    store: web::Data<dyn SessionStore>,
    query: web::Query<ReportQuery>,
) -> HttpResponse {
    let range = week_range(Utc::now().date_naive());
    report(req, db, store, query, range).await
}

pub async fn monthly(
    req: HttpRequest,
    db: web::Data<Database>,
    store: web::Data<dyn SessionStore>,
    query: web::Query<ReportQuery>,
) -> HttpResponse {
    let range = month_range(Utc::now().date_naive());
    report(req, db, store, query, range).await
}

pub async fn yearly(
    req: HttpRequest,
    db: web::Data<Database>,
    store: web::Data<dyn SessionStore>,
    query: web::Query<ReportQuery>,
) -> HttpResponse {
    let range = year_range(Utc::now().date_naive());
    report(req, db, store, query, range).await
}
