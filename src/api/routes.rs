use actix_web::web;

use crate::api::{auth, handlers, reports};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/scrape", web::post().to(handlers::scrape))
        .route("/comics", web::get().to(handlers::comics))
        .route("/comics", web::delete().to(handlers::delete))
        .route("/export.csv", web::get().to(handlers::export_csv))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(handlers::health))
                .route("/login", web::post().to(auth::login))
                .route("/logout", web::post().to(auth::logout))
                .route("/me", web::get().to(auth::me))
                .route("/floors", web::get().to(handlers::floors))
                .route("/seats", web::get().to(handlers::seats))
                .route("/reports/weekly", web::get().to(reports::weekly))
                .route("/reports/monthly", web::get().to(reports::monthly))
                .route("/reports/yearly", web::get().to(reports::yearly)),
        );
}
