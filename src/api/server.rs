use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use colored::Colorize;

use crate::api::routes;
use crate::api::sessions::{InMemorySessionStore, SessionStore};
use crate::config::config::AppConfig;
use crate::scraping::fetch::HttpClient;
use crate::utilities::database::Database;

/// Binds the API server and runs it until shutdown.
pub async fn run_server(config: AppConfig, db: Database, host: &str, port: u16) -> Result<()> {
    let client = HttpClient::new(&config.http)?;

    let db_data = web::Data::new(db);
    let config_data = web::Data::new(config);
    let client_data = web::Data::new(client);
    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let sessions_data: web::Data<dyn SessionStore> = web::Data::from(sessions);

    println!("{} http://{}:{}", "Listening on".green(), host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(db_data.clone())
            .app_data(config_data.clone())
            .app_data(client_data.clone())
            .app_data(sessions_data.clone())
            .configure(routes::configure)
    })
    .bind((host, port))
    .with_context(|| format!("Failed to bind {}:{}", host, port))?
    .run()
    .await
    .context("Server error")
}
