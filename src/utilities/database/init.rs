use std::sync::Arc;

use anyhow::{Context, Result};
use rusqlite::Connection;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct Database {
    pub conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

/// Opens (or creates) the SQLite database and ensures the schema exists.
///
/// The `comics` table is the upsert store; `url` carries the uniqueness
/// constraint that makes repeated scrapes merge instead of duplicate. The
/// remaining tables back the bundled seat-app endpoints.
pub fn init(path: &str) -> Result<Database> {
    let conn = Connection::open(path).context("Failed to open SQLite database")?;
    create_schema(&conn)?;
    Ok(Database::new(Arc::new(Mutex::new(conn))))
}

/// In-memory database with the same schema; used by tests.
pub fn init_in_memory() -> Result<Database> {
    let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
    create_schema(&conn)?;
    Ok(Database::new(Arc::new(Mutex::new(conn))))
}

fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS comics (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            edicija TEXT NOT NULL,
            naslov TEXT NOT NULL,
            broj TEXT,
            url TEXT NOT NULL,
            datum_objavljivanja TEXT,
            broj_originala TEXT,
            naslov_originala TEXT,
            opis TEXT,
            izdavac TEXT,
            CONSTRAINT uq_comic_url UNIQUE (url)
        );

        CREATE TABLE IF NOT EXISTS app_user (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            upn TEXT NOT NULL UNIQUE,
            name TEXT,
            dept TEXT,
            roles TEXT,
            password_hash TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS floor (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS zone (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            floor_id INTEGER NOT NULL REFERENCES floor(id)
        );

        CREATE TABLE IF NOT EXISTS seat (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT NOT NULL,
            zone_id INTEGER NOT NULL REFERENCES zone(id)
        );

        CREATE TABLE IF NOT EXISTS booking (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES app_user(id),
            date TEXT NOT NULL,
            status TEXT NOT NULL
        );",
    )
    .context("Failed to create schema")?;
    Ok(())
}
