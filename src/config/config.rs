use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Politeness delay between successive requests to the same site.
    pub request_delay_ms: u64,
    pub max_retries: u32,
    /// Consecutive pages without new results before a listing crawl stops.
    pub max_empty_pages: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Loads Settings.toml (optional) with `APP_`-prefixed environment
/// overrides on top of coded defaults.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        .set_default(
            "http.user_agent",
            "Mozilla/5.0 (compatible; StripScraper/0.1; +https://example.local)",
        )?
        .set_default("http.timeout_secs", 30)?
        .set_default("http.request_delay_ms", 600)?
        .set_default("http.max_retries", 3)?
        .set_default("http.max_empty_pages", 2)?
        .set_default("database.path", "comics.db")?
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .add_source(File::with_name("Settings").required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    settings.try_deserialize::<AppConfig>()
}
