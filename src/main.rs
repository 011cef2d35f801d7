mod api;
mod config;
mod feed;
mod scrape_edition;
mod scraping;
mod utilities;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::config::config::{load_config, AppConfig};
use crate::config::editions::resolve_edition_with_default;
use crate::feed::matchers::{default_series, from_overrides};
use crate::feed::run::{run_feed_tool, FeedRun};
use crate::feed::{BONELLI_FEED_URL, VESELI_CETVRTAK_FEED_CANDIDATES};
use crate::scraping::fetch::HttpClient;
use crate::utilities::database::init::init;

#[derive(Parser)]
#[command(name = "strip-scraper", version, about = "Comic release scraper and feed tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Latest releases from the Sergio Bonelli shop feed
    Bonelli(FeedArgs),
    /// Latest releases from the Veseli Cetvrtak product feed
    VeseliCetvrtak(FeedArgs),
    /// Crawl one edition's catalog into the local database
    Scrape(ScrapeArgs),
    /// Serve the HTTP API over the local database
    Serve(ServeArgs),
}

#[derive(Args)]
struct FeedArgs {
    /// Override the feed URL (disables the built-in fallbacks)
    #[arg(long)]
    feed_url: Option<String>,

    /// Series names to match instead of the built-in set
    #[arg(long, num_args = 1..)]
    series: Vec<String>,

    /// Print the releases as a JSON array
    #[arg(long)]
    json: bool,

    /// Keep only the newest N releases
    #[arg(long)]
    limit: Option<usize>,

    /// Number of feed pages to walk
    #[arg(long, default_value_t = 1)]
    paged: u32,

    /// Append new releases to this CSV log
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Args)]
struct ScrapeArgs {
    /// Edition slug or display name; defaults to the Zagor regular series
    #[arg(long)]
    edition: Option<String>,

    /// Override the listing page size
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    per_page: Option<u32>,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ServeArgs {
    /// Bind address override
    #[arg(long)]
    host: Option<String>,

    /// Bind port override
    #[arg(long)]
    port: Option<u16>,
}

impl FeedArgs {
    fn into_run(
        self,
        default_url: &str,
        default_fallbacks: &[&str],
        date_format: &'static str,
    ) -> FeedRun {
        let (feed_url, fallbacks) = match self.feed_url {
            // an explicit URL replaces the whole candidate list
            Some(url) => (url, Vec::new()),
            None => (
                default_url.to_string(),
                default_fallbacks.iter().map(|u| u.to_string()).collect(),
            ),
        };
        let series = if self.series.is_empty() {
            default_series()
        } else {
            from_overrides(&self.series)
        };
        FeedRun {
            feed_url,
            fallbacks,
            series,
            json: self.json,
            limit: self.limit,
            paged: self.paged,
            csv: self.csv,
            date_format,
        }
    }
}

async fn run(cli: Cli, config: AppConfig) -> Result<i32> {
    match cli.command {
        Command::Bonelli(args) => {
            let client = HttpClient::new(&config.http)?;
            let run = args.into_run(BONELLI_FEED_URL, &[], "%Y-%m-%d");
            run_feed_tool(&client, &run).await
        }
        Command::VeseliCetvrtak(args) => {
            let client = HttpClient::new(&config.http)?;
            let run = args.into_run(
                VESELI_CETVRTAK_FEED_CANDIDATES[0],
                &VESELI_CETVRTAK_FEED_CANDIDATES[1..],
                "%Y/%m/%d",
            );
            run_feed_tool(&client, &run).await
        }
        Command::Scrape(args) => {
            let edition = resolve_edition_with_default(args.edition.as_deref())?;
            let client = HttpClient::new(&config.http)?;
            let db = init(&config.database.path)?;
            let summary =
                scrape_edition::scrape_edition(&client, &db, &config, edition, args.per_page)
                    .await?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "{} {}: {} found, {} imported or updated",
                    "Done".green(),
                    summary.edition_name,
                    summary.found,
                    summary.imported_or_updated
                );
                for item in &summary.sample {
                    println!(
                        "  {} {} ({})",
                        item.issue_number.as_deref().unwrap_or("-"),
                        item.title,
                        item.url
                    );
                }
            }
            if summary.found == 0 {
                eprintln!("{}", "Listing page yielded no issues".red());
                return Ok(1);
            }
            Ok(0)
        }
        Command::Serve(args) => {
            let db = init(&config.database.path)?;
            let host = args.host.unwrap_or_else(|| config.server.host.clone());
            let port = args.port.unwrap_or(config.server.port);
            api::server::run_server(config, db, &host, port).await?;
            Ok(0)
        }
    }
}

#[actix_web::main]
async fn main() {
    let cli = Cli::parse();
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Configuration error:".red(), e);
            process::exit(1);
        }
    };

    match run(cli, config).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            process::exit(1);
        }
    }
}
