use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::feed::matchers::{match_series, SeriesMatcher};
use crate::feed::release::Release;

/// Walks an RSS document and emits one release per `<item>` whose title
/// matches a followed series. Items without a match are dropped;
/// unparsable publish dates become absent, never errors.
pub fn parse_feed(xml: &str, matchers: &[SeriesMatcher]) -> Result<Vec<Release>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut releases = Vec::new();

    let mut in_item = false;
    let mut title = String::new();
    let mut link = String::new();
    let mut published: Option<DateTime<Utc>> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"item" => {
                    in_item = true;
                    title.clear();
                    link.clear();
                    published = None;
                }
                b"title" if in_item => {
                    title = reader
                        .read_text(e.name())
                        .context("Failed to read item title")?
                        .into_owned();
                }
                b"link" if in_item => {
                    link = reader
                        .read_text(e.name())
                        .context("Failed to read item link")?
                        .into_owned();
                }
                b"pubDate" if in_item => {
                    let raw = reader
                        .read_text(e.name())
                        .context("Failed to read item pubDate")?;
                    published = DateTime::parse_from_rfc2822(raw.trim())
                        .ok()
                        .map(|d| d.with_timezone(&Utc));
                }
                _ => (),
            },
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == b"item" {
                    in_item = false;
                    if let Some(series) = match_series(matchers, &title) {
                        releases.push(Release {
                            series: series.to_string(),
                            title: title.trim().to_string(),
                            link: link.trim().to_string(),
                            published,
                        });
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Feed XML error at position {}: {:?}",
                    reader.buffer_position(),
                    e
                ))
            }
            _ => (),
        }
        buf.clear();
    }

    Ok(releases)
}
