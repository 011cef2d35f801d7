pub mod csv_log;
pub mod fetch_feed;
pub mod matchers;
pub mod parse_feed;
pub mod release;
pub mod run;

/// Sergio Bonelli "ultime uscite" feed; a single source, no fallbacks.
pub const BONELLI_FEED_URL: &str = "https://en.shop.sergiobonelli.it/rss/ultime-uscite";

/// Veseli Četvrtak product feed candidates, tried in order. The WordPress
/// shop exposes the same content under several feed routes and not all of
/// them are always reachable.
pub const VESELI_CETVRTAK_FEED_CANDIDATES: [&str; 3] = [
    "https://veselicetvrtak.com/izdanja/feed/",
    "https://veselicetvrtak.com/feed/?post_type=product",
    "https://veselicetvrtak.com/?post_type=product&feed=rss2",
];
