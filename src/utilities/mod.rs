pub mod database;
pub mod paged_url;
