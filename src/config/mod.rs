pub mod config;
pub mod editions;
