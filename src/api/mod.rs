pub mod auth;
pub mod handlers;
pub mod models;
pub mod reports;
pub mod routes;
pub mod server;
pub mod sessions;
