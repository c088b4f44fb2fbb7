pub mod admin;
pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod utils;
