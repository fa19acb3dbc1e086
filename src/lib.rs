pub mod config;
pub mod db;
pub mod errors;
pub mod handler;
pub mod models;
pub mod routes;
pub mod utils;
