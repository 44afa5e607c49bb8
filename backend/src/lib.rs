pub mod api;
pub mod clients;
pub mod config;
pub mod cost;
pub mod db;

pub mod error;
pub mod logger;
