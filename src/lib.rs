pub mod api;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod models;
pub mod processor;
pub mod simulator;
pub mod store;
pub mod ticker;
