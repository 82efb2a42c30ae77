//! Case statistics backend: spreadsheet import, aggregation, chart
//! rendering and slide-deck reports over a SQLite store.

pub mod config;
pub mod database;
pub mod errors;
pub mod narrative;
pub mod report;
pub mod server;
pub mod services;
pub mod stats;
