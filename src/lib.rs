pub mod config;
pub mod db;
pub mod pagination;
pub mod server;
pub mod telemetry;
