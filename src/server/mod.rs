pub mod app;
mod deserializers;
pub mod error;
mod extractors;
mod format;
mod routes;
