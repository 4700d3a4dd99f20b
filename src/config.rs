use std::net::SocketAddr;

use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Process configuration, read once at startup and handed to the server.
#[derive(Debug)]
pub struct Settings {
    pub database_url: SecretString,
    pub bind_addr: SocketAddr,
    /// Create missing tables before serving.
    pub init_schema: bool,
}

#[derive(Deserialize)]
struct RawSettings {
    database_url: String,
    bind_addr: SocketAddr,
    init_schema: bool,
}

impl Settings {
    /// Defaults, then `trivia.toml` if present, then `TRIVIA_*` variables
    /// (a `.env` file counts as environment).
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let config = Config::builder()
            .set_default("bind_addr", DEFAULT_BIND_ADDR)?
            .set_default("init_schema", true)?
            .add_source(File::with_name("trivia").required(false))
            .add_source(Environment::with_prefix("TRIVIA"))
            .build()?;
        Self::from_config(config)
    }

    fn from_config(config: Config) -> Result<Self, ConfigError> {
        let raw: RawSettings = config.try_deserialize()?;
        Ok(Self {
            database_url: SecretString::from(raw.database_url),
            bind_addr: raw.bind_addr,
            init_schema: raw.init_schema,
        })
    }
}
