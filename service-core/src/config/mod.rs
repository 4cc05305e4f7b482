use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

/// Settings shared by every service binary.
///
/// Sources, lowest precedence first: an optional `configuration` file,
/// `APP__*` environment variables, then the bare `PORT`, `LOG_LEVEL` and
/// `OTLP_ENDPOINT` variables.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

fn default_port() -> u16 {
    8888
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .set_override_option("port", non_empty_env("PORT"))?
            .set_override_option("log_level", non_empty_env("LOG_LEVEL"))?
            .set_override_option("otlp_endpoint", non_empty_env("OTLP_ENDPOINT"))?
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
