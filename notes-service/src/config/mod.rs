use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

pub const DEFAULT_DB_URL: &str = "mongodb://localhost:27017/notes";

#[derive(Debug, Clone, Deserialize)]
pub struct NotesConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    /// Connection string; may carry credentials.
    pub uri: Secret<String>,
    /// Overrides the database named in `uri`.
    pub database: Option<String>,
}

impl NotesConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env, PORT and APP__ prefix)
        let common_config = core_config::Config::load()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let config = NotesConfig {
            common: common_config,
            mongodb: MongoConfig {
                uri: Secret::new(get_env("DB_URL", Some(DEFAULT_DB_URL), is_prod)?),
                database: env::var("DB_NAME").ok().filter(|v| !v.is_empty()),
            },
        };

        tracing::debug!(port = config.common.port, "Configuration loaded");
        Ok(config)
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    resolve(key, env::var(key).ok(), default, is_prod)
}

fn resolve(
    key: &str,
    value: Option<String>,
    default: Option<&str>,
    is_prod: bool,
) -> Result<String, AppError> {
    match value {
        Some(val) if !val.is_empty() => Ok(val),
        _ => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
