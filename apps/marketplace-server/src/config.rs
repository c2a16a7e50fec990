//! Server configuration: defaults, then an optional YAML file, then the
//! environment

use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Socket address the HTTP server binds to
    #[serde(default = "default_bind")]
    pub bind: String,

    /// SeaORM connection URL (`postgres://...` or `sqlite://...`)
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub marketplace: marketplace_service::Config,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit one JSON object per line instead of human-readable text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Layering, lowest precedence first: field defaults, the YAML file,
    /// `MARKETPLACE__*` variables (`__` separates nesting levels), then the
    /// bare `JWT_SECRET` and `DATABASE_URL` variables.
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed("MARKETPLACE__").split("__"))
            .merge(
                Env::raw()
                    .only(&["JWT_SECRET"])
                    .map(|_| "marketplace.jwt_secret".into()),
            )
            .merge(
                Env::raw()
                    .only(&["DATABASE_URL"])
                    .map(|_| "database_url".into()),
            )
            .extract()
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_database_url() -> String {
    "sqlite://marketplace.db?mode=rwc".to_string()
}

fn default_log_level() -> String {
    "info,sqlx=warn".to_string()
}
