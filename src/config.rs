use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use serde::Deserialize;

use crate::database::DatabaseConfig;

/// Top-level application configuration loaded from file + environment.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub router: RouterSection,
    pub database: DatabaseSection,
    pub logging: LoggingSection,
}

impl AppConfig {
    /// Load configuration from disk and environment.
    pub fn load() -> Result<Self> {
        let config_path =
            env::var("LITEPOLIS_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        let mut builder = config::Config::builder();

        if Path::new(&config_path).exists() {
            builder = builder.add_source(config::File::from(PathBuf::from(&config_path)));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("LITEPOLIS")
                .separator("_")
                .try_parsing(true),
        );

        let settings = builder.build()?;
        let mut config: Self = settings.try_deserialize()?;

        if config.logging.level.trim().is_empty() {
            config.logging.level = "info".to_string();
        }

        Ok(config)
    }

    /// Resolve the database backend configuration.
    pub fn database_runtime(&self) -> Result<DatabaseConfig> {
        self.database.to_runtime()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Attach a permissive CORS layer
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RouterSection {
    /// Path the route table is mounted under
    pub prefix: String,
}

impl Default for RouterSection {
    fn default() -> Self {
        Self {
            prefix: "/api/example".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DatabaseSection {
    pub backend: DatabaseBackendKind,
    pub path: Option<String>,
}

impl DatabaseSection {
    pub fn to_runtime(&self) -> Result<DatabaseConfig> {
        match self.backend {
            DatabaseBackendKind::Memory => Ok(DatabaseConfig::Memory),
            DatabaseBackendKind::File => {
                let path = self.path.as_deref().map(str::trim).unwrap_or_default();
                if path.is_empty() {
                    bail!("database.path must be specified when backend is 'file'");
                }
                Ok(DatabaseConfig::File {
                    path: PathBuf::from(path),
                })
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackendKind {
    #[default]
    Memory,
    File,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}
