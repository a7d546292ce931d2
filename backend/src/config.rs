//! Runtime configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file
//! (`emr.toml`, or the path in `EMR_CONFIG`), then `EMR_`-prefixed environment
//! variables using `__` between nesting levels, e.g. `EMR_SERVER__PORT=9000`.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_CONFIG_FILE: &str = "emr.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum accepted JSON body in bytes. Logos travel inline as base64.
    pub json_limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file path, or `:memory:` for a throwaway store.
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub filter: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("EMR_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(Path::new(&path))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.json_limit", 10 * 1024 * 1024)?
            .set_default("database.path", "emr.sqlite")?
            .set_default("log.filter", "info")?;

        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        builder
            .add_source(
                Environment::with_prefix("EMR")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// `host:port` for `HttpServer::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_apply_without_a_file() {
        let config = AppConfig::load_from(Path::new("does-not-exist.toml")).unwrap();
        assert_eq!(config.database.path, "emr.sqlite");
        assert_eq!(config.server.json_limit, 10 * 1024 * 1024);
        assert_eq!(config.log.filter, "info");
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[server]\nport = 9100\n\n[database]\npath = \":memory:\"").unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.database.path, ":memory:");
    }
}
