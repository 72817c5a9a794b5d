use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::core::{ProximityFilter, DEFAULT_PARALLEL_THRESHOLD};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub proximity: ProximitySettings,
    #[serde(default)]
    pub pagination: PaginationSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self { backend: default_backend() }
    }
}

fn default_backend() -> StorageBackend { StorageBackend::Postgres }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProximitySettings {
    #[serde(default = "default_prefilter")]
    pub prefilter: bool,
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
    /// Largest radius the API accepts; unbounded when unset
    pub max_radius_km: Option<f64>,
}

impl Default for ProximitySettings {
    fn default() -> Self {
        Self {
            prefilter: default_prefilter(),
            parallel_threshold: default_parallel_threshold(),
            max_radius_km: None,
        }
    }
}

impl ProximitySettings {
    pub fn filter(&self) -> ProximityFilter {
        ProximityFilter::new(self.prefilter, self.parallel_threshold)
    }
}

fn default_prefilter() -> bool { true }
fn default_parallel_threshold() -> usize { DEFAULT_PARALLEL_THRESHOLD }

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PaginationSettings {
    #[serde(default = "default_limit")]
    pub default_limit: u32,
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl PaginationSettings {
    /// Requested page size, or the default, capped at `max_limit`
    pub fn effective_limit(&self, requested: Option<u32>) -> u32 {
        requested.unwrap_or(self.default_limit).min(self.max_limit)
    }
}

fn default_limit() -> u32 { 10 }
fn default_max_limit() -> u32 { 100 }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with ADDRESSES__)
    /// 5. `DATABASE_URL`, which replaces `database.url`
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., ADDRESSES__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("ADDRESSES")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        override_database_url(settings, std::env::var("DATABASE_URL").ok())?.try_deserialize()
    }
}

/// `DATABASE_URL` wins over any configured database URL
fn override_database_url(settings: Config, url: Option<String>) -> Result<Config, ConfigError> {
    match url {
        Some(url) => Config::builder()
            .add_source(settings)
            .set_override("database.url", url)?
            .build(),
        None => Ok(settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn parse(toml: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    const MINIMAL: &str = r#"
        [server]
        host = "127.0.0.1"
        port = 8000

        [database]
        url = "postgres://localhost/addresses"
    "#;

    #[test]
    fn test_defaults() {
        let settings = parse(MINIMAL);

        assert_eq!(settings.storage.backend, StorageBackend::Postgres);
        assert!(settings.proximity.prefilter);
        assert_eq!(settings.proximity.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
        assert!(settings.proximity.max_radius_km.is_none());
        assert_eq!(settings.pagination.default_limit, 10);
        assert_eq!(settings.pagination.max_limit, 100);
    }

    #[test]
    fn test_overrides() {
        let settings = parse(&format!(
            "{}\n{}",
            MINIMAL,
            r#"
            [storage]
            backend = "memory"

            [proximity]
            prefilter = false
            parallel_threshold = 10
            max_radius_km = 500.0
            "#
        ));

        assert_eq!(settings.storage.backend, StorageBackend::Memory);
        assert!(!settings.proximity.prefilter);
        assert_eq!(settings.proximity.filter().parallel_threshold(), 10);
        assert_eq!(settings.proximity.max_radius_km, Some(500.0));
    }

    #[test]
    fn test_database_url_override() {
        let source = || {
            Config::builder()
                .add_source(File::from_str(MINIMAL, FileFormat::Toml))
                .build()
                .unwrap()
        };

        let settings: Settings = override_database_url(source(), Some("postgres://db:5432/other".to_string()))
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.database.url, "postgres://db:5432/other");
        assert_eq!(settings.server.port, 8000);

        let settings: Settings = override_database_url(source(), None)
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.database.url, "postgres://localhost/addresses");
    }

    #[test]
    fn test_effective_limit() {
        let pagination = PaginationSettings::default();
        assert_eq!(pagination.effective_limit(None), 10);
        assert_eq!(pagination.effective_limit(Some(25)), 25);
        assert_eq!(pagination.effective_limit(Some(5000)), 100);
    }
}
