//! Configuration module for the `qvapay` binary.
//!
//! Merges command-line flags, the optional TOML file and the environment
//! into one resolved [`ClientConfig`]. Flags win over the file, the file wins
//! over the environment.

pub mod file;

use crate::config::file::FileConfig;
use qvapay_sdk::client::ClientKind;
use qvapay_sdk::config::{ClientConfig, ConfigOverrides, EnvSource, TraceSink, TransportConfig};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown mode {0:?}, expected \"app\" or \"qvapay\"")]
    UnknownMode(String),
}

/// Values given on the command line. `None`/`false` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub mode: Option<String>,
    pub base_url: Option<String>,
    pub app_id: Option<String>,
    pub app_secret: Option<String>,
    pub insecure: bool,
    pub debug: bool,
    pub timeout: Option<u64>,
}

/// Loaded configuration: which client to build and how.
#[derive(Debug)]
pub struct LoadedConfig {
    pub kind: ClientKind,
    pub client: ClientConfig,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    overrides: CliOverrides,
}

impl ConfigLoader {
    pub fn new(config_path: Option<impl AsRef<Path>>, overrides: CliOverrides) -> Self {
        Self {
            config_path: config_path.map(|p| p.as_ref().to_path_buf()),
            overrides,
        }
    }

    /// Load and merge the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file, if one was given
    /// 2. Apply CLI overrides on top of it
    /// 3. Fall back to `env` for the base URL and credentials
    pub fn load(&self, env: &impl EnvSource) -> Result<LoadedConfig, ConfigError> {
        let file_config: FileConfig = match &self.config_path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                toml::from_str(&content)?
            }
            None => FileConfig::default(),
        };
        self.merge(file_config, env)
    }

    fn merge(&self, file: FileConfig, env: &impl EnvSource) -> Result<LoadedConfig, ConfigError> {
        let cli = self.overrides.clone();
        let section = file.client;

        let mode = cli
            .mode
            .or(section.mode)
            .unwrap_or_else(|| ClientKind::Merchant.to_string());
        let kind = mode
            .parse::<ClientKind>()
            .map_err(|_| ConfigError::UnknownMode(mode))?;

        let overrides = ConfigOverrides {
            base_url: non_empty(cli.base_url).or(non_empty(section.base_url)),
            app_id: non_empty(cli.app_id).or(non_empty(section.app_id)),
            app_secret: non_empty(cli.app_secret).or(non_empty(section.app_secret)),
        };

        let mut transport = TransportConfig::default().insecure(cli.insecure || section.insecure);
        if let Some(secs) = cli.timeout.or(section.timeout) {
            transport = transport.with_request_timeout(Duration::from_secs(secs));
        }

        let mut client = ClientConfig::resolve(overrides, env)
            .with_transport(transport)
            .with_compat(file.compat.to_compat());
        if cli.debug || section.debug {
            client = client.with_trace(TraceSink::stderr());
        }

        Ok(LoadedConfig { kind, client })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qvapay_sdk::config::{DEFAULT_BASE_URL, PaginationMode};
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn file(toml_str: &str) -> FileConfig {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let loader = ConfigLoader::new(None::<PathBuf>, CliOverrides::default());
        let loaded = loader.load(&env(&[])).unwrap();
        assert_eq!(loaded.kind, ClientKind::Merchant);
        assert_eq!(loaded.client.base_url, DEFAULT_BASE_URL);
        assert!(loaded.client.credentials.is_empty());
        assert!(loaded.client.trace.is_none());
        assert!(loaded.client.transport.request_timeout.is_none());
    }

    #[test]
    fn test_flag_beats_file_beats_env() {
        let vars = env(&[
            ("APP_ID", "env-id"),
            ("APP_SECRET", "env-secret"),
            ("QVAPAY_API", "http://env.example/api"),
        ]);
        let file_config = file(
            r#"
[client]
app_id = "file-id"
base_url = "http://file.example/api"
"#,
        );
        let loader = ConfigLoader::new(
            None::<PathBuf>,
            CliOverrides {
                app_id: Some("flag-id".into()),
                ..CliOverrides::default()
            },
        );
        let loaded = loader.merge(file_config, &vars).unwrap();
        assert_eq!(loaded.client.credentials.app_id(), "flag-id");
        assert_eq!(loaded.client.credentials.app_secret(), "env-secret");
        assert_eq!(loaded.client.base_url, "http://file.example/api");
    }

    #[test]
    fn test_empty_flag_falls_back() {
        let loader = ConfigLoader::new(
            None::<PathBuf>,
            CliOverrides {
                app_secret: Some(String::new()),
                ..CliOverrides::default()
            },
        );
        let loaded = loader
            .merge(FileConfig::default(), &env(&[("APP_SECRET", "env-secret")]))
            .unwrap();
        assert_eq!(loaded.client.credentials.app_secret(), "env-secret");
    }

    #[test]
    fn test_transport_and_compat_from_file() {
        let file_config = file(
            r#"
[client]
mode = "qvapay"
insecure = true
timeout = 5
debug = true

[compat]
offers_pagination = "first-page"
"#,
        );
        let loader = ConfigLoader::new(None::<PathBuf>, CliOverrides::default());
        let loaded = loader.merge(file_config, &env(&[])).unwrap();
        assert_eq!(loaded.kind, ClientKind::Account);
        assert!(loaded.client.transport.skip_tls_verify);
        assert_eq!(
            loaded.client.transport.request_timeout,
            Some(Duration::from_secs(5))
        );
        assert!(loaded.client.trace.is_some());
        assert_eq!(
            loaded.client.compat.offers_pagination,
            PaginationMode::DefaultFirstPage
        );
    }

    #[test]
    fn test_unknown_mode() {
        let loader = ConfigLoader::new(
            None::<PathBuf>,
            CliOverrides {
                mode: Some("paypal".into()),
                ..CliOverrides::default()
            },
        );
        assert!(matches!(
            loader.load(&env(&[])),
            Err(ConfigError::UnknownMode(mode)) if mode == "paypal"
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let loader = ConfigLoader::new(
            Some("/nonexistent/qvapay.toml"),
            CliOverrides::default(),
        );
        assert!(matches!(loader.load(&env(&[])), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("qvapay-cli-{}.toml", std::process::id()));
        std::fs::write(&path, "[client]\napp_id = \"disk-id\"\n").unwrap();
        let loader = ConfigLoader::new(Some(&path), CliOverrides::default());
        let loaded = loader.load(&env(&[]));
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.unwrap().client.credentials.app_id(), "disk-id");
    }
}
