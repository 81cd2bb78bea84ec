//! Client configuration.
//!
//! Everything here is resolved once, before a client is built, and is never
//! mutated afterwards. Reading files and command-line flags is left to the
//! binary; the only environment access goes through an [`EnvSource`] the
//! caller hands to [`ClientConfig::resolve`].

mod compat;
mod credentials;
mod trace;
mod transport;

pub use compat::{AmountFormat, CompatConfig, InvoiceSignature, PaginationMode};
pub use credentials::Credentials;
pub use trace::TraceSink;
pub use transport::TransportConfig;

use std::collections::HashMap;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://qvapay.com/api";

/// Version segment of the merchant endpoint family.
pub const API_VERSION: &str = "v1";

/// Environment variable holding the application id.
pub const APP_ID_VAR: &str = "APP_ID";

/// Environment variable holding the application secret.
pub const APP_SECRET_VAR: &str = "APP_SECRET";

/// Environment variable overriding the API root.
pub const BASE_URL_VAR: &str = "QVAPAY_API";

/// Read-only view of environment variables.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Values supplied explicitly by the caller. Empty strings count as unset.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub app_id: Option<String>,
    pub app_secret: Option<String>,
}

/// Fully resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, e.g. `https://qvapay.com/api`. Validated on first use.
    pub base_url: String,
    /// Version segment inserted between the root and the route.
    pub api_version: String,
    pub credentials: Credentials,
    pub transport: TransportConfig,
    pub compat: CompatConfig,
    /// Optional sink receiving a dump of every request and response.
    pub trace: Option<TraceSink>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: API_VERSION.to_string(),
            credentials: Credentials::default(),
            transport: TransportConfig::default(),
            compat: CompatConfig::default(),
            trace: None,
        }
    }
}

impl ClientConfig {
    /// Create a configuration with the given root and credentials and
    /// defaults for everything else.
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
            ..Self::default()
        }
    }

    /// Resolve a configuration: explicit values win, empty or missing ones
    /// fall back to `env`, and the base URL finally falls back to
    /// [`DEFAULT_BASE_URL`]. Credentials stay empty when neither is set.
    pub fn resolve(overrides: ConfigOverrides, env: &impl EnvSource) -> Self {
        let base_url = pick(overrides.base_url, env, BASE_URL_VAR)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let credentials = Credentials::new(
            pick(overrides.app_id, env, APP_ID_VAR).unwrap_or_default(),
            pick(overrides.app_secret, env, APP_SECRET_VAR).unwrap_or_default(),
        );
        Self::new(base_url, credentials)
    }

    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_compat(mut self, compat: CompatConfig) -> Self {
        self.compat = compat;
        self
    }

    pub fn with_trace(mut self, sink: TraceSink) -> Self {
        self.trace = Some(sink);
        self
    }
}

fn pick(explicit: Option<String>, env: &impl EnvSource, key: &str) -> Option<String> {
    explicit
        .filter(|value| !value.is_empty())
        .or_else(|| env.var(key).filter(|value| !value.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_explicit_values_win_over_environment() {
        let overrides = ConfigOverrides {
            base_url: Some("http://localhost:9000/api".into()),
            app_id: Some("explicit-id".into()),
            app_secret: Some("explicit-secret".into()),
        };
        let env = env(&[
            (APP_ID_VAR, "env-id"),
            (APP_SECRET_VAR, "env-secret"),
            (BASE_URL_VAR, "http://env/api"),
        ]);
        let config = ClientConfig::resolve(overrides, &env);
        assert_eq!(config.base_url, "http://localhost:9000/api");
        assert_eq!(config.credentials.app_id(), "explicit-id");
        assert_eq!(config.credentials.app_secret(), "explicit-secret");
    }

    #[test]
    fn test_empty_explicit_values_fall_back_to_environment() {
        let overrides = ConfigOverrides {
            base_url: None,
            app_id: Some(String::new()),
            app_secret: None,
        };
        let env = env(&[(APP_ID_VAR, "env-id"), (APP_SECRET_VAR, "env-secret")]);
        let config = ClientConfig::resolve(overrides, &env);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.credentials.app_id(), "env-id");
        assert_eq!(config.credentials.app_secret(), "env-secret");
    }

    #[test]
    fn test_unresolved_credentials_stay_empty() {
        let config = ClientConfig::resolve(ConfigOverrides::default(), &HashMap::new());
        assert!(config.credentials.is_empty());
        assert_eq!(config.api_version, API_VERSION);
        assert!(config.trace.is_none());
        assert!(!config.transport.skip_tls_verify);
    }
}
