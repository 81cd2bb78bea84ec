//! Connection pool and TLS settings.

use std::time::Duration;

/// Settings for the pooled HTTP transport, tuned for repeated calls to one
/// host. Responses are never compressed: no content codec is compiled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Accept any server certificate. Must be asked for explicitly.
    pub skip_tls_verify: bool,
    /// Idle keep-alive connections kept per host.
    pub max_idle_per_host: usize,
    /// How long an idle connection stays in the pool.
    pub idle_timeout: Duration,
    /// Bound on TCP connect plus TLS handshake.
    pub connect_timeout: Duration,
    /// Bound on a whole request, if any.
    pub request_timeout: Option<Duration>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            skip_tls_verify: false,
            max_idle_per_host: 256,
            idle_timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

impl TransportConfig {
    pub fn insecure(mut self, skip_tls_verify: bool) -> Self {
        self.skip_tls_verify = skip_tls_verify;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}
