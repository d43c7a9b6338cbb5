//! HTTP server configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// HTTP listener, TLS, proxy and rate limiting settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    pub port: u16,

    pub read_timeout_seconds: u64,
    pub write_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,

    /// Serve HTTPS using `tls_cert_file` and `tls_key_file`
    pub tls_enabled: bool,
    pub tls_cert_file: String,
    pub tls_key_file: String,

    /// Trust forwarding headers from `trusted_proxies`
    pub behind_proxy: bool,
    pub trusted_proxies: Vec<String>,

    /// Requests per client per minute, 0 disables the limit
    pub rate_limit_requests_per_minute: u32,

    pub rate_limit_burst: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            read_timeout_seconds: 15,
            write_timeout_seconds: 15,
            idle_timeout_seconds: 60,
            tls_enabled: false,
            tls_cert_file: String::new(),
            tls_key_file: String::new(),
            behind_proxy: false,
            trusted_proxies: Vec::new(),
            rate_limit_requests_per_minute: 0,
            rate_limit_burst: 10,
        }
    }
}

impl ServerConfig {
    /// Returns the `host:port` pair to listen on
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ConfigSection for ServerConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut results = vec![
            Validator::not_empty(&self.host, "server.host"),
            Validator::at_least(self.port, 1, "server.port"),
            Validator::at_least(self.read_timeout_seconds, 1, "server.readTimeoutSeconds"),
            Validator::at_least(self.write_timeout_seconds, 1, "server.writeTimeoutSeconds"),
            Validator::at_least(self.idle_timeout_seconds, 1, "server.idleTimeoutSeconds"),
            Validator::required_if(
                self.tls_enabled,
                &self.tls_cert_file,
                "server.tlsCertFile",
                "server.tlsEnabled",
            ),
            Validator::required_if(
                self.tls_enabled,
                &self.tls_key_file,
                "server.tlsKeyFile",
                "server.tlsEnabled",
            ),
            Validator::at_least(self.rate_limit_burst, 1, "server.rateLimitBurst"),
        ];
        results.extend(Validator::entries_not_empty(
            &self.trusted_proxies,
            "server.trustedProxies",
        ));

        Validator::collect_errors(results)
    }

    fn section_name(&self) -> &'static str {
        "server"
    }
}
