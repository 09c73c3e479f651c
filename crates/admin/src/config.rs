//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `RENTDESK_API_URL` - Base URL of the backend admin API (e.g. `https://api.example.com/api`)
//! - `RENTDESK_API_TOKEN` - Bearer token for the backend admin API (HIGH PRIVILEGE)
//! - `ADMIN_BASE_URL` - Public URL for the dashboard
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `RENTDESK_API_TIMEOUT_SECS` - Backend request timeout (default: 30)
//! - `ADMIN_PER_PAGE` - Default rows per list page (default: 15, max 100)
//! - `ADMIN_LOG_FORMAT` - `json` for structured logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT`, `SENTRY_SAMPLE_RATE`, `SENTRY_TRACES_SAMPLE_RATE`
//!
//! ## Optional (TLS)
//! - `ADMIN_TLS_CERT` - PEM-encoded certificate chain
//! - `ADMIN_TLS_KEY` - PEM-encoded private key

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use rentdesk_core::clamp_per_page;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.0;
const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "put-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the dashboard
    pub base_url: String,
    /// Backend admin API configuration
    pub api: ApiConfig,
    /// Default page size for list pages
    pub per_page: u32,
    /// Emit JSON logs instead of text
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
    /// TLS configuration for HTTPS (optional)
    pub tls: Option<TlsConfig>,
}

/// Backend admin API configuration.
///
/// Implements `Debug` manually to redact the HIGH PRIVILEGE token.
#[derive(Clone)]
pub struct ApiConfig {
    /// Base URL every `/admin/...` path is joined onto
    pub base_url: Url,
    /// Bearer token
    pub token: SecretString,
    /// Per-request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ApiConfig {
    /// Build an API configuration directly (used by the CLI and tests).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `base_url` is not an absolute URL.
    pub fn new(base_url: &str, token: SecretString, timeout: Duration) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("RENTDESK_API_URL", base_url)?,
            token,
            timeout,
        })
    }

    /// Load only the backend settings from the environment (used by the CLI).
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `RENTDESK_API_URL` or `RENTDESK_API_TOKEN` is
    /// missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = required(lookup, "RENTDESK_API_URL")?;
        let base_url = parse_base_url("RENTDESK_API_URL", &raw_url)?;
        let token = required(lookup, "RENTDESK_API_TOKEN")?;
        validate_secret_strength(&token, "RENTDESK_API_TOKEN")?;
        let timeout_secs = lookup("RENTDESK_API_TIMEOUT_SECS")
            .map(|s| {
                s.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar("RENTDESK_API_TIMEOUT_SECS".to_string(), e.to_string())
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_API_TIMEOUT_SECS);

        Ok(Self {
            base_url,
            token: SecretString::from(token),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// TLS configuration for HTTPS.
#[derive(Clone)]
pub struct TlsConfig {
    /// PEM-encoded certificate chain
    pub cert_pem: String,
    /// PEM-encoded private key
    pub key_pem: SecretString,
}

impl std::fmt::Debug for TlsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsConfig")
            .field("cert_pem", &"[CERTIFICATE]")
            .field("key_pem", &"[REDACTED]")
            .finish()
    }
}

impl TlsConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Option<Self>, ConfigError> {
        match (lookup("ADMIN_TLS_CERT"), lookup("ADMIN_TLS_KEY")) {
            (Some(cert), Some(key)) => Ok(Some(Self {
                cert_pem: cert,
                key_pem: SecretString::from(key),
            })),
            (None, None) => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "ADMIN_TLS_*".to_string(),
                "Both ADMIN_TLS_CERT and ADMIN_TLS_KEY must be set together".to_string(),
            )),
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the API token fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`AdminConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("ADMIN_HOST")
            .unwrap_or_else(|| "127.0.0.1".to_string())
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = lookup("ADMIN_PORT")
            .unwrap_or_else(|| "3001".to_string())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_string(), e.to_string()))?;
        let base_url = required(&lookup, "ADMIN_BASE_URL")?;
        let api = ApiConfig::from_lookup(&lookup)?;
        let per_page = lookup("ADMIN_PER_PAGE")
            .map(|s| {
                s.parse::<u32>().map_err(|e| {
                    ConfigError::InvalidEnvVar("ADMIN_PER_PAGE".to_string(), e.to_string())
                })
            })
            .transpose()?;
        let log_json = lookup("ADMIN_LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json"));
        let sentry_dsn = lookup("SENTRY_DSN").filter(|s| !s.is_empty());
        let sentry_environment = lookup("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = lookup("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = lookup("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.1);
        let tls = TlsConfig::from_lookup(&lookup)?;

        Ok(Self {
            host,
            port,
            base_url,
            api,
            per_page: clamp_per_page(per_page),
            log_json,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
            tls,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies should be marked `Secure`.
    #[must_use]
    pub fn is_https(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String, ConfigError> {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Parse a base URL, normalising it to end with `/` so relative joins keep its path.
fn parse_base_url(var_name: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    let url = Url::parse(&normalized)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use the token issued by the backend."
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const GOOD_TOKEN: &str = "rd_live_9fK2mQ7xLp3ZbV8nT4wY1cR6";

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn minimal() -> Vec<(&'static str, &'static str)> {
        vec![
            ("RENTDESK_API_URL", "https://api.rentdesk.test/api"),
            ("RENTDESK_API_TOKEN", GOOD_TOKEN),
            ("ADMIN_BASE_URL", "http://localhost:3001"),
        ]
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-api-token-here", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        assert!(validate_secret_strength(GOOD_TOKEN, "TEST_VAR").is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = AdminConfig::from_lookup(env(&minimal())).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3001");
        assert_eq!(config.per_page, 15);
        assert_eq!(config.api.timeout, Duration::from_secs(30));
        assert!(!config.log_json);
        assert!(config.tls.is_none());
        assert!(!config.is_https());
    }

    #[test]
    fn test_api_base_url_gets_trailing_slash() {
        let config = AdminConfig::from_lookup(env(&minimal())).unwrap();
        assert_eq!(config.api.base_url.as_str(), "https://api.rentdesk.test/api/");
        assert_eq!(
            config.api.base_url.join("admin/bookings").unwrap().as_str(),
            "https://api.rentdesk.test/api/admin/bookings"
        );
    }

    #[test]
    fn test_missing_api_url() {
        let mut pairs = minimal();
        pairs.retain(|(k, _)| *k != "RENTDESK_API_URL");
        let err = AdminConfig::from_lookup(env(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == "RENTDESK_API_URL"));
    }

    #[test]
    fn test_rejects_non_http_api_url() {
        let mut pairs = minimal();
        pairs.push(("RENTDESK_API_URL", "ftp://api.rentdesk.test"));
        pairs.remove(0);
        assert!(AdminConfig::from_lookup(env(&pairs)).is_err());
    }

    #[test]
    fn test_per_page_is_clamped() {
        let mut pairs = minimal();
        pairs.push(("ADMIN_PER_PAGE", "500"));
        let config = AdminConfig::from_lookup(env(&pairs)).unwrap();
        assert_eq!(config.per_page, 100);
    }

    #[test]
    fn test_tls_requires_both_parts() {
        let mut pairs = minimal();
        pairs.push(("ADMIN_TLS_CERT", "-----BEGIN CERTIFICATE-----"));
        assert!(AdminConfig::from_lookup(env(&pairs)).is_err());
    }

    #[test]
    fn test_api_config_debug_redacts_token() {
        let config = ApiConfig::new(
            "https://api.rentdesk.test",
            SecretString::from("super_secret_backend_token"),
            Duration::from_secs(5),
        )
        .unwrap();

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("api.rentdesk.test"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_backend_token"));
    }
}
