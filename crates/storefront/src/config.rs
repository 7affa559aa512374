//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//! - `WOO_GRAPHQL_ENDPOINT` - WooCommerce (WPGraphQL) endpoint URL
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `WOO_AUTH_TOKEN` - Bearer token for authenticated GraphQL access
//! - `CATALOG_PAGE_SIZE` - Items per listing page (default: 24)
//! - `CATALOG_ATTRIBUTES` - Comma-separated filterable attribute taxonomies
//!   (default: `pa_colour,pa_size`)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
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

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// WooCommerce GraphQL API configuration
    pub woo: WooConfig,
    /// Catalog listing configuration
    pub catalog: CatalogSettings,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// WooCommerce GraphQL API configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct WooConfig {
    /// WPGraphQL endpoint URL (e.g. <https://shop.example/graphql>)
    pub endpoint: String,
    /// Bearer token for authenticated access; public catalog queries work
    /// without one
    pub auth_token: Option<SecretString>,
}

impl std::fmt::Debug for WooConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WooConfig")
            .field("endpoint", &self.endpoint)
            .field(
                "auth_token",
                &self.auth_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Catalog listing configuration.
#[derive(Debug, Clone)]
pub struct CatalogSettings {
    /// Items per listing page
    pub page_size: u32,
    /// Filterable attribute taxonomy keys (e.g. `pa_colour`)
    pub attributes: Vec<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the auth token fails validation (placeholder detection, entropy
    /// check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_required_env("STOREFRONT_BASE_URL")?;
        Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), e.to_string())
        })?;

        let woo = WooConfig::from_env()?;
        let catalog = CatalogSettings::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            base_url,
            woo,
            catalog,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Build the absolute URL of a listing page from its path and the raw
    /// request query string.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL cannot be parsed, which
    /// `from_env` already rules out.
    pub fn listing_url(&self, path: &str, query: Option<&str>) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.base_url)?;
        url.set_path(path);
        url.set_query(query.filter(|q| !q.is_empty()));
        Ok(url)
    }
}

impl WooConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let endpoint = get_required_env("WOO_GRAPHQL_ENDPOINT")?;
        Url::parse(&endpoint).map_err(|e| {
            ConfigError::InvalidEnvVar("WOO_GRAPHQL_ENDPOINT".to_string(), e.to_string())
        })?;

        let auth_token = match get_optional_env("WOO_AUTH_TOKEN") {
            Some(token) => {
                validate_secret_strength(&token, "WOO_AUTH_TOKEN")?;
                Some(SecretString::from(token))
            }
            None => None,
        };

        Ok(Self {
            endpoint,
            auth_token,
        })
    }

    /// The token to send in the `Authorization` header, if configured.
    #[must_use]
    pub fn bearer_token(&self) -> Option<String> {
        self.auth_token
            .as_ref()
            .map(|t| t.expose_secret().to_string())
    }
}

impl CatalogSettings {
    fn from_env() -> Result<Self, ConfigError> {
        let page_size = get_env_or_default("CATALOG_PAGE_SIZE", "24")
            .parse::<u32>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CATALOG_PAGE_SIZE".to_string(), e.to_string())
            })?;
        if page_size == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "CATALOG_PAGE_SIZE".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let attributes = get_env_or_default("CATALOG_ATTRIBUTES", "pa_colour,pa_size")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            page_size,
            attributes,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
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
    let len = s.len() as f64;
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

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real tokens have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a real API token."
            ),
        ));
    }

    Ok(())
}
