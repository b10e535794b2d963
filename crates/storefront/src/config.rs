//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_STATIC_DIR` - Static asset directory (default: crates/storefront/static)
//! - `CATALOG_SOURCE` - Catalog file path or `http(s)` URL (default: data/products.json)
//! - `TOAST_DURATION_SECS` - How long notifications stay up, 1 to 60 (default: 3)
//! - `PAGE_IDLE_TIMEOUT_SECS` - Idle time before a page session is dropped (default: 1800)
//! - `MAX_PAGE_SESSIONS` - Upper bound on live page sessions (default: 10000)
//! - `SEARCH_CARD_STYLE` - `search` or `grid` markup for search results (default: search)
//! - `IDENTITY_REDIRECT_PATH` - Where to send shoppers after identity login; unset disables it
//! - `PAYMENT_PUBLIC_KEY` - Payment provider public key
//! - `PAYMENT_SECRET_KEY` - Payment provider secret key; `sk_live_` keys make hand-offs live (placeholder and entropy checked)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0 to 1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0 to 1.0 (default: 0.1)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

use crate::catalog::CatalogSource;
use crate::render::CardStyle;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Longest a toast may stay on screen.
const MAX_TOAST_DURATION_SECS: u64 = 60;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
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
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Where the product catalog is loaded from
    pub catalog_source: CatalogSource,
    /// Per-page behavior
    pub pages: PageConfig,
    /// Payment hand-off settings
    pub payment: PaymentConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry transaction sample rate
    pub sentry_traces_sample_rate: f32,
}

/// Settings applied to every page session.
#[derive(Debug, Clone)]
pub struct PageConfig {
    pub toast_duration: Duration,
    pub idle_timeout: Duration,
    pub max_sessions: u64,
    pub search_card_style: CardStyle,
    pub identity_redirect_path: Option<String>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            toast_duration: Duration::from_secs(3),
            idle_timeout: Duration::from_secs(1800),
            max_sessions: 10_000,
            search_card_style: CardStyle::SearchResult,
            identity_redirect_path: None,
        }
    }
}

/// Payment provider configuration.
///
/// Implements `Debug` manually to redact the secret key.
#[derive(Clone, Default)]
pub struct PaymentConfig {
    /// Public key (safe to expose in the browser)
    pub public_key: Option<String>,
    /// Secret key (server-side only)
    pub secret_key: Option<SecretString>,
}

impl std::fmt::Debug for PaymentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentConfig")
            .field("public_key", &self.public_key)
            .field(
                "secret_key",
                &self.secret_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is invalid or the payment secret
    /// fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or_default::<IpAddr>("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env_or_default::<u16>("STOREFRONT_PORT", "3000")?;
        let static_dir = PathBuf::from(get_env_or_default(
            "STOREFRONT_STATIC_DIR",
            "crates/storefront/static",
        ));
        let catalog_source =
            CatalogSource::parse(&get_env_or_default("CATALOG_SOURCE", "data/products.json"))
                .map_err(|e| {
                    ConfigError::InvalidEnvVar("CATALOG_SOURCE".to_string(), e.to_string())
                })?;

        let pages = PageConfig::from_env()?;
        let payment = PaymentConfig::from_env()?;

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = parse_sample_rate("SENTRY_SAMPLE_RATE", "1.0")?;
        let sentry_traces_sample_rate = parse_sample_rate("SENTRY_TRACES_SAMPLE_RATE", "0.1")?;

        Ok(Self {
            host,
            port,
            static_dir,
            catalog_source,
            pages,
            payment,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl PageConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let toast_duration =
            toast_duration_from_secs(parse_env_or_default::<u64>("TOAST_DURATION_SECS", "3")?)?;
        let idle_timeout =
            Duration::from_secs(parse_env_or_default::<u64>("PAGE_IDLE_TIMEOUT_SECS", "1800")?);
        let max_sessions = parse_env_or_default::<u64>("MAX_PAGE_SESSIONS", "10000")?;
        let search_card_style = parse_env_or_default::<CardStyle>("SEARCH_CARD_STYLE", "search")?;
        let identity_redirect_path = get_optional_env("IDENTITY_REDIRECT_PATH");

        if let Some(path) = &identity_redirect_path
            && !path.starts_with('/')
        {
            return Err(ConfigError::InvalidEnvVar(
                "IDENTITY_REDIRECT_PATH".to_string(),
                "must be an absolute path starting with '/'".to_string(),
            ));
        }

        Ok(Self {
            toast_duration,
            idle_timeout,
            max_sessions,
            search_card_style,
            identity_redirect_path,
        })
    }
}

impl PaymentConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret_key = get_optional_env("PAYMENT_SECRET_KEY")
            .map(|value| {
                validate_secret_strength(&value, "PAYMENT_SECRET_KEY")?;
                Ok(SecretString::from(value))
            })
            .transpose()?;

        Ok(Self {
            public_key: get_optional_env("PAYMENT_PUBLIC_KEY"),
            secret_key,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable; empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a Sentry sample rate and check it is within 0.0..=1.0.
fn parse_sample_rate(key: &str, default: &str) -> Result<f32, ConfigError> {
    let rate = parse_env_or_default::<f32>(key, default)?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("{rate} is outside 0.0..=1.0"),
        ))
    }
}

/// Check a toast duration is within 1..=`MAX_TOAST_DURATION_SECS`.
fn toast_duration_from_secs(secs: u64) -> Result<Duration, ConfigError> {
    if (1..=MAX_TOAST_DURATION_SECS).contains(&secs) {
        Ok(Duration::from_secs(secs))
    } else {
        Err(ConfigError::InvalidEnvVar(
            "TOAST_DURATION_SECS".to_string(),
            format!("{secs} is outside 1..={MAX_TOAST_DURATION_SECS}"),
        ))
    }
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
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use the key issued by the payment provider."
            ),
        ));
    }

    Ok(())
}
