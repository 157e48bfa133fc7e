//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `HOST` - Bind address (default: 127.0.0.1)
//! - `PORT` - Listen port (default: 3000)
//! - `APP_ENV` - `production` disables test mode; anything else is development
//! - `BASE_URL` - Public URL of the site (default: `http://localhost:{PORT}`)
//! - `PUBLIC_DIR` - Static asset root (default: public)
//! - `SESSION_EXPIRY_HOURS` - Session inactivity expiry (default: 24)
//! - `SMTP_HOST` - SMTP relay; when unset, emails are only logged
//! - `SMTP_PORT` - SMTP port (default: 587)
//! - `SMTP_USERNAME` / `SMTP_PASSWORD` - SMTP credentials (required with `SMTP_HOST`)
//! - `EMAIL_FROM` - Sender address (required with `SMTP_HOST`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SESSION_EXPIRY_HOURS: i64 = 24;
const DEFAULT_SMTP_PORT: u16 = 587;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Parse an `APP_ENV` value. Only `production` (any case) is production.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }

    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Production => "production",
        })
    }
}

/// Site configuration.
///
/// Built once at startup and owned by [`crate::state::AppState`].
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Public base URL, used for links in emails and for cookie security
    pub base_url: String,
    /// Directory served as static assets
    pub public_dir: PathBuf,
    /// Session inactivity expiry in hours
    pub session_expiry_hours: i64,
    /// SMTP settings; `None` means emails are logged instead of sent
    pub email: Option<EmailConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

/// SMTP configuration for outgoing mail.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: SecretString,
    pub from_address: String,
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid, or if
    /// `SMTP_HOST` is set without the rest of the SMTP settings.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`SiteConfig::from_env`].
    pub fn from_lookup(env: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_or_default(env, "HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = parse_or_default(env, "PORT", DEFAULT_PORT)?;
        let environment = env("APP_ENV")
            .map(|value| Environment::parse(&value))
            .unwrap_or_default();
        let base_url = env("BASE_URL")
            .map_or_else(|| format!("http://localhost:{port}"), |url| {
                url.trim_end_matches('/').to_string()
            });
        let public_dir = PathBuf::from(get_env_or_default(env, "PUBLIC_DIR", "public"));
        let session_expiry_hours =
            parse_or_default(env, "SESSION_EXPIRY_HOURS", DEFAULT_SESSION_EXPIRY_HOURS)?;
        if session_expiry_hours <= 0 {
            return Err(ConfigError::InvalidEnvVar(
                "SESSION_EXPIRY_HOURS".to_string(),
                "must be positive".to_string(),
            ));
        }

        let email = EmailConfig::from_lookup(env)?;

        Ok(Self {
            host,
            port,
            environment,
            base_url,
            public_dir,
            session_expiry_hours,
            email,
            sentry_dsn: env("SENTRY_DSN"),
            sentry_environment: env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl EmailConfig {
    fn from_lookup(env: &dyn Fn(&str) -> Option<String>) -> Result<Option<Self>, ConfigError> {
        let Some(smtp_host) = env("SMTP_HOST") else {
            return Ok(None);
        };

        Ok(Some(Self {
            smtp_host,
            smtp_port: parse_or_default(env, "SMTP_PORT", DEFAULT_SMTP_PORT)?,
            smtp_username: get_required_env(env, "SMTP_USERNAME")?,
            smtp_password: SecretString::from(get_required_env(env, "SMTP_PASSWORD")?),
            from_address: get_required_env(env, "EMAIL_FROM")?,
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(env: &dyn Fn(&str) -> Option<String>, key: &str) -> Result<String, ConfigError> {
    env(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(env: &dyn Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_or_default<T>(
    env: &dyn Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    env(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
