//! Runtime configuration read from the environment.

use std::fmt;

use thiserror::Error;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;
/// Requests slower than this many milliseconds are logged as warnings.
pub const DEFAULT_SLOW_REQUEST_MS: u64 = 500;

/// Errors raised while loading [`Config`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),
    /// A variable is set but cannot be parsed.
    #[error("Invalid value for environment variable {var}: {reason}")]
    InvalidEnvValue { var: &'static str, reason: String },
}

/// Settings for the relay.
#[derive(Clone)]
pub struct Config {
    /// Base URL of the data store, without trailing slash.
    pub store_url: String,
    /// Key sent to the data store as `apikey` and bearer token.
    pub store_key: String,
    /// Secret clients must present in `x-api-key`.
    pub api_key: String,
    /// Port to listen on.
    pub port: u16,
    /// Slow request threshold for the timing log, in milliseconds.
    pub slow_request_ms: u64,
}

impl Config {
    /// Loads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `SUPABASE_URL`,
    /// `SUPABASE_KEY` or `API_KEY` is missing, and
    /// [`ConfigError::InvalidEnvValue`] when `PORT` or `SLOW_REQUEST_MS`
    /// is not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingEnvVar(var))
        };

        let store_url = required("SUPABASE_URL")?.trim_end_matches('/').to_string();
        let store_key = required("SUPABASE_KEY")?;
        let api_key = required("API_KEY")?;
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let slow_request_ms = parse_or(&lookup, "SLOW_REQUEST_MS", DEFAULT_SLOW_REQUEST_MS)?;

        Ok(Self {
            store_url,
            store_key,
            api_key,
            port,
            slow_request_ms,
        })
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match lookup(var).filter(|v| !v.trim().is_empty()) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvValue {
                var,
                reason: e.to_string(),
            }),
        None => Ok(default),
    }
}

// Secrets stay out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("store_url", &self.store_url)
            .field("store_key", &"<redacted>")
            .field("api_key", &"<redacted>")
            .field("port", &self.port)
            .field("slow_request_ms", &self.slow_request_ms)
            .finish()
    }
}
