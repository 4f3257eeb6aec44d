//! Process configuration, read from the environment.
//!
//! A `.env` file in the working directory is loaded first when present, so
//! local development needs no exported variables.

use std::{fmt, net::IpAddr, net::SocketAddr};

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Default weatherapi.com endpoint.
pub const DEFAULT_WEATHER_API_URL: &str = "https://api.weatherapi.com/v1";

/// Minimum secret length accepted for signing session cookies.
pub const MIN_SESSION_SECRET_LEN: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),

    #[error("environment variable {name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("SESSION_SECRET must be at least {MIN_SESSION_SECRET_LEN} bytes, got {0}")]
    SecretTooShort(usize),
}

/// Everything the server needs before it can accept requests.
#[derive(Clone)]
pub struct Config {
    pub bind_address: IpAddr,
    pub port: u16,
    pub database_url: String,
    pub session_secret: String,
    pub session_secure: bool,
    pub session_inactivity: time::Duration,
    pub weather_api_url: String,
    pub weather_api_key: String,
    pub admin_console: bool,
}

impl Config {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let session_secret = required("SESSION_SECRET")?;
        if session_secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(ConfigError::SecretTooShort(session_secret.len()));
        }

        let inactivity_days: i64 = parse_or(&lookup, "SESSION_INACTIVITY_DAYS", 7)?;

        Ok(Self {
            bind_address: parse_or(&lookup, "BIND_ADDRESS", IpAddr::from([127, 0, 0, 1]))?,
            port: parse_or(&lookup, "PORT", 5000)?,
            database_url: required("DATABASE_URL")?,
            session_secret,
            session_secure: parse_bool_or(&lookup, "SESSION_SECURE", false)?,
            session_inactivity: time::Duration::days(inactivity_days),
            weather_api_url: lookup("WEATHER_API_URL")
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_WEATHER_API_URL.to_string()),
            weather_api_key: required("WEATHER_API_KEY")?,
            admin_console: parse_bool_or(&lookup, "ADMIN_CONSOLE", true)?,
        })
    }

    /// Address the listener binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("port", &self.port)
            .field("database_url", &"<redacted>")
            .field("session_secret", &"<redacted>")
            .field("session_secure", &self.session_secure)
            .field("session_inactivity", &self.session_inactivity)
            .field("weather_api_url", &self.weather_api_url)
            .field("weather_api_key", &"<redacted>")
            .field("admin_console", &self.admin_console)
            .finish()
    }
}

/// Log filter built from `RUST_LOG` directives, `info` when unset or invalid.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name).filter(|value| !value.is_empty()) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

fn parse_bool_or<F>(lookup: &F, name: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name).filter(|value| !value.is_empty()) {
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid { name, value }),
        },
        None => Ok(default),
    }
}
