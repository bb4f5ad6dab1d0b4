//! # Server settings
//!
//! Everything the server needs at startup is read from the process
//! environment (after `.env` has been loaded by the binary). Unset variables
//! fall back to the defaults below; malformed ones are startup errors.
//!
//! | variable | default |
//! |---|---|
//! | `API_HOST` | `0.0.0.0` |
//! | `API_PORT` | `3000` |
//! | `DATABASE_URL` | required |
//! | `DATABASE_MAX_CONNECTIONS` | `10` |
//! | `LOG_LEVEL` | `info` |
//! | `API_CORS_ORIGINS` | unset (no CORS layer), comma separated |
//! | `API_REQUEST_TIMEOUT_SECONDS` | `30` |
//! | `SESSION_TTL_HOURS` | `720` |
//! | `SHOP_TIMEZONE` | `Asia/Jakarta` |
//! | `SHOP_OPEN_HOUR` / `SHOP_CLOSE_HOUR` | `8` / `18` |

use std::env;
use std::str::FromStr;

use carport_core::scheduling::OperatingHours;
use chrono_tz::Tz;
use eyre::{Result, WrapErr, eyre};
use tracing::Level;

/// Settings for one server process
///
/// ```no_run
/// use carport_api::config::ApiConfig;
///
/// # fn main() -> eyre::Result<()> {
/// let config = ApiConfig::from_env()?;
/// println!("binding {}", config.server_addr());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,

    pub database_url: String,
    pub database_max_connections: u32,

    /// Maximum level passed to the tracing subscriber
    pub log_level: Level,

    /// `None` leaves CORS off entirely
    pub cors_origins: Option<Vec<String>>,

    /// Seconds before a request is answered with 408
    pub request_timeout: u64,

    /// Lifetime of a login session
    pub session_ttl_hours: i64,

    /// The workshop's daily service window
    pub operating_hours: OperatingHours,
}

/// `key` parsed as `T`, or `default` when unset.
fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .wrap_err_with(|| format!("Invalid {} value: {}", key, raw)),
        Err(_) => Ok(default),
    }
}

impl ApiConfig {
    /// Reads the settings from the environment.
    ///
    /// Fails when `DATABASE_URL` is missing or any numeric setting, the
    /// timezone or the opening hours do not parse.
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        let operating_hours = parse_operating_hours(
            &env::var("SHOP_TIMEZONE").unwrap_or_else(|_| "Asia/Jakarta".to_string()),
            &env::var("SHOP_OPEN_HOUR").unwrap_or_else(|_| "8".to_string()),
            &env::var("SHOP_CLOSE_HOUR").unwrap_or_else(|_| "18".to_string()),
        )?;

        Ok(Self {
            host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env_or("API_PORT", 3000)?,
            database_url,
            database_max_connections: env_or("DATABASE_MAX_CONNECTIONS", 10)?,
            log_level: parse_log_level(&env::var("LOG_LEVEL").unwrap_or_default()),
            cors_origins: env::var("API_CORS_ORIGINS")
                .ok()
                .map(|origins| parse_origins(&origins)),
            request_timeout: env_or("API_REQUEST_TIMEOUT_SECONDS", 30)?,
            session_ttl_hours: env_or("SESSION_TTL_HOURS", 720)?,
            operating_hours,
        })
    }

    /// `host:port` for the listener
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Unknown or empty levels fall back to `INFO`.
pub fn parse_log_level(level: &str) -> Level {
    level.trim().parse().unwrap_or(Level::INFO)
}

pub fn parse_origins(origins: &str) -> Vec<String> {
    origins
        .split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}

pub fn parse_operating_hours(timezone: &str, open_hour: &str, close_hour: &str) -> Result<OperatingHours> {
    let tz: Tz = timezone
        .trim()
        .parse()
        .map_err(|e| eyre!("Invalid SHOP_TIMEZONE {}: {}", timezone, e))?;
    let open_hour = open_hour.trim().parse().wrap_err("Invalid SHOP_OPEN_HOUR value")?;
    let close_hour = close_hour.trim().parse().wrap_err("Invalid SHOP_CLOSE_HOUR value")?;

    Ok(OperatingHours::new(tz, open_hour, close_hour)?)
}
