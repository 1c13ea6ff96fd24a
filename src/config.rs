//! Runtime configuration, read from the environment (and `.env` via dotenvy)

use std::env;
use std::str::FromStr;

use crate::error::ConfigError;

pub const DATABASE_URL_VAR: &str = "CYCLE_LOG_DATABASE_URL";
pub const MAX_CONNECTIONS_VAR: &str = "CYCLE_LOG_MAX_CONNECTIONS";
pub const LOG_FORMAT_VAR: &str = "CYCLE_LOG_LOG_FORMAT";

pub const DEFAULT_DATABASE_URL: &str = "sqlite://cycle-log.db?mode=rwc";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
  #[default]
  Pretty,
  Json,
}

impl FromStr for LogFormat {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "pretty" => Ok(Self::Pretty),
      "json" => Ok(Self::Json),
      other => Err(format!("Unknown log format: {}", other)),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
  pub database_url: String,
  pub max_connections: u32,
  pub log_format: LogFormat,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      database_url: DEFAULT_DATABASE_URL.to_string(),
      max_connections: DEFAULT_MAX_CONNECTIONS,
      log_format: LogFormat::default(),
    }
  }
}

impl AppConfig {
  /// Read configuration from the environment, falling back to defaults for
  /// unset variables. Set-but-invalid values are errors.
  pub fn from_env() -> Result<Self, ConfigError> {
    let defaults = Self::default();

    let database_url = env::var(DATABASE_URL_VAR)
      .ok()
      .filter(|v| !v.trim().is_empty())
      .unwrap_or(defaults.database_url);

    let max_connections = match env::var(MAX_CONNECTIONS_VAR) {
      Ok(raw) => raw
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| invalid(MAX_CONNECTIONS_VAR, &raw))?,
      Err(_) => defaults.max_connections,
    };

    let log_format = match env::var(LOG_FORMAT_VAR) {
      Ok(raw) => raw.parse().map_err(|_| invalid(LOG_FORMAT_VAR, &raw))?,
      Err(_) => defaults.log_format,
    };

    Ok(Self {
      database_url,
      max_connections,
      log_format,
    })
  }
}

fn invalid(name: &str, value: &str) -> ConfigError {
  ConfigError::Invalid {
    name: name.to_string(),
    value: value.to_string(),
  }
}
