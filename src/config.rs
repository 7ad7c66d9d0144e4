use std::env;
use std::fmt;

/// 2 MiB, the limit the upload page ships with.
pub const DEFAULT_FILE_SIZE_LIMIT: u64 = 2_097_152;
/// Sizes are stored as BIGINT.
pub const MAX_FILE_SIZE_LIMIT: u64 = i64::MAX as u64;
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub file_size_limit: u64,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => write!(f, "{} has an invalid value: {:?}", key, value),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let file_size_limit = match lookup("FILE_SIZE_LIMIT") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(limit) if limit > 0 && limit <= MAX_FILE_SIZE_LIMIT => limit,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "FILE_SIZE_LIMIT",
                        value,
                    })
                }
            },
            None => DEFAULT_FILE_SIZE_LIMIT,
        };

        let bind_address = lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        Ok(Config {
            database_url,
            bind_address,
            file_size_limit,
        })
    }
}
