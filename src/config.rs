use std::env;
use std::str::FromStr;

use crate::errors::AppError;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";
const DEFAULT_DATABASE_URL: &str = "sqlite://tasks.db?mode=rwc";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_SUGGEST_LIMIT: usize = 3;
const DEFAULT_JSON_LIMIT_BYTES: usize = 256 * 1024;

/// Upper bound for `?limit=` on the suggest endpoint.
pub const MAX_SUGGEST_LIMIT: usize = 50;

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: String,
    pub database_url: String,
    pub max_connections: u32,
    pub suggest_limit: usize,
    /// Empty means any origin is allowed.
    pub allowed_origins: Vec<String>,
    pub json_limit_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            suggest_limit: DEFAULT_SUGGEST_LIMIT,
            allowed_origins: Vec::new(),
            json_limit_bytes: DEFAULT_JSON_LIMIT_BYTES,
        }
    }
}

impl Config {
    /// Load `.env` (if any) and read settings from the environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let suggest_limit = parse_or(&lookup, "SUGGEST_LIMIT", defaults.suggest_limit)?;
        if suggest_limit == 0 || suggest_limit > MAX_SUGGEST_LIMIT {
            return Err(AppError::Config(format!(
                "SUGGEST_LIMIT must be between 1 and {}",
                MAX_SUGGEST_LIMIT
            )));
        }

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty() && *origin != "*")
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            bind_address: lookup("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections: parse_or(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                defaults.max_connections,
            )?,
            suggest_limit,
            allowed_origins,
            json_limit_bytes: parse_or(&lookup, "JSON_LIMIT_BYTES", defaults.json_limit_bytes)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} has an invalid value: {}", key, raw))),
    }
}
