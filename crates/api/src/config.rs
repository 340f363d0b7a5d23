use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

/// Runtime settings, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub gql: GqlConfig,
    pub seed_data: bool,
    pub allowed_origins: Vec<String>,
    pub request_timeout_secs: u64,
}

/// Knobs for schema construction.
#[derive(Clone, Debug)]
pub struct GqlConfig {
    /// Reject queries whose complexity exceeds `max_complexity`.
    pub analyze_complexity: bool,
    pub max_complexity: usize,
    pub max_depth: usize,
    pub introspection: bool,
    pub tracing: bool,
    /// Attach complexity and depth of each query to the response extensions.
    pub complexity_report: bool,
}

impl Default for GqlConfig {
    fn default() -> Self {
        Self {
            analyze_complexity: true,
            max_complexity: 200,
            max_depth: 15,
            introspection: false,
            tracing: false,
            complexity_report: false,
        }
    }
}

impl GqlConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            analyze_complexity: var_or("GQL_ANALYZE_COMPLEXITY", defaults.analyze_complexity)?,
            max_complexity: var_or("GQL_MAX_COMPLEXITY", defaults.max_complexity)?,
            max_depth: var_or("GQL_MAX_DEPTH", defaults.max_depth)?,
            introspection: var_or("GQL_INTROSPECTION", defaults.introspection)?,
            tracing: var_or("GQL_TRACING", defaults.tracing)?,
            complexity_report: var_or("GQL_COMPLEXITY_REPORT", defaults.complexity_report)?,
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://localhost:3001".to_string())
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            port: var_or("PORT", 8080)?,
            gql: GqlConfig::from_env()?,
            seed_data: var_or("SEED_DATA", true)?,
            allowed_origins,
            request_timeout_secs: var_or("REQUEST_TIMEOUT_SECS", 30)?,
        })
    }
}

fn var_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .to_lowercase()
        .parse()
        .with_context(|| format!("{key} has an invalid value: {raw:?}"))
}
