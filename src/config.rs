use std::env;
use std::time::Duration;
use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub storage: StorageConfig,
    pub seed_data: bool,
    pub environment: Environment,
}

/// Where catalog rows live.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    Postgres(DatabaseConfig),
    /// No `DATABASE_URL` given: keep everything in process memory.
    InMemory,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Local,
    Production,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => DEFAULT_PORT,
        };

        if port == 0 {
            anyhow::bail!("PORT must be greater than 0");
        }

        let storage = match lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            Some(url) => StorageConfig::Postgres(DatabaseConfig::from_lookup(&url, &lookup)?),
            None => StorageConfig::InMemory,
        };

        let seed_data = match lookup("SEED_DATA") {
            Some(raw) => parse_bool(&raw).context("SEED_DATA must be true or false")?,
            None => true,
        };

        let environment = match lookup("ENV").unwrap_or_else(|| "local".to_string()).as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Local,
        };

        Ok(Config {
            port,
            storage,
            seed_data,
            environment,
        })
    }
}

impl DatabaseConfig {
    fn from_lookup<F>(url: &str, lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let connection_timeout_secs = match lookup("DATABASE_CONNECTION_TIMEOUT") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .context("DATABASE_CONNECTION_TIMEOUT must be a valid number of seconds")?,
            None => DEFAULT_CONNECTION_TIMEOUT_SECS,
        };

        let config = DatabaseConfig {
            url: normalize_database_url(url)?,
            max_connections,
            connection_timeout: Duration::from_secs(connection_timeout_secs),
        };
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_connections == 0 {
            anyhow::bail!("Max connections must be greater than 0");
        }

        if self.connection_timeout.as_secs() == 0 {
            anyhow::bail!("Connection timeout must be greater than 0");
        }

        Ok(())
    }
}

/// Rewrites the legacy `postgres://` scheme to `postgresql://` and rejects
/// anything that is not a PostgreSQL URL.
pub fn normalize_database_url(url: &str) -> Result<String> {
    let url = url.trim();

    if let Some(rest) = url.strip_prefix("postgres://") {
        return Ok(format!("postgresql://{}", rest));
    }

    if url.starts_with("postgresql://") {
        return Ok(url.to_string());
    }

    anyhow::bail!("DATABASE_URL must start with 'postgresql://' or 'postgres://'")
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => anyhow::bail!("unrecognized boolean '{}'", other),
    }
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}
