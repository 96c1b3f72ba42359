use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub snapshot_table: String,
    #[serde(skip)]
    pub host: String,
    #[serde(skip)]
    pub port: u16,
    #[serde(skip)]
    pub dbname: String,
    #[serde(skip)]
    pub user: String,
    #[serde(skip)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    pub refresh_rate_ms: u64,
    #[serde(default = "default_compare_coins")]
    pub default_compare_coins: Vec<String>,
}

fn default_compare_coins() -> Vec<String> {
    vec![
        "bitcoin".to_string(),
        "ethereum".to_string(),
        "solana".to_string(),
    ]
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Validate that a configured table reference is a plain (optionally
/// schema-qualified) identifier, since it is spliced into the query text.
pub fn validate_table_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("database.snapshot_table must not be empty");
    }
    let valid = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    if !valid || name.starts_with('.') || name.ends_with('.') {
        bail!(
            "database.snapshot_table '{}' must be an identifier like 'schema.table'",
            name
        );
    }
    Ok(())
}

impl DatabaseConfig {
    /// libpq-style connection string for `postgres::Client::connect`.
    pub fn connection_string(&self) -> String {
        format!(
            "host={} port={} dbname={} user={} password={}",
            self.host, self.port, self.dbname, self.user, self.password
        )
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_path = Path::new("config/default.toml");
        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;

        let mut config: Config =
            toml::from_str(&config_str).context("failed to parse config/default.toml")?;

        config.database.host =
            std::env::var("DB_HOST").context("DB_HOST not set in .env or environment")?;
        config.database.port = std::env::var("DB_PORT")
            .context("DB_PORT not set in .env or environment")?
            .parse()
            .context("DB_PORT must be a port number")?;
        config.database.dbname =
            std::env::var("DB_NAME").context("DB_NAME not set in .env or environment")?;
        config.database.user =
            std::env::var("DB_USER").context("DB_USER not set in .env or environment")?;
        config.database.password =
            std::env::var("DB_PASSWORD").context("DB_PASSWORD not set in .env or environment")?;

        validate_table_name(&config.database.snapshot_table)
            .context("database.snapshot_table is invalid")?;

        Ok(config)
    }
}
