use anyhow::{anyhow, Context};
use sales_repo::month::ReferenceYear;
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use std::{env, fs};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MAX_POOL_SIZE: u32 = 10;
pub const DEFAULT_SEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

#[derive(Deserialize, Debug, PartialEq)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Without a database URL transactions are kept in memory.
    pub database_url: Option<String>,
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,
    #[serde(default = "default_seed_url")]
    pub seed_url: String,
    #[serde(default = "default_reference_year")]
    pub reference_year: i32,
    pub honeycomb_api_key: Option<String>,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_max_pool_size() -> u32 {
    DEFAULT_MAX_POOL_SIZE
}

fn default_seed_url() -> String {
    DEFAULT_SEED_URL.to_owned()
}

fn default_reference_year() -> i32 {
    ReferenceYear::DEFAULT.year()
}

impl Config {
    pub fn from_file(path: PathBuf) -> Result<Config, anyhow::Error> {
        let config = fs::read_to_string(path).context("Unable to read config file")?;
        Config::from_toml(config.as_str())
    }

    pub fn from_toml(config: &str) -> Result<Config, anyhow::Error> {
        let config: Config = toml::from_str(config).with_context(|| "Unable to parse config")?;
        Ok(config)
    }

    pub fn from_env() -> Result<Config, anyhow::Error> {
        let config = Config {
            port: read_env_or("PORT", DEFAULT_PORT)?,
            database_url: env::var("DATABASE_URL").ok(),
            max_pool_size: read_env_or("MAX_POOL_SIZE", DEFAULT_MAX_POOL_SIZE)?,
            seed_url: env::var("SEED_URL").unwrap_or_else(|_| default_seed_url()),
            reference_year: read_env_or("REFERENCE_YEAR", default_reference_year())?,
            honeycomb_api_key: env::var("HONEYCOMB_API_KEY").ok(),
        };
        Ok(config)
    }

    /// `PORT` from the environment wins over the configured port.
    pub fn with_port_from_env(mut self) -> Result<Config, anyhow::Error> {
        self.port = read_env_or("PORT", self.port)?;
        Ok(self)
    }

    pub fn reference_year(&self) -> Result<ReferenceYear, anyhow::Error> {
        ReferenceYear::new(self.reference_year)
            .ok_or_else(|| anyhow!("Unsupported reference year {}", self.reference_year))
    }
}

fn read_env_or<T>(key: &str, default: T) -> Result<T, anyhow::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("Unable to parse env var: {}", key)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(
            config,
            Config {
                port: 5000,
                database_url: None,
                max_pool_size: 10,
                seed_url: DEFAULT_SEED_URL.to_string(),
                reference_year: 2024,
                honeycomb_api_key: None,
            }
        );
    }

    #[test]
    fn full_config() {
        let config = Config::from_toml(
            r#"
            port = 8080
            database_url = "postgres://sales@localhost/sales"
            max_pool_size = 4
            seed_url = "http://localhost:9000/seed.json"
            reference_year = 2021
            honeycomb_api_key = "key"
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://sales@localhost/sales")
        );
        assert_eq!(config.max_pool_size, 4);
        assert_eq!(config.seed_url, "http://localhost:9000/seed.json");
        assert_eq!(config.reference_year().unwrap().year(), 2021);
        assert_eq!(config.honeycomb_api_key.as_deref(), Some("key"));
    }

    #[test]
    fn invalid_reference_year() {
        let config = Config::from_toml("reference_year = 2147483647").unwrap();
        assert!(config.reference_year().is_err());
    }

    // Only test touching PORT, so it cannot race with another reader.
    #[test]
    fn port_env_overrides_config_file() {
        let config = Config::from_toml("port = 8080").unwrap();

        env::set_var("PORT", "9090");
        let overridden = Config::from_toml("port = 8080")
            .unwrap()
            .with_port_from_env();
        env::set_var("PORT", "not-a-port");
        let invalid = Config::from_toml("port = 8080")
            .unwrap()
            .with_port_from_env();
        env::remove_var("PORT");
        let unset = Config::from_toml("port = 8080")
            .unwrap()
            .with_port_from_env();

        assert_eq!(config.port, 8080);
        assert_eq!(overridden.unwrap().port, 9090);
        assert!(invalid.is_err());
        assert_eq!(unset.unwrap().port, 8080);
    }

    #[test]
    fn malformed_config() {
        assert!(Config::from_toml("port = \"eighty\"").is_err());
    }
}
