//! Server settings, read from `ESHOP_*` environment variables

use anyhow::{bail, Context, Result};
use config::{Config, Environment};
use eshop_api_rpc::server::{DEFAULT_RPC_HOST, DEFAULT_RPC_PORT};
use eshop_core::application::worker::constants::{DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_GRACE};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_DB_PATH: &str = "~/.eshop/eshop.db";
const ENV_PREFIX: &str = "ESHOP";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// SQLite file path or `sqlite::memory:`
    pub db_path: String,
    pub rpc_host: String,
    pub rpc_port: u16,
    pub queue_capacity: usize,
    pub seed_demo_data: bool,
    pub shutdown_grace_secs: u64,
}

impl Settings {
    /// Load from the process environment
    pub fn load() -> Result<Self> {
        Self::from_source(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_source(env: Environment) -> Result<Self> {
        let grace_secs = DEFAULT_SHUTDOWN_GRACE.as_secs();
        let queue_capacity = u64::try_from(DEFAULT_QUEUE_CAPACITY).unwrap_or(u64::MAX);

        let mut settings: Settings = Config::builder()
            .set_default("db_path", DEFAULT_DB_PATH)?
            .set_default("rpc_host", DEFAULT_RPC_HOST)?
            .set_default("rpc_port", i64::from(DEFAULT_RPC_PORT))?
            .set_default("queue_capacity", queue_capacity)?
            .set_default("seed_demo_data", true)?
            .set_default("shutdown_grace_secs", grace_secs)?
            .add_source(env.try_parsing(true))
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Invalid ESHOP_* setting")?;

        if settings.queue_capacity == 0 {
            bail!("ESHOP_QUEUE_CAPACITY must be at least 1");
        }
        settings.db_path = shellexpand::tilde(&settings.db_path).into_owned();

        Ok(settings)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }

    pub fn is_in_memory(&self) -> bool {
        self.db_path.contains(":memory:")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_source(env(&[])).unwrap();

        assert!(settings.db_path.ends_with(".eshop/eshop.db"));
        assert!(!settings.db_path.starts_with('~'));
        assert_eq!(settings.rpc_host, "127.0.0.1");
        assert_eq!(settings.rpc_port, 9527);
        assert_eq!(settings.queue_capacity, 1000);
        assert!(settings.seed_demo_data);
        assert_eq!(settings.shutdown_grace(), Duration::from_secs(5));
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_source(env(&[
            ("ESHOP_DB_PATH", "sqlite::memory:"),
            ("ESHOP_RPC_PORT", "0"),
            ("ESHOP_QUEUE_CAPACITY", "8"),
            ("ESHOP_SEED_DEMO_DATA", "false"),
        ]))
        .unwrap();

        assert!(settings.is_in_memory());
        assert_eq!(settings.rpc_port, 0);
        assert_eq!(settings.queue_capacity, 8);
        assert!(!settings.seed_demo_data);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Settings::from_source(env(&[("ESHOP_QUEUE_CAPACITY", "0")])).is_err());
        assert!(Settings::from_source(env(&[("ESHOP_RPC_PORT", "not-a-port")])).is_err());
    }
}
