use anyhow::{anyhow, bail, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use crate::processor::DEFAULT_OFFLINE_THRESHOLD_SECS;

/// Kept below the default offline threshold so simulated vehicles stay live.
pub const DEFAULT_SENDER_INTERVAL_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl StoreBackend {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "memory" | "mem" => Ok(Self::Memory),
            other => bail!("Unknown STORE_BACKEND '{}', expected 'postgres' or 'memory'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store_backend: StoreBackend,
    pub database_url: String,
    pub db_max_connections: u32,
    pub offline_threshold: chrono::Duration,
    pub log_level: String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_or("PORT", 3000);
        let store_backend =
            StoreBackend::parse(&env::var("STORE_BACKEND").unwrap_or_else(|_| "postgres".to_string()))?;

        let db_host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let db_port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
        let db_name = env::var("DB_DATABASE").unwrap_or_else(|_| "ambulance".to_string());
        let db_user = env::var("DB_USER").unwrap_or_else(|_| "ambulance".to_string());
        let db_pwd = env::var("DB_PWD").unwrap_or_else(|_| "ambulance".to_string());

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            format!(
                "postgres://{}:{}@{}:{}/{}",
                db_user, db_pwd, db_host, db_port, db_name
            )
        });
        let db_max_connections = parse_or("DB_MAX_CONNECTIONS", 10);
        let offline_threshold =
            parse_offline_threshold(env::var("OFFLINE_THRESHOLD_SECS").ok().as_deref())?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            host,
            port,
            store_backend,
            database_url,
            db_max_connections,
            offline_threshold,
            log_level,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Unset or blank means the default. Anything else must be a whole number of
/// seconds that is not negative and fits a `chrono::Duration`.
fn parse_offline_threshold(raw: Option<&str>) -> Result<chrono::Duration> {
    let secs = match raw.map(str::trim) {
        None | Some("") => DEFAULT_OFFLINE_THRESHOLD_SECS,
        Some(value) => value
            .parse::<i64>()
            .map_err(|e| anyhow!("Invalid OFFLINE_THRESHOLD_SECS '{}': {}", value, e))?,
    };

    if secs < 0 {
        bail!("OFFLINE_THRESHOLD_SECS must not be negative, got {}", secs);
    }

    chrono::Duration::try_seconds(secs)
        .ok_or_else(|| anyhow!("OFFLINE_THRESHOLD_SECS {} is out of range", secs))
}

/// Settings for the telemetry simulator binary.
#[derive(Debug, Clone)]
pub struct SenderConfig {
    pub api_url: String,
    pub fleet_size: usize,
    pub interval: Duration,
    pub log_level: String,
}

impl SenderConfig {
    pub fn load() -> Self {
        dotenv().ok();

        Self {
            api_url: env::var("API_URL")
                .unwrap_or_else(|_| "http://localhost:3000/api/ambulance/update".to_string()),
            fleet_size: parse_or("SENDER_FLEET_SIZE", 10),
            interval: Duration::from_secs(parse_or("SENDER_INTERVAL_SECS", DEFAULT_SENDER_INTERVAL_SECS).max(1)),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

/// Settings for the polling dashboard client.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub status_url: String,
    pub interval: Duration,
    pub log_level: String,
}

impl MonitorConfig {
    pub fn load() -> Self {
        dotenv().ok();

        Self {
            status_url: env::var("STATUS_URL")
                .unwrap_or_else(|_| "http://localhost:3000/api/ambulance/status".to_string()),
            interval: Duration::from_millis(parse_or("MONITOR_INTERVAL_MS", 1000u64).max(100)),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_parsing() {
        assert_eq!(StoreBackend::parse("postgres").unwrap(), StoreBackend::Postgres);
        assert_eq!(StoreBackend::parse(" Memory ").unwrap(), StoreBackend::Memory);
        assert!(StoreBackend::parse("mongo").is_err());
    }

    #[test]
    fn test_parse_or_falls_back_on_garbage() {
        env::set_var("AMB_TEST_PARSE_OR_GARBAGE", "not-a-number");
        assert_eq!(parse_or("AMB_TEST_PARSE_OR_GARBAGE", 42u64), 42);
        env::set_var("AMB_TEST_PARSE_OR_VALID", " 7 ");
        assert_eq!(parse_or("AMB_TEST_PARSE_OR_VALID", 42u64), 7);
        assert_eq!(parse_or("AMB_TEST_PARSE_OR_UNSET", 3u32), 3);
    }

    #[test]
    fn test_offline_threshold_parsing() {
        assert_eq!(
            parse_offline_threshold(None).unwrap(),
            chrono::Duration::seconds(DEFAULT_OFFLINE_THRESHOLD_SECS)
        );
        assert_eq!(
            parse_offline_threshold(Some("  ")).unwrap(),
            chrono::Duration::seconds(DEFAULT_OFFLINE_THRESHOLD_SECS)
        );
        assert_eq!(parse_offline_threshold(Some("30")).unwrap(), chrono::Duration::seconds(30));
        assert_eq!(parse_offline_threshold(Some("0")).unwrap(), chrono::Duration::zero());
    }

    #[test]
    fn test_offline_threshold_rejects_bad_values() {
        // u64::MAX used to wrap to a negative threshold
        assert!(parse_offline_threshold(Some("18446744073709551615")).is_err());
        // fits i64 but not a chrono::Duration in seconds
        assert!(parse_offline_threshold(Some("10000000000000000")).is_err());
        assert!(parse_offline_threshold(Some("-1")).is_err());
        assert!(parse_offline_threshold(Some("ten")).is_err());
    }

    #[test]
    fn test_default_sender_interval_keeps_vehicles_live() {
        assert!((DEFAULT_SENDER_INTERVAL_SECS as i64) < DEFAULT_OFFLINE_THRESHOLD_SECS);
    }
}
