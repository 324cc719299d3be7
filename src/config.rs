use serde::{Deserialize, Serialize};

/// Server and storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Path of the SQLite database file
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum number of pooled SQLite connections
    #[serde(default = "default_pool_max_size")]
    pub pool_max_size: u32,

    /// How long a connection waits on a locked database, in milliseconds
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            host: default_host(),
            port: default_port(),
            pool_max_size: default_pool_max_size(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup. Missing or unparseable
    /// values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(default_database_url),
            host: lookup("HOST").unwrap_or_else(default_host),
            port: lookup("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_port),
            pool_max_size: lookup("DB_POOL_MAX_SIZE")
                .and_then(|v| v.parse().ok())
                .filter(|size| *size > 0)
                .unwrap_or_else(default_pool_max_size),
            busy_timeout_ms: lookup("DB_BUSY_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_busy_timeout_ms),
        }
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_database_url() -> String {
    "orders.db".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_pool_max_size() -> u32 {
    8
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = ServerConfig::from_lookup(lookup_from(&[]));

        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.database_url, "orders.db");
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
    }

    #[test]
    fn test_values_from_lookup() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "/tmp/trades.db"),
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("DB_POOL_MAX_SIZE", "2"),
            ("DB_BUSY_TIMEOUT_MS", "250"),
        ]));

        assert_eq!(config.database_url, "/tmp/trades.db");
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.pool_max_size, 2);
        assert_eq!(config.busy_timeout_ms, 250);
    }

    #[test]
    fn test_invalid_numbers_fall_back_to_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("PORT", "eighty"),
            ("DB_POOL_MAX_SIZE", "0"),
            ("DB_BUSY_TIMEOUT_MS", "-1"),
        ]));

        assert_eq!(config.port, 8000);
        assert_eq!(config.pool_max_size, 8);
        assert_eq!(config.busy_timeout_ms, 5000);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: ServerConfig = serde_json::from_str(r#"{"port": 9000}"#).unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.database_url, "orders.db");
    }
}
