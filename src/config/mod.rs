use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub expiry: ExpiryConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path of the JSON file holding the record set.
    pub path: String,
    /// Lifetime applied when a create request carries no ttl.
    pub default_ttl_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ExpiryConfig {
    pub sweep_interval_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let store_path = std::env::var("STORE_PATH").unwrap_or_else(|_| "./tern.json".to_string());

        // 24 hours unless overridden.
        let default_ttl_secs = std::env::var("DEFAULT_TTL_SECS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse::<u64>()
            .context("DEFAULT_TTL_SECS must be a number of seconds")?;

        let sweep_interval_secs = std::env::var("SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .context("SWEEP_INTERVAL_SECS must be a number of seconds")?;

        Ok(Config {
            server: ServerConfig { host, port },
            store: StoreConfig {
                path: store_path,
                default_ttl_secs,
            },
            expiry: ExpiryConfig {
                sweep_interval_secs,
            },
        })
    }
}
