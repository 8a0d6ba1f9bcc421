//! Command line / environment configuration for `alon-server`.

use std::net::SocketAddr;
use std::time::Duration;

use alon_core::db::PoolSettings;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "alon-server")]
#[command(version, about = "Alon receipts server - record persistence and JSON API")]
pub struct Config {
    /// Database connection string, e.g. `sqlite://alon.db?mode=rwc`.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:5000", env = "LISTEN_ADDR")]
    pub addr: SocketAddr,

    /// Maximum pooled database connections.
    #[arg(long, default_value_t = 5, env = "ALON_MAX_CONNECTIONS")]
    pub max_connections: u32,

    /// Seconds a request waits for a free database connection.
    #[arg(long, default_value_t = 5, env = "ALON_ACQUIRE_TIMEOUT")]
    pub acquire_timeout: u64,

    /// Seconds before an in-flight request is answered with 408.
    #[arg(long, default_value_t = 30, env = "ALON_REQUEST_TIMEOUT")]
    pub request_timeout: u64,

    /// Do not insert sample recipes into an empty database.
    #[arg(long, env = "ALON_NO_SEED")]
    pub no_seed: bool,

    /// Output logs as JSON (for structured log aggregation).
    #[arg(long)]
    pub log_json: bool,
}

impl Config {
    pub const fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.max_connections,
            acquire_timeout: Duration::from_secs(self.acquire_timeout),
        }
    }

    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}
