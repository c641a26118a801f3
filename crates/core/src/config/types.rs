use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
///
/// Every section has defaults, so an empty TOML document is a valid config.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub webhook: WebhookConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8000
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("inbox.db")
}

/// Seed dataset loaded into an empty store at startup
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedConfig {
    #[serde(default = "default_seed_path")]
    pub path: PathBuf,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            path: default_seed_path(),
        }
    }
}

fn default_seed_path() -> PathBuf {
    PathBuf::from("seeds/initial_tickets.json")
}

/// Location of the metrics artifact produced by the ETL job
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_path")]
    pub path: PathBuf,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            path: default_metrics_path(),
        }
    }
}

fn default_metrics_path() -> PathBuf {
    PathBuf::from("data/processed/metrics.json")
}

/// Outbound webhook notified after every ticket update
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebhookConfig {
    /// Endpoint receiving the updated ticket (overridable with `N8N_WEBHOOK_URL`)
    #[serde(default = "default_webhook_url")]
    pub url: String,
    /// Request timeout in seconds (default: 5)
    #[serde(default = "default_webhook_timeout")]
    pub timeout_secs: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: default_webhook_url(),
            timeout_secs: default_webhook_timeout(),
        }
    }
}

fn default_webhook_url() -> String {
    "http://localhost:5678/webhook/ticket-updated".to_string()
}

fn default_webhook_timeout() -> u64 {
    5
}

/// Browser origins allowed to call the API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:5173".to_string(),
        "http://localhost:3000".to_string(),
    ]
}

/// Input validation switches
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ValidationConfig {
    /// Reject status/priority values outside their known domains
    #[serde(default = "default_enforce_value_domains")]
    pub enforce_value_domains: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enforce_value_domains: default_enforce_value_domains(),
        }
    }
}

fn default_enforce_value_domains() -> bool {
    true
}
