use std::fs;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::transfer::engine::BalancePolicy;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    /// PostgreSQL connection URL for the durable account store.
    /// Absent means the embedder wires its own store.
    #[serde(default)]
    pub postgres_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: Rotation,
    pub enable_tracing: bool,
}

/// Log file rotation cadence
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    Hourly,
    Daily,
    Never,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "./logs".to_string(),
            log_file: "paycore.log".to_string(),
            use_json: false,
            rotation: Rotation::Daily,
            enable_tracing: true,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EngineConfig {
    /// How long a caller waits for a transfer result before `Timeout`.
    /// The in-flight commit always runs to completion.
    pub commit_timeout_ms: u64,
    /// Funds gate applied to the sender (see `BalancePolicy`)
    pub balance_policy: BalancePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            commit_timeout_ms: 5000,
            balance_policy: BalancePolicy::default(),
        }
    }
}

impl EngineConfig {
    pub fn commit_timeout(&self) -> Duration {
        Duration::from_millis(self.commit_timeout_ms)
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Self {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .unwrap_or_else(|_| panic!("Failed to read config file: {}", config_path));
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Self {
        serde_yaml::from_str(content).expect("Failed to parse config yaml")
    }
}
