use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_u16(key: &str, default: u16) -> u16 {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub scheduler: SchedulerConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            scheduler: SchedulerConfig::from_env(),
        }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  server:     {}:{}", self.server.host, self.server.port);
        tracing::info!(
            "  scheduler:  tick={}ms, overlap={:?}",
            self.scheduler.tick_interval_ms,
            self.scheduler.overlap_policy,
        );
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig { host: "0.0.0.0".to_string(), port: 8080 },
            scheduler: SchedulerConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_u16("PORT", 8080),
        }
    }
}

/// What to do when a job's previous firing is still running at its next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlapPolicy {
    /// Fire again concurrently (the default).
    Allow,
    /// Skip the tick while the previous firing is in flight.
    Skip,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Dispatch loop tick interval in milliseconds. Must stay at or below
    /// 1000 to honor seconds-resolution schedules.
    pub tick_interval_ms: u64,
    pub overlap_policy: OverlapPolicy,
}

impl SchedulerConfig {
    fn from_env() -> Self {
        let overlap_policy = match env_or("SCHEDULER_OVERLAP", "allow").to_lowercase().as_str() {
            "skip" => OverlapPolicy::Skip,
            _ => OverlapPolicy::Allow,
        };
        Self {
            tick_interval_ms: env_u64("SCHEDULER_TICK_MS", 500).min(1000),
            overlap_policy,
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 500,
            overlap_policy: OverlapPolicy::Allow,
        }
    }
}
