use anyhow::Result;
use std::time::Duration;

/// Probes sent per run.
pub const DEFAULT_PROBE_COUNT: u16 = 5;
/// Pause after each probe, including the last one.
pub const DEFAULT_INTERVAL_MS: u64 = 1000;
/// Read deadline for a single probe, also bounding the TCP connect.
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;
pub const RECV_BUFFER_LEN: usize = 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct ProbeConfig {
    pub count: u16,
    pub interval: Duration,
    pub timeout: Duration,
    pub recv_buffer_len: usize,
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_PROBE_COUNT,
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            recv_buffer_len: RECV_BUFFER_LEN,
            log_level: default_log_level(),
        }
    }
}

impl ProbeConfig {
    /// Get the log level as a tracing::Level
    pub fn get_tracing_level(&self) -> Result<tracing::Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(tracing::Level::TRACE),
            "debug" => Ok(tracing::Level::DEBUG),
            "info" => Ok(tracing::Level::INFO),
            "warn" | "warning" => Ok(tracing::Level::WARN),
            "error" => Ok(tracing::Level::ERROR),
            _ => Err(anyhow::anyhow!(
                "Invalid log level: {}. Valid levels are: trace, debug, info, warn, error",
                self.log_level
            )),
        }
    }
}
