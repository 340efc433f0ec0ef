//! Configuration module
//!
//! Environment-driven configuration with sensible defaults. Every field can
//! be left unset; the defaults reproduce the documented behavior (port 3000,
//! hourly sweep, one hour retention).

use std::env;
use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_INCOMING_DIR: &str = "tmp";
const DEFAULT_DERIVED_DIR: &str = "compressed";
const DEFAULT_RETENTION_SECS: u64 = 3600;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 3600;
const DEFAULT_ENCODE_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_FILE_SIZE_MB: usize = 10;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    /// Directory for raw uploads, relative to the working directory.
    pub incoming_dir: String,
    /// Directory for encoded outputs, relative to the working directory.
    pub derived_dir: String,
    /// Artifacts older than this are reclaimed by the reaper.
    pub retention_secs: u64,
    /// Period of the reaper sweep.
    pub sweep_interval_secs: u64,
    /// Deadline for a single encode call.
    pub encode_timeout_secs: u64,
    pub max_file_size_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .map_err(|e| anyhow::anyhow!("Invalid MAX_FILE_SIZE_MB: {}", e))?;

        Ok(Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PORT: {}", e))?,
            incoming_dir: env::var("INCOMING_DIR")
                .unwrap_or_else(|_| DEFAULT_INCOMING_DIR.to_string()),
            derived_dir: env::var("DERIVED_DIR")
                .unwrap_or_else(|_| DEFAULT_DERIVED_DIR.to_string()),
            retention_secs: env::var("RETENTION_SECS")
                .unwrap_or_else(|_| DEFAULT_RETENTION_SECS.to_string())
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid RETENTION_SECS: {}", e))?,
            sweep_interval_secs: env::var("SWEEP_INTERVAL_SECS")
                .unwrap_or_else(|_| DEFAULT_SWEEP_INTERVAL_SECS.to_string())
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid SWEEP_INTERVAL_SECS: {}", e))?,
            encode_timeout_secs: env::var("ENCODE_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_ENCODE_TIMEOUT_SECS.to_string())
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid ENCODE_TIMEOUT_SECS: {}", e))?,
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.retention_secs == 0 {
            anyhow::bail!("RETENTION_SECS must be greater than zero");
        }
        if self.sweep_interval_secs == 0 {
            anyhow::bail!("SWEEP_INTERVAL_SECS must be greater than zero");
        }
        if self.encode_timeout_secs == 0 {
            anyhow::bail!("ENCODE_TIMEOUT_SECS must be greater than zero");
        }
        Ok(())
    }

    pub fn retention(&self) -> Duration {
        Duration::from_secs(self.retention_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn encode_timeout(&self) -> Duration {
        Duration::from_secs(self.encode_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_port: DEFAULT_PORT,
            incoming_dir: DEFAULT_INCOMING_DIR.to_string(),
            derived_dir: DEFAULT_DERIVED_DIR.to_string(),
            retention_secs: DEFAULT_RETENTION_SECS,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            encode_timeout_secs: DEFAULT_ENCODE_TIMEOUT_SECS,
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_MB * 1024 * 1024,
        }
    }
}
