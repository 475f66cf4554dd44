//! Configuration module
//!
//! Process-level settings read from the environment (and an optional `.env` file).
//! Object store credentials are not configured here: every ingestion request carries
//! its own store target.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::storage_types::StorageBackend;

const SERVER_PORT: u16 = 5000;
const FETCH_TIMEOUT_SECS: u64 = 60;
const MAX_REQUEST_BODY_MB: usize = 50;
const S3_REGION: &str = "us-east-1";

/// Console log output format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" | "text" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow::anyhow!("Invalid LOG_FORMAT: {}", other)),
        }
    }
}

/// Server-level configuration
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub log_format: LogFormat,
    pub max_request_body_bytes: usize,
}

/// Ingestion pipeline configuration
#[derive(Clone, Debug)]
pub struct IngestConfig {
    pub storage_backend: StorageBackend,
    /// Root directory for the `local` backend.
    pub local_storage_path: Option<PathBuf>,
    /// Signing region handed to S3-compatible stores.
    pub s3_region: String,
    /// Directory where pending artifacts and thumbnails are materialized.
    pub work_dir: PathBuf,
    pub fetch_timeout: Duration,
    /// Treat non-2xx responses from source URLs as acquisition failures.
    pub fetch_require_success: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::S3,
            local_storage_path: None,
            s3_region: S3_REGION.to_string(),
            work_dir: env::temp_dir(),
            fetch_timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
            fetch_require_success: true,
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub ingest: IngestConfig,
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Load configuration from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let log_format = match var("LOG_FORMAT") {
            Some(value) => value.parse()?,
            None => LogFormat::Compact,
        };

        let max_request_body_mb = var("MAX_REQUEST_BODY_MB")
            .map(|s| {
                s.trim()
                    .parse::<usize>()
                    .map_err(|_| anyhow::anyhow!("MAX_REQUEST_BODY_MB must be a valid number"))
            })
            .transpose()?
            .unwrap_or(MAX_REQUEST_BODY_MB);

        let base = BaseConfig {
            server_port: var("PORT")
                .unwrap_or_else(|| SERVER_PORT.to_string())
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            log_format,
            max_request_body_bytes: max_request_body_mb * 1024 * 1024,
        };

        let storage_backend = match var("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::S3,
        };

        let fetch_timeout_secs = var("FETCH_TIMEOUT_SECS")
            .map(|s| {
                s.trim()
                    .parse::<u64>()
                    .map_err(|_| anyhow::anyhow!("FETCH_TIMEOUT_SECS must be a valid number"))
            })
            .transpose()?
            .unwrap_or(FETCH_TIMEOUT_SECS);

        let fetch_require_success = match var("FETCH_REQUIRE_SUCCESS") {
            Some(value) => parse_bool(&value).ok_or_else(|| {
                anyhow::anyhow!("FETCH_REQUIRE_SUCCESS must be true or false, got {}", value)
            })?,
            None => true,
        };

        let ingest = IngestConfig {
            storage_backend,
            local_storage_path: var("LOCAL_STORAGE_PATH").map(PathBuf::from),
            s3_region: var("S3_REGION").unwrap_or_else(|| S3_REGION.to_string()),
            work_dir: var("WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            fetch_require_success,
        };

        Ok(Config { base, ingest })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.ingest.fetch_timeout.is_zero() {
            return Err(anyhow::anyhow!("FETCH_TIMEOUT_SECS must be greater than 0"));
        }
        if self.base.max_request_body_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_REQUEST_BODY_MB must be greater than 0"));
        }
        if self.ingest.storage_backend == StorageBackend::Local
            && self.ingest.local_storage_path.is_none()
        {
            return Err(anyhow::anyhow!(
                "LOCAL_STORAGE_PATH must be set when STORAGE_BACKEND=local"
            ));
        }
        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn log_format(&self) -> LogFormat {
        self.base.log_format
    }

    pub fn max_request_body_bytes(&self) -> usize {
        self.base.max_request_body_bytes
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.ingest.storage_backend
    }
}
