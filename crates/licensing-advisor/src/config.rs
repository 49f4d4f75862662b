use std::time::Duration;

use licensing_core::client::{ClientConfig, DEFAULT_API_BASE};

use crate::error::AppError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_ERROR_BODY_BYTES: usize = 8192;

/// Application configuration loaded explicitly from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Licensing backend base URL, without a trailing slash.
    pub api_base: String,
    pub timeout: Duration,
    pub max_error_body_bytes: usize,
    /// Serve MCP over TCP on this address instead of stdio.
    pub tcp_listen_addr: Option<String>,
}

impl Config {
    /// Optional:
    /// - `LICENSING_API_BASE` (default: "http://localhost:8000")
    /// - `LICENSING_TIMEOUT_SECS` (default: 30)
    /// - `LICENSING_MAX_ERROR_BODY_BYTES` (default: 8192)
    /// - `MCP_TCP_LISTEN_ADDR`
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let api_base = lookup("LICENSING_API_BASE")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "LICENSING_API_BASE must be an http or https URL, got '{api_base}'"
            )));
        }

        let timeout_secs: u64 = parse_or(&lookup, "LICENSING_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(AppError::Config(
                "LICENSING_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        let max_error_body_bytes = parse_or(
            &lookup,
            "LICENSING_MAX_ERROR_BODY_BYTES",
            DEFAULT_MAX_ERROR_BODY_BYTES,
        )?;

        Ok(Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
            max_error_body_bytes,
            tcp_listen_addr: lookup("MCP_TCP_LISTEN_ADDR").filter(|v| !v.trim().is_empty()),
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.api_base)
            .with_timeout(self.timeout)
            .with_max_error_body_bytes(self.max_error_body_bytes)
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{key} must be a non-negative integer, got '{raw}'"))),
        None => Ok(default),
    }
}
