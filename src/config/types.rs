//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_GEO_ENDPOINT, DEFAULT_LISTEN_ADDR, DEFAULT_LISTEN_PORT, DEFAULT_MAX_USER_AGENTS,
    DNS_TIMEOUT_MS, ENRICHMENT_TTL_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Service configuration, parsed from the command line.
///
/// Every field has a default, so the binary runs with no arguments. The
/// library consumes this struct directly; tests construct it programmatically
/// via [`Config::default`].
///
/// # Examples
///
/// ```no_run
/// use origin_lookup::Config;
///
/// let config = Config {
///     port: 9090,
///     redis_url: Some("redis://127.0.0.1/".to_string()),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(name = "origin_lookup", version, about)]
pub struct Config {
    /// Address to bind the HTTP listener on
    #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
    pub bind: String,

    /// Port to bind the HTTP listener on
    #[arg(long, default_value_t = DEFAULT_LISTEN_PORT)]
    pub port: u16,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,

    /// Redis URL for the enrichment cache (falls back to the REDIS_URL
    /// environment variable; the cache is disabled when neither is set)
    #[arg(long)]
    pub redis_url: Option<String>,

    /// Geolocation API endpoint; the client IP is appended as a path segment
    #[arg(long, default_value = DEFAULT_GEO_ENDPOINT)]
    pub geo_endpoint: String,

    /// TTL for cached reverse-DNS results, in seconds
    #[arg(long, default_value_t = ENRICHMENT_TTL_SECS)]
    pub dns_ttl_secs: u64,

    /// TTL for cached geolocation results, in seconds
    #[arg(long, default_value_t = ENRICHMENT_TTL_SECS)]
    pub geo_ttl_secs: u64,

    /// Deadline for one reverse-DNS lookup, in milliseconds
    #[arg(long, default_value_t = DNS_TIMEOUT_MS)]
    pub dns_timeout_ms: u64,

    /// Maximum number of distinct user agents tracked by the tally
    #[arg(long, default_value_t = DEFAULT_MAX_USER_AGENTS)]
    pub max_user_agents: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: DEFAULT_LISTEN_ADDR.to_string(),
            port: DEFAULT_LISTEN_PORT,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            redis_url: None,
            geo_endpoint: DEFAULT_GEO_ENDPOINT.to_string(),
            dns_ttl_secs: ENRICHMENT_TTL_SECS,
            geo_ttl_secs: ENRICHMENT_TTL_SECS,
            dns_timeout_ms: DNS_TIMEOUT_MS,
            max_user_agents: DEFAULT_MAX_USER_AGENTS,
        }
    }
}
