//! Configuration management for the phone lookup service.
//!
//! This module handles loading and validating configuration from environment
//! variables, with an optional `.env` file for local runs.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::path::PathBuf;

/// Where the service reads its users from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectorySource {
    /// JSON export of the host's users
    File(PathBuf),

    /// Live host reached through its OCS provisioning API
    Host {
        url: String,
        user: String,
        password: String,
    },
}

/// Configuration for the phone lookup service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Socket address the HTTP server binds to (default: 127.0.0.1:8080)
    pub bind_addr: String,

    /// Bearer token callers must present to reach the admin endpoint
    pub admin_token: String,

    /// User directory backing the lookup
    pub directory: DirectorySource,

    /// Region applied to numbers written without an international prefix
    /// when no explicit hint is given
    pub default_region: Option<String>,

    /// Reject numbers that parse but are not valid assigned numbers (default: false)
    pub strict_validation: bool,

    /// Users fetched per directory page (default: 100)
    pub page_size: usize,

    /// Host HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Log level used when RUST_LOG is unset (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `PHONEFINDER_ADMIN_TOKEN`: bearer token for the admin endpoint
    /// - exactly one of `PHONEFINDER_USERS_FILE` or `PHONEFINDER_HOST_URL`
    ///   (the latter with `PHONEFINDER_HOST_USER` and `PHONEFINDER_HOST_PASSWORD`)
    ///
    /// Optional environment variables:
    /// - `PHONEFINDER_BIND_ADDR`: listen address (default: 127.0.0.1:8080)
    /// - `PHONEFINDER_DEFAULT_REGION`: default phone region (default: unset)
    /// - `PHONEFINDER_STRICT_VALIDATION`: true/false (default: false)
    /// - `PHONEFINDER_PAGE_SIZE`: directory page size (default: 100)
    /// - `REQUEST_TIMEOUT`: host HTTP timeout in seconds (default: 10)
    /// - `LOG_LEVEL`: logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // A missing .env file is fine; any other failure is not.
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(ConfigError::DotenvError(e.to_string()));
            }
        }

        let admin_token = env::var("PHONEFINDER_ADMIN_TOKEN")
            .map_err(|_| ConfigError::MissingVar("PHONEFINDER_ADMIN_TOKEN".to_string()))?;

        if admin_token.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "PHONEFINDER_ADMIN_TOKEN".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let directory = Self::directory_from_env()?;

        let bind_addr =
            env::var("PHONEFINDER_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

        let default_region = env::var("PHONEFINDER_DEFAULT_REGION")
            .ok()
            .filter(|r| !r.trim().is_empty());

        let strict_validation = Self::parse_env_bool("PHONEFINDER_STRICT_VALIDATION", false)?;
        let page_size = Self::parse_env_usize("PHONEFINDER_PAGE_SIZE", 100)?;
        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;

        if page_size == 0 {
            return Err(ConfigError::InvalidValue {
                var: "PHONEFINDER_PAGE_SIZE".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            bind_addr,
            admin_token,
            directory,
            default_region,
            strict_validation,
            page_size,
            request_timeout,
            log_level,
        })
    }

    fn directory_from_env() -> ConfigResult<DirectorySource> {
        let users_file = env::var("PHONEFINDER_USERS_FILE").ok();
        let host_url = env::var("PHONEFINDER_HOST_URL").ok();

        match (users_file, host_url) {
            (Some(_), Some(_)) => Err(ConfigError::InvalidValue {
                var: "PHONEFINDER_HOST_URL".to_string(),
                reason: "Cannot be combined with PHONEFINDER_USERS_FILE".to_string(),
            }),
            (Some(path), None) => Ok(DirectorySource::File(PathBuf::from(path))),
            (None, Some(url)) => {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(ConfigError::InvalidValue {
                        var: "PHONEFINDER_HOST_URL".to_string(),
                        reason: "Must start with http:// or https://".to_string(),
                    });
                }

                let user = env::var("PHONEFINDER_HOST_USER")
                    .map_err(|_| ConfigError::MissingVar("PHONEFINDER_HOST_USER".to_string()))?;
                let password = env::var("PHONEFINDER_HOST_PASSWORD").map_err(|_| {
                    ConfigError::MissingVar("PHONEFINDER_HOST_PASSWORD".to_string())
                })?;

                Ok(DirectorySource::Host {
                    url,
                    user,
                    password,
                })
            }
            (None, None) => Err(ConfigError::MissingVar(
                "PHONEFINDER_USERS_FILE or PHONEFINDER_HOST_URL".to_string(),
            )),
        }
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as a boolean flag with a default value.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: "127.0.0.1:8080".to_string(),
            admin_token: String::new(),
            directory: DirectorySource::File(PathBuf::from("users.json")),
            default_region: None,
            strict_validation: false,
            page_size: 100,
            request_timeout: 10,
            log_level: "info".to_string(),
        }
    }
}
