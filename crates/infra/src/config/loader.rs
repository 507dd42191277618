//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If a required variable is unset, falls back to loading from file
//!    (a set but invalid variable is an error, not a fallback)
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! Whatever the source, the result is checked with
//! [`ClientConfig::validate`] before it is returned.
//!
//! ## Environment Variables
//! - `CAMPLINE_BASE_URL`: Account API root (required)
//! - `CAMPLINE_USER_AGENT`: Identification header value (required)
//! - `CAMPLINE_CLIENT_ID`, `CAMPLINE_CLIENT_SECRET`,
//!   `CAMPLINE_REDIRECT_URI`: OAuth client registration (required)
//! - `CAMPLINE_AUTHORIZE_URL`, `CAMPLINE_TOKEN_URL`: OAuth endpoints
//!   (required)
//! - `CAMPLINE_TIMEOUT_SECS`: Per-exchange timeout in seconds
//! - `CAMPLINE_CACHE_ENABLED`: Whether GETs are cached (true/false)
//! - `CAMPLINE_CACHE_MAX_ENTRIES`: Response cache capacity
//! - `CAMPLINE_CACHE_TTL_SECS`: Response cache entry lifetime
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./campline.json` or `./campline.toml` (current working directory)
//! 2. `./config/campline.json` or `./config/campline.toml`
//! 3. `../campline.json` or `../campline.toml` (parent directory)
//! 4. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use campline_domain::{CacheSettings, ClientConfig, ConfigError, OAuthSettings};

type Result<T> = std::result::Result<T, ConfigError>;

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. Only a missing
/// required variable falls back to a config file; a variable that is set
/// but invalid fails the load.
///
/// # Errors
/// Returns the environment error for a set-but-invalid variable, otherwise
/// the file error if no valid configuration file is found.
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(ConfigError::MissingVar(var)) => {
            tracing::debug!(%var, "Environment incomplete, trying config file");
            load_from_file(None)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Invalid configuration in environment");
            Err(e)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns [`ConfigError::MissingVar`] for an unset required variable,
/// [`ConfigError::InvalidValue`] for an unparseable number or a config that
/// fails validation.
pub fn load_from_env() -> Result<ClientConfig> {
    let defaults = CacheSettings::default();

    let config = ClientConfig {
        base_url: env_var("CAMPLINE_BASE_URL")?,
        user_agent: env_var("CAMPLINE_USER_AGENT")?,
        timeout_secs: env_parse("CAMPLINE_TIMEOUT_SECS")?,
        oauth: OAuthSettings {
            client_id: env_var("CAMPLINE_CLIENT_ID")?,
            client_secret: env_var("CAMPLINE_CLIENT_SECRET")?,
            redirect_uri: env_var("CAMPLINE_REDIRECT_URI")?,
            authorize_url: env_var("CAMPLINE_AUTHORIZE_URL")?,
            token_url: env_var("CAMPLINE_TOKEN_URL")?,
        },
        cache: CacheSettings {
            enabled: env_bool("CAMPLINE_CACHE_ENABLED", defaults.enabled),
            max_entries: env_parse("CAMPLINE_CACHE_MAX_ENTRIES")?.unwrap_or(defaults.max_entries),
            ttl_secs: env_parse("CAMPLINE_CACHE_TTL_SECS")?,
        },
    };

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Format is detected by extension (`.json` or `.toml`).
///
/// # Errors
/// Returns [`ConfigError::NotFound`] when the file (or any probed file) is
/// missing, [`ConfigError::Io`] / [`ConfigError::Parse`] when it cannot be
/// read or parsed, and [`ConfigError::InvalidValue`] when it fails
/// validation.
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ConfigError::NotFound(p.display().to_string()));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ConfigError::NotFound("no config file in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
        path: config_path.display().to_string(),
        message: e.to_string(),
    })?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content, by the extension of `path`.
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ConfigError::Parse { format: "TOML", message: e.to_string() }),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ConfigError::Parse { format: "JSON", message: e.to_string() }),
        other => Err(ConfigError::UnsupportedFormat(other.to_string())),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
        candidates.extend(candidates_in(&cwd.join("config")));
        candidates.extend(candidates_in(&cwd.join("..")));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> [PathBuf; 2] {
    [dir.join("campline.json"), dir.join("campline.toml")]
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| ConfigError::MissingVar(key.to_string()))
}

/// Optional numeric variable; unset is `None`, garbage is an error.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue { key: key.to_string(), message: format!("'{raw}': {e}") }),
        Err(_) => Ok(None),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
