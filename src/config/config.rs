use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::core::confirmation::{ConfirmOptions, MissingTokenPolicy, TransportErrorPolicy};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("profile \"{0}\" is not defined in config.toml")]
    UnknownProfile(String),
    #[error("no API url configured; pass --api-url, set ACTIVATOR_API_URL or add api_url to {0}")]
    MissingApiUrl(String),
    #[error("invalid API url \"{url}\": {reason}")]
    InvalidApiUrl { url: String, reason: String },
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
    #[error("failed to read {path}: {reason}")]
    Unreadable { path: String, reason: String },
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub transport_errors: Option<TransportErrorPolicy>,
    pub missing_token: Option<MissingTokenPolicy>,
    pub log_level: Option<String>,

    // Named API endpoints
    pub default_profile: Option<String>,
    pub profiles: Option<BTreeMap<String, FileProfileConfig>>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FileProfileConfig {
    pub api_url: String,
}

/// Resolved settings handed to the confirmation view at construction.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub timeout: Option<Duration>,
    pub transport_errors: TransportErrorPolicy,
    pub missing_token: MissingTokenPolicy,
    pub log_level: String,
}

impl Config {
    /// Resolve from CLI overrides, environment and the config file.
    ///
    /// API url precedence: `--api-url` > `--profile` > `ACTIVATOR_API_URL` >
    /// default profile > file `api_url`.
    pub fn create(api_url: Option<String>, profile: Option<String>) -> Result<Self, ConfigError> {
        let (path, file_cfg) = load_file_config_with_path()?;
        Self::resolve(api_url, profile.as_deref(), &file_cfg, &path)
    }

    fn resolve(
        cli_url: Option<String>,
        cli_profile: Option<&str>,
        file_cfg: &FileConfig,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        let raw_url = resolve_api_url(cli_url, cli_profile, file_cfg)?
            .ok_or_else(|| ConfigError::MissingApiUrl(path.display().to_string()))?;
        let api_url = parse_api_url(&raw_url)?;

        let timeout = match env::var("ACTIVATOR_TIMEOUT_SECS") {
            Ok(s) => Some(s.trim().parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                key: "ACTIVATOR_TIMEOUT_SECS",
                reason: e.to_string(),
            })?),
            Err(_) => file_cfg.timeout_secs,
        }
        .filter(|s| *s > 0)
        .map(Duration::from_secs);

        let transport_errors = match env::var("ACTIVATOR_TRANSPORT_ERRORS") {
            Ok(s) => s.parse().map_err(|reason| ConfigError::InvalidValue {
                key: "ACTIVATOR_TRANSPORT_ERRORS",
                reason,
            })?,
            Err(_) => file_cfg.transport_errors.unwrap_or_default(),
        };

        let missing_token = match env::var("ACTIVATOR_MISSING_TOKEN") {
            Ok(s) => s.parse().map_err(|reason| ConfigError::InvalidValue {
                key: "ACTIVATOR_MISSING_TOKEN",
                reason,
            })?,
            Err(_) => file_cfg.missing_token.unwrap_or_default(),
        };

        let log_level = env::var("ACTIVATOR_LOG")
            .ok()
            .or_else(|| file_cfg.log_level.clone())
            .unwrap_or_else(|| "warn".to_string());

        Ok(Config {
            api_url,
            timeout,
            transport_errors,
            missing_token,
            log_level,
        })
    }

    pub fn confirm_options(&self) -> ConfirmOptions {
        ConfirmOptions {
            transport_errors: self.transport_errors,
            missing_token: self.missing_token,
        }
    }
}

fn resolve_api_url(
    cli_url: Option<String>,
    cli_profile: Option<&str>,
    file_cfg: &FileConfig,
) -> Result<Option<String>, ConfigError> {
    if let Some(u) = cli_url {
        return Ok(Some(u));
    }

    if let Some(name) = cli_profile {
        return match file_cfg.profiles.as_ref().and_then(|p| p.get(name)) {
            Some(prof) => Ok(Some(prof.api_url.clone())),
            None => Err(ConfigError::UnknownProfile(name.to_string())),
        };
    }

    if let Ok(u) = env::var("ACTIVATOR_API_URL") {
        if !u.trim().is_empty() {
            return Ok(Some(u));
        }
    }

    // A default_profile pointing at a missing profile is ignored
    if let Some(prof) = file_cfg
        .default_profile
        .as_deref()
        .and_then(|name| file_cfg.profiles.as_ref()?.get(name))
    {
        return Ok(Some(prof.api_url.clone()));
    }

    Ok(file_cfg.api_url.clone())
}

pub fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidApiUrl {
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme \"{other}\""))),
    }
}

pub fn config_file_path() -> PathBuf {
    // Allow tests/users to override config dir via ACTIVATOR_CONFIG_DIR; else use platform default
    let cfg_dir = match env::var("ACTIVATOR_CONFIG_DIR") {
        Ok(p) => PathBuf::from(p),
        Err(_) => dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")),
    };
    cfg_dir.join("activator").join("config.toml")
}

/// Load the config file; a missing file is an empty config, a malformed one
/// is an error.
pub fn load_file_config_with_path() -> Result<(PathBuf, FileConfig), ConfigError> {
    let path = config_file_path();
    let cfg = match std::fs::read_to_string(&path) {
        Ok(s) => toml::from_str::<FileConfig>(&s).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
        Err(e) => {
            return Err(ConfigError::Unreadable {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
        }
    };
    Ok((path, cfg))
}

pub fn save_file_config(path: &Path, cfg: &FileConfig) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let s = toml::to_string_pretty(cfg).map_err(std::io::Error::other)?;
    std::fs::write(path, s)
}

/// Log file used while the terminal UI owns the screen.
pub fn log_file_path() -> PathBuf {
    if let Ok(base) = env::var("ACTIVATOR_DATA_DIR") {
        return PathBuf::from(base).join("activator").join("activator.log");
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("activator")
        .join("activator.log")
}
