//! Shared configuration for the netbl CLI and TUI.
//!
//! TOML profiles merged with `NETBL_`-prefixed environment variables,
//! and translation to `netbl_core::MonitorConfig`. Both binaries depend
//! on this crate; the CLI adds flag-aware overrides on top.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use netbl_api::transport::TlsMode;
use netbl_core::MonitorConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("unknown profile '{profile}'")]
    UnknownProfile { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Dashboard refresh cadence in seconds.
    #[serde(default = "default_refresh")]
    pub refresh: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
            refresh: default_refresh(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_refresh() -> u64 {
    30
}

/// A named backend profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Backend base URL (e.g., "http://localhost:5002").
    pub url: String,

    /// Path to a custom CA certificate (https deployments only).
    pub ca_cert: Option<PathBuf>,

    /// Skip TLS verification.
    pub insecure: Option<bool>,

    /// Override request timeout in seconds.
    pub timeout: Option<u64>,

    /// Override refresh cadence in seconds.
    pub refresh: Option<u64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            url: "http://localhost:5002".into(),
            ca_cert: None,
            insecure: None,
            timeout: None,
            refresh: None,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "netbl", "netbl").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("netbl");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file path, still merging the environment.
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("NETBL_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &std::path::Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Profile resolution ──────────────────────────────────────────────

/// Look up the selected (or default) profile.
///
/// An absent profile table with the default name selected yields the
/// built-in localhost profile, so a fresh install works with no file.
pub fn resolve_profile(
    config: &Config,
    name: Option<&str>,
) -> Result<(String, Profile), ConfigError> {
    let selected = name
        .map(ToOwned::to_owned)
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into());

    if let Some(profile) = config.profiles.get(&selected) {
        return Ok((selected, profile.clone()));
    }

    if name.is_none() {
        return Ok((selected, Profile::default()));
    }

    Err(ConfigError::UnknownProfile { profile: selected })
}

/// Build a `MonitorConfig` from a profile plus the global defaults.
pub fn profile_to_monitor_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<MonitorConfig, ConfigError> {
    let base_url: url::Url = profile.url.parse().map_err(|_| ConfigError::Validation {
        field: "url".into(),
        reason: format!("invalid URL: {}", profile.url),
    })?;

    let tls = if profile.insecure.unwrap_or(false) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    Ok(MonitorConfig {
        base_url,
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        refresh_interval: Duration::from_secs(profile.refresh.unwrap_or(defaults.refresh)),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_resolves_without_a_file() {
        let config = Config::default();
        let (name, profile) = resolve_profile(&config, None).unwrap();
        assert_eq!(name, "default");
        assert_eq!(profile.url, "http://localhost:5002");
    }

    #[test]
    fn named_missing_profile_is_an_error() {
        let config = Config::default();
        assert!(matches!(
            resolve_profile(&config, Some("office")),
            Err(ConfigError::UnknownProfile { .. })
        ));
    }

    #[test]
    fn profile_overrides_beat_defaults() {
        let profile = Profile {
            url: "http://10.0.0.2:5002".into(),
            timeout: Some(5),
            refresh: None,
            ..Profile::default()
        };
        let cfg = profile_to_monitor_config(&profile, &Defaults::default()).unwrap();
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.refresh_interval, Duration::from_secs(30));
        assert_eq!(cfg.base_url.as_str(), "http://10.0.0.2:5002/");
    }

    #[test]
    fn invalid_url_is_a_validation_error() {
        let profile = Profile {
            url: "not a url".into(),
            ..Profile::default()
        };
        assert!(matches!(
            profile_to_monitor_config(&profile, &Defaults::default()),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.profiles.insert(
            "home".into(),
            Profile {
                url: "http://192.168.1.10:5002".into(),
                refresh: Some(10),
                ..Profile::default()
            },
        );
        save_config_to(&config, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        let (_, profile) = resolve_profile(&loaded, Some("home")).unwrap();
        assert_eq!(profile.url, "http://192.168.1.10:5002");
        assert_eq!(profile.refresh, Some(10));
    }
}
