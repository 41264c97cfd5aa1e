//! Configuration for the ccprov CLI.
//!
//! A flat YAML file (`CC_IP`, `CC_USERNAME`, `CC_PASSWORD`, optional
//! `CC_INSECURE`) with environment variables of the same names taking
//! precedence, translated to `ccprov_core::ControllerConfig`.

use std::path::{Path, PathBuf};

use ccprov_core::{ControllerConfig, TlsVerification};
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Keys read from the file and, with precedence, from the environment.
pub const KEYS: [&str; 4] = ["CC_IP", "CC_USERNAME", "CC_PASSWORD", "CC_INSECURE"];

/// Lab controllers ship self-signed certificates.
pub const DEFAULT_INSECURE: bool = true;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("missing required key {key}")]
    MissingKey { key: &'static str },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Raw file shape ──────────────────────────────────────────────────

/// Keys as they appear in the file or environment, all optional until
/// validated.
///
/// The environment provider may hand keys over lowercased, hence the
/// aliases.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawConfig {
    #[serde(rename = "CC_IP", alias = "cc_ip", default)]
    pub ip: Option<String>,

    #[serde(rename = "CC_USERNAME", alias = "cc_username", default)]
    pub username: Option<String>,

    #[serde(rename = "CC_PASSWORD", alias = "cc_password", default)]
    pub password: Option<String>,

    #[serde(rename = "CC_INSECURE", alias = "cc_insecure", default)]
    pub insecure: Option<bool>,
}

impl RawConfig {
    /// Read the YAML file at `path`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Ok(Figment::from(Yaml::file(path)).extract()?)
    }

    /// Read the same keys from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Figment::from(Env::raw().only(&KEYS)).extract()?)
    }

    /// Values set in `other` win.
    #[must_use]
    pub fn overlay(self, other: RawConfig) -> Self {
        Self {
            ip: other.ip.or(self.ip),
            username: other.username.or(self.username),
            password: other.password.or(self.password),
            insecure: other.insecure.or(self.insecure),
        }
    }

    /// Validate required keys and build the runtime configuration.
    pub fn into_controller_config(self) -> Result<ControllerConfig, ConfigError> {
        let ip = required(self.ip, "CC_IP")?;
        let username = required(self.username, "CC_USERNAME")?;
        let password = required(self.password, "CC_PASSWORD")?;

        let mut config =
            ControllerConfig::new(controller_url(&ip)?, username, SecretString::from(password));
        config.tls = if self.insecure.unwrap_or(DEFAULT_INSECURE) {
            TlsVerification::DangerAcceptInvalid
        } else {
            TlsVerification::SystemDefaults
        };
        Ok(config)
    }
}

fn required(value: Option<String>, key: &'static str) -> Result<String, ConfigError> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingKey { key })
}

/// Turn `CC_IP` into a base URL: `https://{ip}` unless it already
/// carries a scheme.
pub fn controller_url(ip: &str) -> Result<Url, ConfigError> {
    let raw = if ip.contains("://") {
        ip.to_owned()
    } else {
        format!("https://{ip}")
    };
    let url = Url::parse(&raw).map_err(|e| ConfigError::Validation {
        field: "CC_IP".into(),
        reason: format!("'{ip}' is not a valid address: {e}"),
    })?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ConfigError::Validation {
            field: "CC_IP".into(),
            reason: format!("'{ip}' has no host"),
        });
    }
    Ok(url)
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load the file at `path`, apply environment overrides and validate.
pub fn load(path: &Path) -> Result<ControllerConfig, ConfigError> {
    RawConfig::from_file(path)?
        .overlay(RawConfig::from_env()?)
        .into_controller_config()
}
