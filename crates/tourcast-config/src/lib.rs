//! Service configuration for tourcast.
//!
//! Configuration is layered: built-in defaults, then an optional JSON file
//! named by `TOURCAST_CONFIG`, then individual environment overrides.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_FILE: &str = "TOURCAST_CONFIG";
pub const ENV_BIND_ADDR: &str = "TOURCAST_BIND";
pub const ENV_MODEL_PATH: &str = "TOURCAST_MODEL_PATH";
pub const ENV_SCALER_PATH: &str = "TOURCAST_SCALER_PATH";
pub const ENV_ENCODER_PATH: &str = "TOURCAST_ENCODER_PATH";
pub const ENV_FALLBACK_ENCODER: &str = "TOURCAST_FALLBACK_ENCODER";

// ─────────────────────────────────────────────────────────────────────────────
// Error
// ─────────────────────────────────────────────────────────────────────────────

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Structs
// ─────────────────────────────────────────────────────────────────────────────

/// Locations of the three artifacts produced by the training pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    #[serde(default = "default_scaler_path")]
    pub scaler_path: PathBuf,
    #[serde(default = "default_encoder_path")]
    pub encoder_path: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            scaler_path: default_scaler_path(),
            encoder_path: default_encoder_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Socket address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default)]
    pub artifacts: ArtifactPaths,
    /// Degraded mode: fit the country encoder on a built-in reference list
    /// when no fitted encoder could be loaded. Never enable in production.
    #[serde(default)]
    pub fallback_encoder: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            artifacts: ArtifactPaths::default(),
            fallback_encoder: false,
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_model_path() -> PathBuf {
    PathBuf::from("best_random_forest_model.json")
}

fn default_scaler_path() -> PathBuf {
    PathBuf::from("scaler.json")
}

fn default_encoder_path() -> PathBuf {
    PathBuf::from("label_encoder_country.json")
}

// ─────────────────────────────────────────────────────────────────────────────
// Loading
// ─────────────────────────────────────────────────────────────────────────────

impl ServiceConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: ServiceConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = match env::var(ENV_CONFIG_FILE) {
            Ok(path) => Self::load_from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        base.with_overrides(|name| env::var(name).ok())
    }

    /// Applies `TOURCAST_*` overrides resolved through `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup(ENV_BIND_ADDR) {
            self.bind_addr = addr;
        }
        if let Some(path) = lookup(ENV_MODEL_PATH) {
            self.artifacts.model_path = path.into();
        }
        if let Some(path) = lookup(ENV_SCALER_PATH) {
            self.artifacts.scaler_path = path.into();
        }
        if let Some(path) = lookup(ENV_ENCODER_PATH) {
            self.artifacts.encoder_path = path.into();
        }
        if let Some(flag) = lookup(ENV_FALLBACK_ENCODER) {
            self.fallback_encoder = parse_flag(ENV_FALLBACK_ENCODER, &flag)?;
        }
        Ok(self)
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.artifacts.model_path, PathBuf::from("best_random_forest_model.json"));
        assert_eq!(config.artifacts.scaler_path, PathBuf::from("scaler.json"));
        assert_eq!(config.artifacts.encoder_path, PathBuf::from("label_encoder_country.json"));
        assert!(!config.fallback_encoder);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ServiceConfig =
            serde_json::from_str(r#"{"artifacts": {"model_path": "/models/rf.json"}}"#).unwrap();
        assert_eq!(config.artifacts.model_path, PathBuf::from("/models/rf.json"));
        assert_eq!(config.artifacts.scaler_path, PathBuf::from("scaler.json"));
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
    }

    #[test]
    fn test_overrides() {
        let config = ServiceConfig::default()
            .with_overrides(lookup_from(&[
                (ENV_BIND_ADDR, "127.0.0.1:9000"),
                (ENV_SCALER_PATH, "/srv/scaler.json"),
                (ENV_FALLBACK_ENCODER, "TRUE"),
            ]))
            .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.artifacts.scaler_path, PathBuf::from("/srv/scaler.json"));
        assert_eq!(config.artifacts.model_path, PathBuf::from("best_random_forest_model.json"));
        assert!(config.fallback_encoder);
    }

    #[test]
    fn test_invalid_flag() {
        let err = ServiceConfig::default()
            .with_overrides(lookup_from(&[(ENV_FALLBACK_ENCODER, "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let path = env::temp_dir().join(format!("tourcast-config-{}.json", std::process::id()));
        fs::write(&path, r#"{"bind_addr": "0.0.0.0:8080", "fallback_encoder": true}"#).unwrap();
        let config = ServiceConfig::load_from_file(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert!(config.fallback_encoder);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ServiceConfig::load_from_file(Path::new("/nonexistent/tourcast.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
