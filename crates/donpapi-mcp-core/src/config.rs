use crate::error::AdapterError;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_OUTPUT_DIR: &str = "DONPAPI_OUTPUT";
pub const ENV_GUI_PORT: &str = "DONPAPI_GUI_PORT";
pub const ENV_EXECUTABLE: &str = "DONPAPI_BIN";
pub const ENV_TIMEOUT: &str = "DONPAPI_TIMEOUT";
pub const ENV_GUI_STOP_GRACE: &str = "DONPAPI_GUI_STOP_GRACE";

/// Process-wide adapter configuration, read once at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(setter(into))]
#[serde(rename_all = "camelCase")]
pub struct AdapterConfig {
    /// Where the external tool keeps its loot. Informational only, never validated.
    #[builder(default = "default_output_dir()")]
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Port used by `start_gui` when the caller does not pass one
    #[builder(default = "default_gui_port()")]
    #[serde(default = "default_gui_port")]
    pub gui_port: u16,

    /// External executable invoked for every operation
    #[builder(default = "default_executable()")]
    #[serde(default = "default_executable")]
    pub executable: String,

    /// Upper bound on a single collection run (in seconds)
    #[builder(default = "default_timeout_secs()")]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How long `stop_gui` waits after SIGTERM before killing (in seconds)
    #[builder(default = "default_gui_stop_grace_secs()")]
    #[serde(default = "default_gui_stop_grace_secs")]
    pub gui_stop_grace_secs: u64,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            gui_port: default_gui_port(),
            executable: default_executable(),
            timeout_secs: default_timeout_secs(),
            gui_stop_grace_secs: default_gui_stop_grace_secs(),
        }
    }
}

impl AdapterConfig {
    pub fn builder() -> AdapterConfigBuilder {
        AdapterConfigBuilder::default()
    }

    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, AdapterError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AdapterError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(executable) = lookup(ENV_EXECUTABLE).filter(|v| !v.trim().is_empty()) {
            config.executable = executable;
        }
        if let Some(port) = parse_var(&lookup, ENV_GUI_PORT)? {
            config.gui_port = port;
        }
        if let Some(secs) = parse_var(&lookup, ENV_TIMEOUT)? {
            config.timeout_secs = secs;
        }
        if let Some(secs) = parse_var(&lookup, ENV_GUI_STOP_GRACE)? {
            config.gui_stop_grace_secs = secs;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return errors if invalid
    pub fn validate(&self) -> Result<(), AdapterError> {
        if self.timeout_secs == 0 {
            return Err(AdapterError::ConfigurationError(format!(
                "{ENV_TIMEOUT} must be greater than zero"
            )));
        }
        if self.executable.trim().is_empty() {
            return Err(AdapterError::ConfigurationError(format!(
                "{ENV_EXECUTABLE} must not be empty"
            )));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn gui_stop_grace(&self) -> Duration {
        Duration::from_secs(self.gui_stop_grace_secs)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, AdapterError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| {
            AdapterError::ConfigurationError(format!("{key}={raw:?} is not valid: {e}"))
        }),
    }
}

// Default value functions for serde and the builder
fn default_output_dir() -> PathBuf {
    PathBuf::from("/root/.donpapi/loot")
}
fn default_gui_port() -> u16 {
    8088
}
fn default_executable() -> String {
    "donpapi".to_string()
}
fn default_timeout_secs() -> u64 {
    600
}
fn default_gui_stop_grace_secs() -> u64 {
    5
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AdapterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.output_dir, PathBuf::from("/root/.donpapi/loot"));
        assert_eq!(config.gui_port, 8088);
        assert_eq!(config.executable, "donpapi");
        assert_eq!(config.timeout(), Duration::from_secs(600));
    }

    #[test]
    fn test_empty_environment_yields_defaults() {
        let config = AdapterConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AdapterConfig::default());
    }

    #[test]
    fn test_environment_overrides() {
        let config = AdapterConfig::from_lookup(lookup_from(&[
            (ENV_OUTPUT_DIR, "/tmp/loot"),
            (ENV_GUI_PORT, "9090"),
            (ENV_EXECUTABLE, "/opt/donpapi/bin/donpapi"),
            (ENV_TIMEOUT, "30"),
            (ENV_GUI_STOP_GRACE, "1"),
        ]))
        .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/loot"));
        assert_eq!(config.gui_port, 9090);
        assert_eq!(config.executable, "/opt/donpapi/bin/donpapi");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.gui_stop_grace(), Duration::from_secs(1));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = AdapterConfig::from_lookup(lookup_from(&[(ENV_GUI_PORT, "eighty")])).unwrap_err();
        assert!(format!("{err}").contains(ENV_GUI_PORT));

        let err = AdapterConfig::from_lookup(lookup_from(&[(ENV_GUI_PORT, "70000")])).unwrap_err();
        assert!(matches!(err, AdapterError::ConfigurationError(_)));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert!(AdapterConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT, "0")])).is_err());
    }

    #[test]
    fn test_output_dir_is_not_checked_for_existence() {
        let config =
            AdapterConfig::from_lookup(lookup_from(&[(ENV_OUTPUT_DIR, "/does/not/exist")]))
                .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/does/not/exist"));
    }

    #[test]
    fn test_builder() {
        let config = AdapterConfig::builder()
            .executable("sleep")
            .timeout_secs(1u64)
            .build()
            .unwrap();
        assert_eq!(config.executable, "sleep");
        assert_eq!(config.gui_port, 8088);
        assert_eq!(config.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_serialization() {
        let config = AdapterConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"guiPort\":8088"));
        let deserialized: AdapterConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(deserialized, config);
    }
}
