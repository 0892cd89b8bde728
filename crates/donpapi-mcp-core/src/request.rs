//! Typed parameter bundles for each operation.
//!
//! Tool calls arrive as loosely typed JSON objects. They are deserialized into
//! these structs before anything is executed, so a wrong type or a missing
//! required parameter is reported back to the caller instead of being passed
//! through to the external tool.

use crate::error::AdapterError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub type JsonObject = serde_json::Map<String, serde_json::Value>;

pub const DEFAULT_GUI_BIND: &str = "0.0.0.0";

const REDACTED: &str = "********";

/// Parameters of the collection operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectRequest {
    /// Space separated IPs, ranges, hostnames or `ALL`
    pub targets: String,
    pub username: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// `LMHASH:NTHASH`
    #[serde(default)]
    pub hashes: Option<String>,
    /// `null` and absent both mean no `-k`
    #[serde(default)]
    pub use_kerberos: Option<bool>,
    /// Comma separated collector names, e.g. `Chromium,Firefox`
    #[serde(default)]
    pub collectors: Option<String>,
    #[serde(default)]
    pub threads: Option<u32>,
}

impl CollectRequest {
    pub fn new(targets: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            targets: targets.into(),
            username: username.into(),
            ..Default::default()
        }
    }

    pub fn uses_kerberos(&self) -> bool {
        self.use_kerberos.unwrap_or(false)
    }

    /// Argument vector for `<executable> collect ...`.
    ///
    /// Flag order is fixed: `-u -p -d -H -k -t -c --threads`. Absent
    /// parameters produce no flag at all.
    pub fn to_args(&self) -> Vec<String> {
        self.build_args(false)
    }

    /// Same as [`to_args`](Self::to_args) with credential values masked, for logs
    pub fn to_redacted_args(&self) -> Vec<String> {
        self.build_args(true)
    }

    fn build_args(&self, mask_credentials: bool) -> Vec<String> {
        let secret = |value: &String| {
            if mask_credentials {
                REDACTED.to_string()
            } else {
                value.clone()
            }
        };

        let mut args = vec!["collect".to_string()];

        args.extend(["-u".to_string(), self.username.clone()]);
        if let Some(password) = &self.password {
            args.extend(["-p".to_string(), secret(password)]);
        }
        if let Some(domain) = &self.domain {
            args.extend(["-d".to_string(), domain.clone()]);
        }
        if let Some(hashes) = &self.hashes {
            args.extend(["-H".to_string(), secret(hashes)]);
        }
        if self.uses_kerberos() {
            args.push("-k".to_string());
        }

        args.push("-t".to_string());
        args.extend(self.targets.split_whitespace().map(str::to_string));

        if let Some(collectors) = &self.collectors {
            args.extend(["-c".to_string(), collectors.clone()]);
        }
        if let Some(threads) = self.threads {
            args.extend(["--threads".to_string(), threads.to_string()]);
        }

        args
    }
}

/// Parameters of the GUI start operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StartGuiRequest {
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub bind: Option<String>,
}

impl StartGuiRequest {
    pub fn bind_or_default(&self) -> &str {
        self.bind.as_deref().unwrap_or(DEFAULT_GUI_BIND)
    }

    pub fn port_or(&self, default_port: u16) -> u16 {
        self.port.unwrap_or(default_port)
    }

    /// Argument vector for `<executable> gui ...`
    pub fn to_args(&self, default_port: u16) -> Vec<String> {
        vec![
            "gui".to_string(),
            "--bind".to_string(),
            self.bind_or_default().to_string(),
            "--port".to_string(),
            self.port_or(default_port).to_string(),
        ]
    }
}

/// Deserialize a tool argument bundle into a typed request.
///
/// A missing bundle is treated as an empty object so operations whose
/// parameters are all optional accept `arguments: null`.
pub fn parse_arguments<T: DeserializeOwned>(
    tool: &str,
    arguments: Option<JsonObject>,
) -> Result<T, AdapterError> {
    let value = serde_json::Value::Object(arguments.unwrap_or_default());
    serde_json::from_value(value).map_err(|e| AdapterError::invalid_arguments(tool, e))
}
