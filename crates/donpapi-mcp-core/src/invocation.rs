use crate::process::{ProcessError, ProcessOutput};
use serde::{Deserialize, Serialize};

/// Outcome of a one-shot command, as relayed to the caller.
///
/// Either the command ran to completion (`stdout`, `stderr` and `command` are
/// set, `success` mirrors the exit code) or it could not complete and only
/// `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InvocationResult {
    pub fn completed(output: ProcessOutput, command: String) -> Self {
        Self {
            success: output.success(),
            stdout: Some(output.stdout),
            stderr: Some(output.stderr),
            command: Some(command),
            error: None,
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            stdout: None,
            stderr: None,
            command: None,
            error: Some(error.to_string()),
        }
    }

    pub fn from_outcome(outcome: Result<ProcessOutput, ProcessError>, command: String) -> Self {
        match outcome {
            Ok(output) => Self::completed(output, command),
            Err(e) => Self::failed(e),
        }
    }

    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self)
            .unwrap_or_else(|e| format!("{{\"success\": false, \"error\": \"{e}\"}}"))
    }
}

/// Reconstruct a printable command line from an executable and its arguments
pub fn command_line(executable: &str, args: &[String]) -> String {
    std::iter::once(executable)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_command_line() {
        let args = vec!["collect".to_string(), "-u".to_string(), "admin".to_string()];
        assert_eq!(command_line("donpapi", &args), "donpapi collect -u admin");
        assert_eq!(command_line("donpapi", &[]), "donpapi");
    }

    #[test]
    fn test_failed_result_serializes_only_error() {
        let result = InvocationResult::failed(ProcessError::Timeout(Duration::from_secs(600)));
        let value: serde_json::Value = serde_json::from_str(&result.to_pretty_json()).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "Command timed out after 600s");
        assert!(value.get("stdout").is_none());
        assert!(value.get("command").is_none());
    }

    #[test]
    fn test_pretty_json_field_order() {
        let result = InvocationResult {
            success: true,
            stdout: Some("out".into()),
            stderr: Some(String::new()),
            command: Some("donpapi collect".into()),
            error: None,
        };
        let json = result.to_pretty_json();
        let success = json.find("\"success\"").unwrap();
        let stdout = json.find("\"stdout\"").unwrap();
        let stderr = json.find("\"stderr\"").unwrap();
        let command = json.find("\"command\"").unwrap();
        assert!(success < stdout && stdout < stderr && stderr < command);
        assert!(json.contains('\n'));
    }
}
