mod common;

use common::{StubDonpapi, object};
use donpapi_mcp::{AdapterConfig, DonpapiTools, PlatformProcessManager, ProcessManager};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn parse(text: &str) -> Value {
    serde_json::from_str(text).expect("collect payload is JSON")
}

#[tokio::test]
async fn test_collect_relays_output_and_command() {
    let stub = StubDonpapi::install();
    let tools = stub.tools(60);

    let output = tools
        .dispatch(
            "donpapi_collect",
            object(json!({
                "targets": "10.0.0.1 10.0.0.2",
                "username": "admin",
                "domain": "corp.local",
                "password": "Passw0rd!",
                "use_kerberos": true,
                "collectors": "Chromium,Firefox",
                "threads": 50
            })),
        )
        .await;

    assert!(!output.is_error);
    let value = parse(&output.text);
    let expected_args =
        "-u admin -p Passw0rd! -d corp.local -k -t 10.0.0.1 10.0.0.2 -c Chromium,Firefox --threads 50";
    assert_eq!(value["success"], true);
    assert_eq!(value["stdout"], format!("{expected_args}\n"));
    assert_eq!(value["stderr"], "");
    assert_eq!(
        value["command"],
        format!("{} collect {expected_args}", stub.executable())
    );
    assert!(value.get("error").is_none());
}

#[tokio::test]
async fn test_collect_non_zero_exit_keeps_stderr() {
    let stub = StubDonpapi::install();
    let tools = stub.tools(60);

    let output = tools
        .dispatch(
            "collect",
            object(json!({ "targets": "10.0.0.1", "username": "denied" })),
        )
        .await;

    let value = parse(&output.text);
    assert_eq!(value["success"], false);
    assert_eq!(value["stderr"], "STATUS_LOGON_FAILURE\n");
    assert!(value["command"].is_string());
}

#[tokio::test]
async fn test_collect_timeout_is_reported() {
    let stub = StubDonpapi::install();
    let tools = stub.tools(1);

    let started = Instant::now();
    let output = tools
        .dispatch(
            "donpapi_collect",
            object(json!({ "targets": "slow", "username": "admin" })),
        )
        .await;

    assert!(started.elapsed() < Duration::from_secs(6));
    let value = parse(&output.text);
    assert_eq!(value["success"], false);
    assert_eq!(value["error"], "Command timed out after 1s");
    assert!(value.get("stdout").is_none());
}

#[tokio::test]
async fn test_collect_missing_executable() {
    let stub = StubDonpapi::install();
    let missing = format!("{}-missing", stub.executable());
    let config = AdapterConfig::builder()
        .executable(missing.clone())
        .build()
        .unwrap();
    let tools = DonpapiTools::new(&config, Arc::new(PlatformProcessManager::new()));

    let output = tools
        .dispatch(
            "donpapi_collect",
            object(json!({ "targets": "10.0.0.1", "username": "admin" })),
        )
        .await;

    let value = parse(&output.text);
    assert_eq!(value["success"], false);
    assert!(value["error"].as_str().unwrap().contains(&missing));
}

#[tokio::test]
async fn test_unknown_tool_leaves_channel_usable() {
    let stub = StubDonpapi::install();
    let tools = stub.tools(60);

    let output = tools.dispatch("donpapi_exfiltrate", None).await;
    assert_eq!(output.text, "Unknown tool: donpapi_exfiltrate");
    assert!(!output.is_error);

    let output = tools.dispatch("donpapi_stop_gui", None).await;
    assert_eq!(output.text, "GUI is not running.");
}
