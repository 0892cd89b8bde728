use donpapi_mcp::{AdapterConfig, DonpapiTools, PlatformProcessManager, ProcessManager};
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Stand-in for the donpapi executable.
///
/// `collect` echoes its arguments, fails for user `denied` and hangs for
/// target `slow`. `gui` stays in the foreground like the real web server,
/// unless bound to `crash`, in which case it exits at once.
const STUB: &str = r#"#!/bin/sh
sub="$1"
shift
case "$sub" in
  collect)
    case " $* " in
      *" slow "*) sleep 30 ;;
      *" denied "*) echo "STATUS_LOGON_FAILURE" >&2; exit 1 ;;
    esac
    echo "$@"
    ;;
  gui)
    case " $* " in
      *" crash "*) exit 1 ;;
    esac
    exec sleep 30
    ;;
  *)
    echo "unknown subcommand $sub" >&2
    exit 2
    ;;
esac
"#;

pub struct StubDonpapi {
    // Keeps the directory alive for the duration of the test
    _dir: TempDir,
    pub path: PathBuf,
}

impl StubDonpapi {
    pub fn install() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("donpapi");
        std::fs::write(&path, STUB).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        Self { _dir: dir, path }
    }

    pub fn executable(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    pub fn tools(&self, timeout_secs: u64) -> DonpapiTools<PlatformProcessManager> {
        let config = AdapterConfig::builder()
            .executable(self.executable())
            .timeout_secs(timeout_secs)
            .gui_stop_grace_secs(2u64)
            .build()
            .unwrap();
        DonpapiTools::new(&config, Arc::new(PlatformProcessManager::new()))
    }
}

pub fn object(value: serde_json::Value) -> Option<serde_json::Map<String, serde_json::Value>> {
    value.as_object().cloned()
}
