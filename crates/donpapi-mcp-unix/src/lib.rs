mod unix_process_manager;

#[cfg(unix)]
pub use unix_process_manager::{UnixProcessHandle, UnixProcessManager};

#[cfg(unix)]
pub struct UnixProcessManagerFactory;

#[cfg(unix)]
impl donpapi_mcp_core::ProcessManagerFactory for UnixProcessManagerFactory {
    type Manager = UnixProcessManager;

    fn create_process_manager() -> UnixProcessManager {
        use donpapi_mcp_core::ProcessManager;
        UnixProcessManager::new()
    }

    fn platform_name() -> &'static str {
        "Unix"
    }
}
