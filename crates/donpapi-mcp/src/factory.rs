use donpapi_mcp_core::ProcessManagerFactory;

/// Platform-independent factory that selects the appropriate implementation at compile time
pub struct PlatformProcessManagerFactory;

impl ProcessManagerFactory for PlatformProcessManagerFactory {
    #[cfg(unix)]
    type Manager = donpapi_mcp_unix::UnixProcessManager;

    fn create_process_manager() -> Self::Manager {
        #[cfg(unix)]
        return donpapi_mcp_unix::UnixProcessManagerFactory::create_process_manager();
    }

    fn platform_name() -> &'static str {
        #[cfg(unix)]
        return donpapi_mcp_unix::UnixProcessManagerFactory::platform_name();
    }
}

/// Process manager selected for the current platform
pub type PlatformProcessManager = <PlatformProcessManagerFactory as ProcessManagerFactory>::Manager;
