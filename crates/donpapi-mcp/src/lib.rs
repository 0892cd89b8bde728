//! MCP adapter around the DonPAPI command line tool.
//!
//! Three tools are exposed: a one-shot collection run and start/stop of the
//! DonPAPI web GUI. See [`dispatch::DonpapiTools`] for the routing and
//! [`server::DonpapiServer`] for the MCP surface.

pub mod dispatch;
pub mod factory;
pub mod gui;
pub mod logging;
pub mod registry;
pub mod runner;
pub mod server;

pub use dispatch::{DonpapiTools, ToolOutput};
pub use factory::{PlatformProcessManager, PlatformProcessManagerFactory};
pub use gui::GuiManager;
pub use runner::CommandRunner;
pub use server::DonpapiServer;

// Re-export core functionality
pub use donpapi_mcp_core::*;
