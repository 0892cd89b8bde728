//! DonPAPI MCP Core - Platform-independent abstractions and configurations
//!
//! This crate provides the configuration, typed requests, result payloads,
//! error types and process traits shared by the platform crates and the
//! server.

pub mod config;
pub mod error;
pub mod invocation;
pub mod process;
pub mod request;

pub use config::*;
pub use error::*;
pub use invocation::*;
pub use process::*;
pub use request::*;
