//! Process-level plumbing shared by the ticketing binaries: layered
//! configuration, logging setup, home directory resolution and shutdown
//! signal handling.

pub mod config;
pub mod logging;
pub mod paths;
pub mod shutdown;

pub use config::{AppConfig, CliArgs, LoggingConfig, Section, ServerConfig};
