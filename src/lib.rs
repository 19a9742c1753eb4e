// boardconf - board/platform configuration selector for RTOS build trees
//
// This is the library crate containing the resolution and materialization logic.
// The binary crate (main.rs) provides the command line entry point.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use error::ConfigureError;
pub use models::{BoardSelector, ConfigFile, HostChoice, HostSelector, ToolSettings};
pub use services::{ConfigureOutcome, ConfigureRequest, Configurator};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
