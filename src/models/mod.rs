//! Data models for board configuration selection.
//!
//! - [`BoardSelector`]: the `board:config` token or out-of-tree path given by the user
//! - [`HostSelector`] / [`HostChoice`]: host environment picked on the command line
//! - [`ConfigFile`]: ordered `KEY=value` view of `.config` and `defconfig` files
//! - [`ToolSettings`]: tool names and conventional paths, loaded by [`ConfigManager`](crate::config::ConfigManager)

pub mod config;
pub mod host;
pub mod kconfig;
pub mod selector;

pub use config::ToolSettings;
pub use host::{HostChoice, HostSelector};
pub use kconfig::ConfigFile;
pub use selector::BoardSelector;
