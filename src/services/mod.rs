//! Services module - the configuration pipeline.
//!
//! Each stage is a plain function returning a resolved value or a
//! [`ConfigureError`](crate::error::ConfigureError); [`Configurator`] chains
//! them and owns the only side-effecting collaborator, the [`ToolRunner`].
//!
//! # Stages
//!
//! - [`board_resolver`]: selector → configuration directory
//! - [`locator`]: configuration directory → `Make.defs` and `defconfig`
//! - [`materializer`]: existing-config policy, links, copies, snapshot
//! - [`apps_dir`]: apps-directory precedence and `.config` patching
//! - [`listing`]: `-L` enumeration of in-tree configurations
//! - [`tools`]: clean, config-expansion and host-setup invocations
//!
//! # Usage Example
//!
//! ```ignore
//! use boardconf::services::{Configurator, ConfigureRequest, ProcessToolRunner};
//!
//! let configurator = Configurator::new(&root, settings, ProcessToolRunner);
//! let outcome = configurator.configure(&ConfigureRequest::new("sim:nsh")).await?;
//! ```

pub mod apps_dir;
pub mod board_resolver;
pub mod configure;
pub mod listing;
pub mod locator;
pub mod materializer;
pub mod paths;
pub mod tools;

pub use apps_dir::{AppsDir, AppsDirSource};
pub use board_resolver::{ResolvedBoard, resolve_board};
pub use configure::{ConfigureOutcome, ConfigureRequest, ConfigureSummary, Configurator};
pub use listing::{BoardConfigId, list_configurations};
pub use locator::{SourceFiles, locate_sources};
pub use materializer::{BuildRoot, CleanPolicy};
pub use tools::{ProcessToolRunner, ToolInvocation, ToolRunner};
