//! Runs the configuration stages in order.
//!
//! board → source files → existing-config check → scratch dir → apps dir →
//! materialize → patch `.config` → host setup → `.config.orig` snapshot.
//!
//! The apps directory is resolved from the source defconfig before anything
//! is written, so a missing apps tree fails without touching the build root.

use super::apps_dir::{AppsDir, patch_config_file, resolve_apps_dir, validate_apps_dir};
use super::board_resolver::resolve_board;
use super::locator::locate_sources;
use super::materializer::{
    BuildRoot, CleanPolicy, Precondition, backup_defconfig, check_existing, expand_include_dirs,
    install_optional_files, link_make_defs, toggle_scratch_dir, write_original_snapshot,
};
use super::tools::{
    ToolRunner, clean_command_hint, clean_invocation, expand_invocation, host_setup_invocation,
};
use crate::error::ConfigureError;
use crate::models::{BoardSelector, ConfigFile, HostChoice, ToolSettings};
use camino::{Utf8Path, Utf8PathBuf};

/// Everything the command line contributes to one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigureRequest {
    pub selector: BoardSelector,
    pub host: HostChoice,
    pub apps_dir: Option<String>,
    pub clean: CleanPolicy,
    pub keep_scratch_dir: bool,
    /// Forwarded verbatim to the host-setup tool.
    pub passthrough: Vec<String>,
}

impl ConfigureRequest {
    pub fn new(selector: &str) -> Self {
        Self {
            selector: BoardSelector::parse(selector),
            host: HostChoice::default(),
            apps_dir: None,
            clean: CleanPolicy::default(),
            keep_scratch_dir: false,
            passthrough: Vec::new(),
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigureOutcome {
    /// The defconfig matches the backup from the previous run.
    Unchanged,
    Configured(ConfigureSummary),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigureSummary {
    pub config_dir: Utf8PathBuf,
    pub make_defs: Utf8PathBuf,
    pub defconfig: Utf8PathBuf,
    pub apps_dir: AppsDir,
    pub scratch_dir: Option<Utf8PathBuf>,
    pub installed: Vec<Utf8PathBuf>,
    pub cleaned: bool,
}

/// Drives one configuration run against a build root.
pub struct Configurator<R> {
    build: BuildRoot,
    settings: ToolSettings,
    runner: R,
}

impl<R: ToolRunner> Configurator<R> {
    pub fn new(root: &Utf8Path, settings: ToolSettings, runner: R) -> Self {
        Self {
            build: BuildRoot::new(root),
            settings,
            runner,
        }
    }

    pub fn build_root(&self) -> &BuildRoot {
        &self.build
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Select and materialize a configuration.
    ///
    /// # Errors
    ///
    /// Any [`ConfigureError`]; the build root is left as it was at the point
    /// of failure.
    pub async fn configure(
        &self,
        request: &ConfigureRequest,
    ) -> Result<ConfigureOutcome, ConfigureError> {
        let root = &self.build.root;

        let board = resolve_board(root, &request.selector)?;
        let sources = locate_sources(root, &board)?;
        tracing::info!(
            "Sources - Make.defs: {}, defconfig: {}",
            sources.make_defs,
            sources.defconfig
        );

        let cleaned = match check_existing(&self.build, &sources.defconfig, request.clean)? {
            Precondition::Fresh => false,
            Precondition::Unchanged => {
                tracing::info!("No configuration change");
                return Ok(ConfigureOutcome::Unchanged);
            }
            Precondition::Refuse => {
                return Err(ConfigureError::AlreadyConfigured {
                    clean_command: clean_command_hint(&self.settings, request.host),
                });
            }
            Precondition::CleanFirst => {
                tracing::info!("Cleaning previous configuration");
                self.runner
                    .run(&clean_invocation(&self.settings, request.host, root))
                    .await?;
                true
            }
        };

        let scratch_dir =
            toggle_scratch_dir(root, &self.settings.scratch_dir, request.keep_scratch_dir)?;

        let defconfig = ConfigFile::load(&sources.defconfig)?;
        let apps_dir = resolve_apps_dir(
            root,
            &self.settings,
            request.apps_dir.as_deref(),
            &defconfig,
            request.host,
        )?;
        validate_apps_dir(root, &apps_dir)?;

        tracing::info!("Copy files");
        link_make_defs(&sources.make_defs, &self.build.make_defs)?;

        let include_dirs = expand_include_dirs(root, &board.config_dir);
        self.runner
            .run(&expand_invocation(
                &self.settings,
                root,
                &include_dirs,
                &self.build.config,
                &sources.defconfig,
            ))
            .await?;

        backup_defconfig(&sources.defconfig, &self.build.backup_defconfig)?;
        let installed =
            install_optional_files(&board.config_dir, root, &self.settings.optional_files)?;

        patch_config_file(&self.build.config, &apps_dir, &request.selector)?;

        self.runner
            .run(&host_setup_invocation(
                &self.settings,
                root,
                request.host,
                &request.passthrough,
            ))
            .await?;

        write_original_snapshot(&self.build)?;

        Ok(ConfigureOutcome::Configured(ConfigureSummary {
            config_dir: board.config_dir,
            make_defs: sources.make_defs,
            defconfig: sources.defconfig,
            apps_dir,
            scratch_dir,
            installed,
            cleaned,
        }))
    }
}
