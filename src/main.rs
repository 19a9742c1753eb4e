//! boardconf - select a board configuration for an RTOS build tree
//!
//! Main entry point for the command line tool.
//!
//! # Execution Flow
//!
//! 1. Parse the command line (usage errors exit 2, `-h` exits 0)
//! 2. Canonicalize the build root and load [`ToolSettings`](boardconf::ToolSettings)
//! 3. Initialize logging (stderr, plus rolling file logs when configured)
//! 4. `-L`: print matching `board:config` pairs and exit
//! 5. Otherwise run the [`Configurator`] on a current-thread tokio runtime
//! 6. Map the outcome to the process exit code
//!
//! # Exit Codes
//!
//! 0 success or no change, 2 missing selector, 3 board not found,
//! 4 Make.defs not found, 5 defconfig not found, 6 already configured,
//! 7 apps directory not found, 8 link failure, 10 backup failure,
//! 1 anything else.

use anyhow::{Context, Result, anyhow};
use boardconf::cli::Cli;
use boardconf::services::{ConfigureOutcome, ProcessToolRunner, list_configurations};
use boardconf::{APP_NAME, ConfigManager, ConfigureError, Configurator, VERSION};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{CommandFactory, Parser};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2));
        }
    };

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let root = canonical_root(&cli.root)?;
    let settings = ConfigManager::new(&root).load_settings()?;

    let log_dir = settings.log_dir.as_deref().map(|dir| root.join(dir));
    let _guard = boardconf::logging::setup_logging(log_dir.as_deref(), cli.verbose)?;

    tracing::debug!("Starting {} v{} in {}", APP_NAME, VERSION, root);

    if let Some(filter) = cli.list_filter() {
        for id in list_configurations(&root, Some(filter)) {
            println!("{id}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let Some(request) = cli.to_request() else {
        return Ok(report_error(&ConfigureError::MissingSelector));
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    let configurator = Configurator::new(&root, settings, ProcessToolRunner);

    match runtime.block_on(configurator.configure(&request)) {
        Ok(ConfigureOutcome::Unchanged) => {
            println!("No configuration change.");
            Ok(ExitCode::SUCCESS)
        }
        Ok(ConfigureOutcome::Configured(summary)) => {
            println!(
                "Configured {} from {} (apps: {})",
                request.selector,
                summary.config_dir,
                summary.apps_dir.posix()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Ok(report_error(&e)),
    }
}

fn canonical_root(root: &Utf8Path) -> Result<Utf8PathBuf> {
    let canonical = std::fs::canonicalize(root)
        .with_context(|| format!("Build root {} is not accessible", root))?;
    Utf8PathBuf::from_path_buf(canonical)
        .map_err(|p| anyhow!("Build root is not valid UTF-8: {}", p.display()))
}

fn report_error(err: &ConfigureError) -> ExitCode {
    tracing::error!("{}", err);

    if matches!(
        err,
        ConfigureError::BoardNotFound(_) | ConfigureError::AmbiguousBoard { .. }
    ) {
        eprintln!("Run {} -L to list available configurations.", APP_NAME);
    }
    if err.wants_usage() {
        eprintln!("{}", Cli::command().render_usage());
    }

    ExitCode::from(err.exit_code())
}
