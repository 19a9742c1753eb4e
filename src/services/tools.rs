//! External collaborators: the clean target, the config-expansion helper and
//! the host-setup helper.
//!
//! Each is described by a [`ToolInvocation`] and executed through a
//! [`ToolRunner`], so the pipeline can be driven by a fake runner in tests.

use crate::error::ConfigureError;
use crate::models::{HostChoice, ToolSettings};
use camino::{Utf8Path, Utf8PathBuf};
use std::time::Instant;
use tokio::process::Command;

/// A single external program run, waited on to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Utf8PathBuf,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>, current_dir: &Utf8Path) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: current_dir.to_path_buf(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Value following `flag` in the argument list, if any.
    pub fn value_of(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    /// Shell-like rendering for logs and error messages.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Executes external tools.
#[allow(async_fn_in_trait)]
pub trait ToolRunner {
    /// Run the tool to completion. A non-zero exit status is an error.
    async fn run(&self, invocation: &ToolInvocation) -> Result<(), ConfigureError>;
}

/// Runs tools as child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessToolRunner;

impl ToolRunner for ProcessToolRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<(), ConfigureError> {
        tracing::info!("Executing: {}", invocation.command_line());

        let start = Instant::now();
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.current_dir)
            .status()
            .await
            .map_err(|source| ConfigureError::ToolSpawn {
                tool: invocation.program.clone(),
                source,
            })?;

        tracing::debug!(
            "{} completed in {:.2}s with {}",
            invocation.program,
            start.elapsed().as_secs_f32(),
            status
        );

        if status.success() {
            Ok(())
        } else {
            Err(ConfigureError::ToolFailed {
                tool: invocation.command_line(),
                status: status.to_string(),
            })
        }
    }
}

/// `make -C <root> distclean`, with the BSD make name when `-B` was given.
pub fn clean_invocation(settings: &ToolSettings, host: HostChoice, root: &Utf8Path) -> ToolInvocation {
    ToolInvocation::new(settings.make_for(host.uses_alternate_make()), root)
        .arg("-C")
        .arg(root.as_str())
        .arg(settings.clean_target.as_str())
}

/// Human-readable clean command for the "already configured" message.
pub fn clean_command_hint(settings: &ToolSettings, host: HostChoice) -> String {
    format!(
        "{} {}",
        settings.make_for(host.uses_alternate_make()),
        settings.clean_target
    )
}

/// Config-expansion helper: `-I <dir>... -o <output> <input>`.
pub fn expand_invocation(
    settings: &ToolSettings,
    root: &Utf8Path,
    include_dirs: &[Utf8PathBuf],
    output: &Utf8Path,
    input: &Utf8Path,
) -> ToolInvocation {
    let mut invocation = ToolInvocation::new(root.join(&settings.expand_tool).into_string(), root);
    for dir in include_dirs {
        invocation = invocation.arg("-I").arg(dir.as_str());
    }
    invocation.arg("-o").arg(output.as_str()).arg(input.as_str())
}

/// Host-setup helper: selected host flag, then the pass-through options.
pub fn host_setup_invocation(
    settings: &ToolSettings,
    root: &Utf8Path,
    host: HostChoice,
    passthrough: &[String],
) -> ToolInvocation {
    ToolInvocation::new(root.join(&settings.host_setup_tool).into_string(), root)
        .args(host.flag())
        .args(passthrough.iter().cloned())
}
