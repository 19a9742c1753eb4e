//! Command line definition.
//!
//! Options come first; the first token that is not a known option is the
//! board selection and everything after it is passed through verbatim to the
//! host-setup tool.

use crate::models::{HostChoice, HostSelector};
use crate::services::{CleanPolicy, ConfigureRequest};
use camino::Utf8PathBuf;
use clap::Parser;

/// Select a board configuration for the build tree.
#[derive(Parser, Debug)]
#[command(
    name = "boardconf",
    version,
    about,
    after_help = "<BOARD-SELECTION> is either:\n  \
        For in-tree boards: a <board-name>:<config-name> pair, e.g. sim:nsh\n  \
        For out-of-tree boards: a path to the board's configuration directory,\n  \
        either relative to the build root (../myboards/myboard/configs/nsh) or absolute.\n\n\
        Examples:\n  boardconf sim:nsh\n  boardconf -e -a ../apps stm32f4discovery:usbnsh\n  boardconf -L stm32"
)]
pub struct Cli {
    /// Run the clean target first if already configured
    #[arg(short = 'E')]
    pub enforce_distclean: bool,

    /// Run the clean target first if the configuration changed
    #[arg(short = 'e')]
    pub distclean: bool,

    /// Keep a scratch folder (../nxtmpdir) for third-party packages
    #[arg(short = 'S')]
    pub scratch_dir: bool,

    /// Linux host environment
    #[arg(short = 'l', overrides_with_all = ["macos", "cygwin", "mingw", "native", "bsd"])]
    pub linux: bool,

    /// macOS host environment
    #[arg(short = 'm', overrides_with_all = ["linux", "cygwin", "mingw", "native", "bsd"])]
    pub macos: bool,

    /// Windows host with Cygwin
    #[arg(short = 'c', overrides_with_all = ["linux", "macos", "mingw", "native", "bsd"])]
    pub cygwin: bool,

    /// Windows host with MinGW/MSYS
    #[arg(short = 'g', overrides_with_all = ["linux", "macos", "cygwin", "native", "bsd"])]
    pub mingw: bool,

    /// Windows host, native Windows environment
    #[arg(short = 'n', overrides_with_all = ["linux", "macos", "cygwin", "mingw", "bsd"])]
    pub native: bool,

    /// *BSD host environment
    #[arg(short = 'B', overrides_with_all = ["linux", "macos", "cygwin", "mingw", "native"])]
    pub bsd: bool,

    /// List available configurations, optionally only boards matching BOARD
    #[arg(short = 'L', value_name = "BOARD", num_args = 0..=1, default_missing_value = "")]
    pub list: Option<String>,

    /// Path to the apps directory, relative to the build root or absolute
    #[arg(short = 'a', value_name = "APP-DIR")]
    pub apps_dir: Option<String>,

    /// Build root to configure
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: Utf8PathBuf,

    /// Debug logging
    #[arg(long)]
    pub verbose: bool,

    /// <BOARD-SELECTION> followed by options passed through to make
    #[arg(
        value_name = "BOARD-SELECTION",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        required_unless_present = "list"
    )]
    pub selection: Vec<String>,
}

impl Cli {
    /// Host selected on the command line; the last host flag wins.
    pub fn host(&self) -> HostChoice {
        let selected = [
            (self.linux, HostSelector::Linux),
            (self.macos, HostSelector::MacOs),
            (self.cygwin, HostSelector::Cygwin),
            (self.mingw, HostSelector::MinGw),
            (self.native, HostSelector::WindowsNative),
            (self.bsd, HostSelector::Bsd),
        ]
        .into_iter()
        .find_map(|(set, host)| set.then_some(host));
        HostChoice(selected)
    }

    /// Board filter when list-mode was requested.
    pub fn list_filter(&self) -> Option<&str> {
        self.list.as_deref()
    }

    /// Build the pipeline request. `None` when no selector was given.
    pub fn to_request(&self) -> Option<ConfigureRequest> {
        let (selector, passthrough) = self.selection.split_first()?;
        let mut request = ConfigureRequest::new(selector);
        request.host = self.host();
        request.apps_dir = self.apps_dir.clone();
        request.clean = CleanPolicy {
            always: self.enforce_distclean,
            on_change: self.distclean,
        };
        request.keep_scratch_dir = self.scratch_dir;
        request.passthrough = passthrough.to_vec();
        Some(request)
    }
}
