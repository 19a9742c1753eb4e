//! Shared fixtures: a throwaway build root next to optional apps trees, and a
//! tool runner that emulates the external helpers.

#![allow(dead_code)]

use boardconf::services::{ToolInvocation, ToolRunner};
use boardconf::{ConfigureError, Configurator, ToolSettings};
use camino::{Utf8Path, Utf8PathBuf};
use std::cell::RefCell;
use std::fs;
use tempfile::TempDir;

/// `<tmp>/nuttx` as the build root, siblings available for apps trees.
pub struct Fixture {
    _temp_dir: TempDir,
    pub base: Utf8PathBuf,
    pub root: Utf8PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let base = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let root = base.join("nuttx");
        fs::create_dir_all(&root).unwrap();
        Self {
            _temp_dir: temp_dir,
            base,
            root,
        }
    }

    /// Create `boards/<family>/<vendor>/<board>/configs/<config>/defconfig`
    /// plus a board-level `scripts/Make.defs`. Returns the config directory.
    pub fn add_board(
        &self,
        family: &str,
        vendor: &str,
        board: &str,
        config: &str,
        defconfig: &str,
    ) -> Utf8PathBuf {
        let board_dir = self.root.join("boards").join(family).join(vendor).join(board);
        let config_dir = board_dir.join("configs").join(config);
        fs::create_dir_all(&config_dir).unwrap();
        fs::create_dir_all(board_dir.join("scripts")).unwrap();
        fs::write(config_dir.join("defconfig"), defconfig).unwrap();
        fs::write(board_dir.join("scripts/Make.defs"), "include $(TOPDIR)/.config\n").unwrap();
        config_dir
    }

    /// Create a directory next to the build root, e.g. `apps`.
    pub fn add_sibling(&self, name: &str) -> Utf8PathBuf {
        let dir = self.base.join(name);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    pub fn path(&self, rel: &str) -> Utf8PathBuf {
        self.root.join(rel)
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).unwrap()
    }

    pub fn configurator(&self) -> Configurator<RecordingRunner> {
        Configurator::new(&self.root, ToolSettings::default(), RecordingRunner::default())
    }
}

/// Emulates the external tools and records every invocation.
///
/// - expansion (`-o <out> <in>`): copies the defconfig to `.config`
/// - clean (`-C <root> distclean`): removes the materialized files
/// - host setup: no-op
#[derive(Default)]
pub struct RecordingRunner {
    pub calls: RefCell<Vec<ToolInvocation>>,
}

impl RecordingRunner {
    pub fn programs(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.program.clone()).collect()
    }
}

impl ToolRunner for RecordingRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<(), ConfigureError> {
        if let Some(output) = invocation.value_of("-o") {
            let input = invocation.args.last().cloned().unwrap_or_default();
            fs::copy(input, output)?;
        } else if let Some(root) = invocation.value_of("-C") {
            let root = Utf8Path::new(root);
            for name in [".config", ".config.orig", "defconfig", "Make.defs"] {
                let path = root.join(name);
                if path.symlink_metadata().is_ok() {
                    fs::remove_file(path)?;
                }
            }
        }
        self.calls.borrow_mut().push(invocation.clone());
        Ok(())
    }
}
