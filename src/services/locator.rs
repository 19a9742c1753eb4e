//! Finds the build-definitions file (`Make.defs`) and base configuration
//! (`defconfig`) for a resolved board.

use super::board_resolver::ResolvedBoard;
use super::paths::{expand_board_path, first_existing, is_readable_file};
use crate::error::ConfigureError;
use camino::{Utf8Path, Utf8PathBuf};
use std::iter;

pub const MAKE_DEFS: &str = "Make.defs";
pub const DEFCONFIG: &str = "defconfig";

/// Source files selected for materialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFiles {
    pub make_defs: Utf8PathBuf,
    pub defconfig: Utf8PathBuf,
}

/// Locate both source files.
pub fn locate_sources(
    root: &Utf8Path,
    board: &ResolvedBoard,
) -> Result<SourceFiles, ConfigureError> {
    let make_defs = locate_make_defs(root, board)?;
    let defconfig = locate_defconfig(&board.config_dir)?;
    Ok(SourceFiles {
        make_defs,
        defconfig,
    })
}

/// Find `Make.defs`, most specific location first:
///
/// 1. `boards/*/*/<board>/configs/<config>/Make.defs`
/// 2. `boards/*/*/<board>/scripts/Make.defs`
/// 3. `<config_dir>/Make.defs`
/// 4. `<config_dir>/../../scripts/Make.defs`
/// 5. `<config_dir>/../../../common/scripts/Make.defs`
pub fn locate_make_defs(
    root: &Utf8Path,
    board: &ResolvedBoard,
) -> Result<Utf8PathBuf, ConfigureError> {
    let name = board.selector.board();
    let config = board.selector.config();
    let config_dir = &board.config_dir;

    let candidates = iter::once_with(|| expand_board_path(root, name, &["configs", config, MAKE_DEFS]))
        .chain(iter::once_with(|| expand_board_path(root, name, &["scripts", MAKE_DEFS])))
        .flatten()
        .chain([
            config_dir.join(MAKE_DEFS),
            config_dir.join("../../scripts").join(MAKE_DEFS),
            config_dir.join("../../../common/scripts").join(MAKE_DEFS),
        ]);

    first_existing(candidates, is_readable_file)
        .ok_or_else(|| ConfigureError::MakeDefsNotFound(config_dir.clone()))
}

/// `defconfig` must sit directly in the configuration directory.
pub fn locate_defconfig(config_dir: &Utf8Path) -> Result<Utf8PathBuf, ConfigureError> {
    let defconfig = config_dir.join(DEFCONFIG);
    if is_readable_file(&defconfig) {
        Ok(defconfig)
    } else {
        Err(ConfigureError::DefconfigNotFound(defconfig))
    }
}
