//! Path helpers shared by the resolution stages.
//!
//! Board lookup, Make.defs lookup and apps-directory discovery all walk an
//! ordered list of candidates and keep the first acceptable one; they share
//! [`first_existing`] instead of nesting their own fallbacks.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs::{self, File};

/// Directory holding the in-tree board taxonomy: `boards/<family>/<vendor>/<board>`.
pub const BOARDS_DIR: &str = "boards";

/// Return the first candidate accepted by `accept`.
///
/// Candidates are produced lazily, so later candidates are never computed
/// once an earlier one matches.
pub fn first_existing<I, F>(candidates: I, accept: F) -> Option<Utf8PathBuf>
where
    I: IntoIterator<Item = Utf8PathBuf>,
    F: Fn(&Utf8Path) -> bool,
{
    for candidate in candidates {
        if accept(&candidate) {
            tracing::debug!("Using {}", candidate);
            return Some(candidate);
        }
        tracing::debug!("Skipping {}", candidate);
    }
    None
}

pub fn is_dir(path: &Utf8Path) -> bool {
    path.is_dir()
}

/// A regular file we can open for reading.
pub fn is_readable_file(path: &Utf8Path) -> bool {
    path.is_file() && File::open(path).is_ok()
}

/// Sorted UTF-8 subdirectories of `dir`. Unreadable or missing dirs yield nothing.
pub fn subdirs(dir: &Utf8Path) -> Vec<Utf8PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut dirs: Vec<Utf8PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| Utf8PathBuf::from_path_buf(entry.path()).ok())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    dirs
}

/// Expand `<root>/boards/*/*/<board>/<tail...>` to the paths that exist.
pub fn expand_board_path(root: &Utf8Path, board: &str, tail: &[&str]) -> Vec<Utf8PathBuf> {
    if board.is_empty() {
        return Vec::new();
    }

    let mut found = Vec::new();
    for family in subdirs(&root.join(BOARDS_DIR)) {
        for vendor in subdirs(&family) {
            let mut path = vendor.join(board);
            for part in tail {
                path.push(part);
            }
            if path.exists() {
                found.push(path);
            }
        }
    }
    found
}

/// Replace every `\` with `/`.
pub fn to_posix(path: &str) -> String {
    path.replace('\\', "/")
}

/// Native-Windows form for a quoted config value: separators become `\\`.
pub fn to_windows_escaped(path: &str) -> String {
    to_posix(path).replace('/', "\\\\")
}
