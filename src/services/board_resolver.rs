//! Maps a [`BoardSelector`] to a configuration directory.
//!
//! Lookup order:
//! 1. in-tree `<root>/boards/*/*/<board>/configs/<config>`
//! 2. the selector as a path relative to the build root
//! 3. the selector as given (absolute, or relative to the working directory)

use super::paths::{expand_board_path, first_existing, is_dir};
use crate::error::ConfigureError;
use crate::models::BoardSelector;
use camino::{Utf8Path, Utf8PathBuf};

/// Resolved configuration directory for a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBoard {
    pub selector: BoardSelector,
    pub config_dir: Utf8PathBuf,
    /// Found through the in-tree board taxonomy rather than a literal path.
    pub in_tree: bool,
}

/// Resolve a selector against the build root.
///
/// # Errors
///
/// - [`ConfigureError::AmbiguousBoard`] if the board name exists under more
///   than one family/vendor with the requested config
/// - [`ConfigureError::BoardNotFound`] if no candidate is a directory
pub fn resolve_board(
    root: &Utf8Path,
    selector: &BoardSelector,
) -> Result<ResolvedBoard, ConfigureError> {
    let mut in_tree: Vec<Utf8PathBuf> = if selector.config().is_empty() {
        Vec::new()
    } else {
        expand_board_path(root, selector.board(), &["configs", selector.config()])
            .into_iter()
            .filter(|p| p.is_dir())
            .collect()
    };

    if in_tree.len() > 1 {
        return Err(ConfigureError::AmbiguousBoard {
            selector: selector.raw().to_string(),
            candidates: in_tree.iter().map(|p| p.to_string()).collect(),
        });
    }

    if let Some(config_dir) = in_tree.pop() {
        tracing::info!("Resolved {} to in-tree {}", selector, config_dir);
        return Ok(ResolvedBoard {
            selector: selector.clone(),
            config_dir,
            in_tree: true,
        });
    }

    let literal = [root.join(selector.raw()), Utf8PathBuf::from(selector.raw())];
    match first_existing(literal, is_dir) {
        Some(config_dir) => {
            tracing::info!("Resolved {} to custom config {}", selector, config_dir);
            Ok(ResolvedBoard {
                selector: selector.clone(),
                config_dir,
                in_tree: false,
            })
        }
        None => Err(ConfigureError::BoardNotFound(selector.raw().to_string())),
    }
}
