//! List-mode: enumerate every in-tree `board:config` pair.

use super::locator::DEFCONFIG;
use super::paths::{subdirs, BOARDS_DIR};
use camino::Utf8Path;

/// An in-tree board configuration, printed as `board:config`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct BoardConfigId {
    pub board: String,
    pub config: String,
}

impl std::fmt::Display for BoardConfigId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.board, self.config)
    }
}

/// All `boards/<family>/<vendor>/<board>/configs/<config>/defconfig` entries,
/// sorted, keeping only boards whose name contains `filter` when given.
pub fn list_configurations(root: &Utf8Path, filter: Option<&str>) -> Vec<BoardConfigId> {
    let filter = filter.filter(|f| !f.is_empty());
    let mut found = Vec::new();

    for family in subdirs(&root.join(BOARDS_DIR)) {
        for vendor in subdirs(&family) {
            for board_dir in subdirs(&vendor) {
                let Some(board) = board_dir.file_name() else {
                    continue;
                };
                if filter.is_some_and(|f| !board.contains(f)) {
                    continue;
                }

                for config_dir in subdirs(&board_dir.join("configs")) {
                    if !config_dir.join(DEFCONFIG).is_file() {
                        continue;
                    }
                    if let Some(config) = config_dir.file_name() {
                        found.push(BoardConfigId {
                            board: board.to_string(),
                            config: config.to_string(),
                        });
                    }
                }
            }
        }
    }

    found.sort();
    tracing::debug!("Listed {} configurations", found.len());
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::fs;
    use tempfile::TempDir;

    fn add_config(root: &Utf8Path, rel: &str) {
        let dir = root.join(rel);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(DEFCONFIG), "").unwrap();
    }

    fn setup() -> (TempDir, Utf8PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        add_config(&root, "boards/sim/sim/sim/configs/nsh");
        add_config(&root, "boards/sim/sim/sim/configs/ostest");
        add_config(&root, "boards/arm/stm32/abc-board/configs/nsh");
        add_config(&root, "boards/arm/stm32/xabcx/configs/usb");
        // A config directory without defconfig is ignored
        fs::create_dir_all(root.join("boards/arm/stm32/xabcx/configs/empty")).unwrap();
        (temp_dir, root)
    }

    #[test]
    fn test_list_all_sorted() {
        let (_t, root) = setup();
        let listed: Vec<String> = list_configurations(&root, None)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            listed,
            vec!["abc-board:nsh", "sim:nsh", "sim:ostest", "xabcx:usb"]
        );
    }

    #[test]
    fn test_filter_by_board_substring() {
        let (_t, root) = setup();
        let listed: Vec<String> = list_configurations(&root, Some("abc"))
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(listed, vec!["abc-board:nsh", "xabcx:usb"]);
    }

    #[test]
    fn test_empty_filter_lists_everything() {
        let (_t, root) = setup();
        assert_eq!(list_configurations(&root, Some("")).len(), 4);
    }

    #[test]
    fn test_no_boards_dir() {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        assert!(list_configurations(&root, None).is_empty());
    }
}
