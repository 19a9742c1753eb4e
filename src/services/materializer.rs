//! Materializes the selected configuration into the build root.
//!
//! The destination files are fixed: `Make.defs` (link), `.config`
//! (expanded), `defconfig` (backup of the source, used to detect re-runs)
//! and `.config.orig` (snapshot without the base-defconfig marker).

use super::locator::{DEFCONFIG, MAKE_DEFS};
use crate::error::ConfigureError;
use crate::models::kconfig::BASE_DEFCONFIG_KEY;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Destination paths inside a build root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRoot {
    pub root: Utf8PathBuf,
    pub make_defs: Utf8PathBuf,
    pub config: Utf8PathBuf,
    pub original_config: Utf8PathBuf,
    pub backup_defconfig: Utf8PathBuf,
}

impl BuildRoot {
    pub fn new(root: &Utf8Path) -> Self {
        Self {
            root: root.to_path_buf(),
            make_defs: root.join(MAKE_DEFS),
            config: root.join(".config"),
            original_config: root.join(".config.orig"),
            backup_defconfig: root.join(DEFCONFIG),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_file()
    }
}

/// Clean-before-reconfigure policy from `-E` / `-e`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanPolicy {
    /// `-E`: clean whenever a configuration is present.
    pub always: bool,
    /// `-e`: clean only if the configuration differs.
    pub on_change: bool,
}

/// What to do about an existing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    /// Nothing configured yet.
    Fresh,
    /// Configured; run the clean target before materializing.
    CleanFirst,
    /// Same defconfig as last time; nothing to do.
    Unchanged,
    /// Configured with a different defconfig and no clean flag given.
    Refuse,
}

/// Decide how to treat an existing `.config`.
///
/// The backup comparison runs before anything in the build root is touched.
pub fn check_existing(
    build: &BuildRoot,
    defconfig: &Utf8Path,
    policy: CleanPolicy,
) -> Result<Precondition, ConfigureError> {
    if !build.is_configured() {
        return Ok(Precondition::Fresh);
    }

    if policy.always {
        return Ok(Precondition::CleanFirst);
    }

    if same_contents(defconfig, &build.backup_defconfig)? {
        return Ok(Precondition::Unchanged);
    }

    if policy.on_change {
        Ok(Precondition::CleanFirst)
    } else {
        Ok(Precondition::Refuse)
    }
}

/// Byte equality; a missing file never matches.
pub fn same_contents(a: &Utf8Path, b: &Utf8Path) -> Result<bool, ConfigureError> {
    if !b.is_file() {
        return Ok(false);
    }
    Ok(fs::read(a)? == fs::read(b)?)
}

/// Create the scratch directory when requested, otherwise remove it.
///
/// Returns the directory when it exists after the call.
pub fn toggle_scratch_dir(
    root: &Utf8Path,
    scratch: &str,
    keep: bool,
) -> Result<Option<Utf8PathBuf>, ConfigureError> {
    let dir = root.join(scratch);

    if keep {
        if !dir.is_dir() {
            fs::create_dir_all(&dir)?;
        }
        tracing::info!("Creating {} folder for third-party packages", dir);
        Ok(Some(dir))
    } else {
        if dir.is_dir() {
            tracing::info!("Removing {}", dir);
            fs::remove_dir_all(&dir)?;
        }
        Ok(None)
    }
}

/// Replace `dest` with a link to `src` (a copy where symlinks are unavailable).
pub fn link_make_defs(src: &Utf8Path, dest: &Utf8Path) -> Result<(), ConfigureError> {
    let link = || -> std::io::Result<()> {
        if dest.symlink_metadata().is_ok() {
            fs::remove_file(dest)?;
        }
        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(src, dest)
        }
        #[cfg(not(unix))]
        {
            fs::copy(src, dest).map(|_| ())
        }
    };

    link().map_err(|source| ConfigureError::LinkFailed {
        src: src.to_path_buf(),
        source,
    })?;
    tracing::debug!("Linked {} -> {}", dest, src);
    Ok(())
}

/// Include-search directories for the expansion helper, in lookup order.
pub fn expand_include_dirs(root: &Utf8Path, config_dir: &Utf8Path) -> Vec<Utf8PathBuf> {
    vec![
        config_dir.join("../../common/configs"),
        config_dir.join("../common"),
        config_dir.to_path_buf(),
        root.join(super::paths::BOARDS_DIR),
    ]
}

/// Copy the source defconfig to the backup location, mode 0644.
pub fn backup_defconfig(src: &Utf8Path, dest: &Utf8Path) -> Result<(), ConfigureError> {
    install_file(src, dest, 0o644).map_err(|source| ConfigureError::BackupFailed {
        src: src.to_path_buf(),
        source,
    })
}

/// Copy whichever optional IDE/debugger files exist in the config directory.
pub fn install_optional_files(
    config_dir: &Utf8Path,
    root: &Utf8Path,
    names: &[String],
) -> Result<Vec<Utf8PathBuf>, ConfigureError> {
    let mut installed = Vec::new();

    for name in names {
        let src = config_dir.join(name);
        if !src.is_file() {
            continue;
        }
        let dest = root.join(name);
        install_file(&src, &dest, 0o644).map_err(|source| ConfigureError::InstallFailed {
            src: src.clone(),
            source,
        })?;
        tracing::debug!("Installed {}", dest);
        installed.push(dest);
    }

    Ok(installed)
}

fn install_file(src: &Utf8Path, dest: &Utf8Path, mode: u32) -> std::io::Result<()> {
    fs::copy(src, dest)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dest, fs::Permissions::from_mode(mode))?;
    }
    #[cfg(not(unix))]
    let _ = mode;
    Ok(())
}

/// Write `.config.orig`: `.config` minus any base-defconfig marker line.
pub fn write_original_snapshot(build: &BuildRoot) -> Result<(), ConfigureError> {
    let content = fs::read_to_string(&build.config)?;
    let snapshot: String = content
        .lines()
        .filter(|line| !line.contains(BASE_DEFCONFIG_KEY))
        .flat_map(|line| [line, "\n"])
        .collect();
    fs::write(&build.original_config, snapshot)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, BuildRoot, Utf8PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let base = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let root = base.join("nuttx");
        let config_dir = base.join("cfg");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join(DEFCONFIG), "CONFIG_ARCH=\"sim\"\n").unwrap();
        (temp_dir, BuildRoot::new(&root), config_dir)
    }

    #[test]
    fn test_fresh_root() {
        let (_t, build, cfg) = setup();
        let pre = check_existing(&build, &cfg.join(DEFCONFIG), CleanPolicy::default()).unwrap();
        assert_eq!(pre, Precondition::Fresh);
    }

    #[test]
    fn test_unchanged_when_backup_matches() {
        let (_t, build, cfg) = setup();
        fs::write(&build.config, "x").unwrap();
        fs::copy(cfg.join(DEFCONFIG), &build.backup_defconfig).unwrap();

        let pre = check_existing(&build, &cfg.join(DEFCONFIG), CleanPolicy::default()).unwrap();
        assert_eq!(pre, Precondition::Unchanged);

        let on_change = CleanPolicy { always: false, on_change: true };
        let pre = check_existing(&build, &cfg.join(DEFCONFIG), on_change).unwrap();
        assert_eq!(pre, Precondition::Unchanged);
    }

    #[test]
    fn test_always_clean_beats_unchanged() {
        let (_t, build, cfg) = setup();
        fs::write(&build.config, "x").unwrap();
        fs::copy(cfg.join(DEFCONFIG), &build.backup_defconfig).unwrap();

        let policy = CleanPolicy { always: true, on_change: false };
        let pre = check_existing(&build, &cfg.join(DEFCONFIG), policy).unwrap();
        assert_eq!(pre, Precondition::CleanFirst);
    }

    #[test]
    fn test_changed_config() {
        let (_t, build, cfg) = setup();
        fs::write(&build.config, "x").unwrap();
        fs::write(&build.backup_defconfig, "CONFIG_ARCH=\"arm\"\n").unwrap();

        let pre = check_existing(&build, &cfg.join(DEFCONFIG), CleanPolicy::default()).unwrap();
        assert_eq!(pre, Precondition::Refuse);

        let policy = CleanPolicy { always: false, on_change: true };
        let pre = check_existing(&build, &cfg.join(DEFCONFIG), policy).unwrap();
        assert_eq!(pre, Precondition::CleanFirst);
    }

    #[test]
    fn test_configured_without_backup_is_a_change() {
        let (_t, build, cfg) = setup();
        fs::write(&build.config, "x").unwrap();
        let pre = check_existing(&build, &cfg.join(DEFCONFIG), CleanPolicy::default()).unwrap();
        assert_eq!(pre, Precondition::Refuse);
    }

    #[test]
    fn test_scratch_dir_toggle() {
        let (_t, build, _cfg) = setup();
        let created = toggle_scratch_dir(&build.root, "../nxtmpdir", true).unwrap();
        let dir = created.unwrap();
        assert!(dir.is_dir());

        // Requesting again keeps it
        assert!(toggle_scratch_dir(&build.root, "../nxtmpdir", true).unwrap().is_some());
        assert!(dir.is_dir());

        assert!(toggle_scratch_dir(&build.root, "../nxtmpdir", false).unwrap().is_none());
        assert!(!dir.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_link_replaces_existing() {
        let (_t, build, cfg) = setup();
        let src = cfg.join(MAKE_DEFS);
        fs::write(&src, "include stuff\n").unwrap();
        fs::write(&build.make_defs, "stale\n").unwrap();

        link_make_defs(&src, &build.make_defs).unwrap();
        let target = fs::read_link(&build.make_defs).unwrap();
        assert_eq!(target, src.as_std_path());
        assert_eq!(fs::read_to_string(&build.make_defs).unwrap(), "include stuff\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_backup_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let (_t, build, cfg) = setup();
        backup_defconfig(&cfg.join(DEFCONFIG), &build.backup_defconfig).unwrap();
        let mode = fs::metadata(&build.backup_defconfig).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_backup_failure_code() {
        let (_t, build, cfg) = setup();
        let err = backup_defconfig(&cfg.join("missing"), &build.backup_defconfig).unwrap_err();
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn test_optional_files_subset() {
        let (_t, build, cfg) = setup();
        fs::write(cfg.join(".gdbinit"), "target remote :3333\n").unwrap();
        let names: Vec<String> = [".gdbinit", ".cproject", ".project"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let installed = install_optional_files(&cfg, &build.root, &names).unwrap();
        assert_eq!(installed, vec![build.root.join(".gdbinit")]);
        assert!(!build.root.join(".project").exists());
    }

    #[test]
    fn test_include_dir_order() {
        let dirs = expand_include_dirs(Utf8Path::new("/r"), Utf8Path::new("/r/boards/a/b/c/configs/nsh"));
        assert_eq!(dirs.len(), 4);
        assert_eq!(dirs[2], Utf8PathBuf::from("/r/boards/a/b/c/configs/nsh"));
        assert_eq!(dirs[3], Utf8PathBuf::from("/r/boards"));
    }

    #[test]
    fn test_snapshot_drops_marker() {
        let (_t, build, _cfg) = setup();
        fs::write(
            &build.config,
            "CONFIG_ARCH=\"sim\"\nCONFIG_BASE_DEFCONFIG=\"sim:nsh\"\nCONFIG_APPS_DIR=\"../apps\"\n",
        )
        .unwrap();

        write_original_snapshot(&build).unwrap();
        assert_eq!(
            fs::read_to_string(&build.original_config).unwrap(),
            "CONFIG_ARCH=\"sim\"\nCONFIG_APPS_DIR=\"../apps\"\n"
        );
    }
}
