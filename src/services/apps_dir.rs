//! Apps-directory resolution and `.config` patching.
//!
//! Precedence, first match wins:
//! 1. `-a <dir>` on the command line
//! 2. `CONFIG_APPS_DIR` in the source defconfig, unless the native-Windows
//!    setting changed (the recorded path would have the wrong syntax)
//! 3. the conventional sibling directories, then `../apps-<version>`

use super::paths::{first_existing, to_posix, to_windows_escaped};
use crate::error::ConfigureError;
use crate::models::kconfig::{
    APPS_DIR_KEY, BASE_DEFCONFIG_KEY, VERSION_STRING_KEY, WINDOWS_NATIVE_KEY,
};
use crate::models::{BoardSelector, ConfigFile, HostChoice, ToolSettings};
use camino::{Utf8Path, Utf8PathBuf};
use std::iter;

/// Prefix of a versioned apps checkout next to the build root.
pub const VERSIONED_APPS_PREFIX: &str = "../apps-";

/// Where the apps directory came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppsDirSource {
    CommandLine,
    Defconfig,
    Discovered,
}

/// Resolved apps directory, as given (absolute or relative to the build root).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppsDir {
    pub path: String,
    pub source: AppsDirSource,
    pub windows_native: bool,
}

impl AppsDir {
    pub fn posix(&self) -> String {
        to_posix(&self.path)
    }

    /// Path as written to `CONFIG_APPS_DIR` for the selected host.
    pub fn config_value(&self) -> String {
        if self.windows_native {
            to_windows_escaped(&self.path)
        } else {
            self.posix()
        }
    }
}

/// Native-Windows setting recorded in a defconfig. Absent means no.
pub fn recorded_windows_native(defconfig: &ConfigFile) -> bool {
    defconfig.get_unquoted(WINDOWS_NATIVE_KEY) == Some("y")
}

/// `CONFIG_VERSION_STRING` from the version-info file, if the file exists and sets it.
pub fn read_version_string(path: &Utf8Path) -> Option<String> {
    if !path.is_file() {
        return None;
    }
    match ConfigFile::load(path) {
        Ok(file) => file
            .get_unquoted(VERSION_STRING_KEY)
            .filter(|v| !v.is_empty())
            .map(str::to_string),
        Err(e) => {
            tracing::warn!("Could not read version file {}: {}", path, e);
            None
        }
    }
}

/// Pick the apps directory.
///
/// # Errors
///
/// [`ConfigureError::AppsDirNotFound`] when nothing was given and no
/// conventional directory exists.
pub fn resolve_apps_dir(
    root: &Utf8Path,
    settings: &ToolSettings,
    explicit: Option<&str>,
    defconfig: &ConfigFile,
    host: HostChoice,
) -> Result<AppsDir, ConfigureError> {
    let recorded_native = recorded_windows_native(defconfig);
    let windows_native = host.windows_native(recorded_native);

    if let Some(path) = explicit.filter(|p| !p.is_empty()) {
        tracing::info!("Using apps directory from command line: {}", path);
        return Ok(AppsDir {
            path: path.to_string(),
            source: AppsDirSource::CommandLine,
            windows_native,
        });
    }

    if recorded_native == windows_native {
        if let Some(path) = defconfig.get_unquoted(APPS_DIR_KEY).filter(|p| !p.is_empty()) {
            tracing::info!("Using apps directory from defconfig: {}", path);
            return Ok(AppsDir {
                path: path.to_string(),
                source: AppsDirSource::Defconfig,
                windows_native,
            });
        }
    } else {
        tracing::info!("Host changed, ignoring {} from defconfig", APPS_DIR_KEY);
    }

    let version_file = root.join(&settings.version_file);
    let candidates = settings
        .apps_dir_candidates
        .iter()
        .map(|candidate| Utf8PathBuf::from(candidate.as_str()))
        .chain(
            iter::once_with(|| read_version_string(&version_file))
                .flatten()
                .map(|v| Utf8PathBuf::from(format!("{VERSIONED_APPS_PREFIX}{v}"))),
        );

    let found = first_existing(candidates, |rel| root.join(rel).is_dir())
        .ok_or(ConfigureError::AppsDirNotFound)?;

    tracing::info!("Discovered apps directory: {}", found);
    Ok(AppsDir {
        path: found.into_string(),
        source: AppsDirSource::Discovered,
        windows_native,
    })
}

/// The apps directory must exist, checked in POSIX form against the build root.
pub fn validate_apps_dir(root: &Utf8Path, apps: &AppsDir) -> Result<Utf8PathBuf, ConfigureError> {
    let dir = root.join(apps.posix());
    if dir.is_dir() {
        Ok(dir)
    } else {
        Err(ConfigureError::AppsDirMissing(dir))
    }
}

/// Record the apps directory (unless it came from the defconfig) and the base selector.
pub fn patch_config(config: &mut ConfigFile, apps: &AppsDir, selector: &BoardSelector) {
    if apps.source != AppsDirSource::Defconfig {
        config.append_quoted(APPS_DIR_KEY, &apps.config_value());
    }
    config.append_quoted(BASE_DEFCONFIG_KEY, &to_posix(selector.raw()));
}

/// Patch the `.config` file on disk.
pub fn patch_config_file(
    path: &Utf8Path,
    apps: &AppsDir,
    selector: &BoardSelector,
) -> Result<(), ConfigureError> {
    let mut config = ConfigFile::load_or_default(path)?;
    patch_config(&mut config, apps, selector);
    config.save(path)?;
    tracing::debug!("Patched {}", path);
    Ok(())
}
