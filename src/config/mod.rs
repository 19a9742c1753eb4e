use crate::models::ToolSettings;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, Environment, File, FileFormat};

/// Name of the optional settings file at the build root.
pub const SETTINGS_FILE: &str = ".boardconf.yaml";

/// Environment variable prefix for settings overrides (`BOARDCONF_MAKE_COMMAND=gmake`).
pub const ENV_PREFIX: &str = "BOARDCONF";

/// Loads [`ToolSettings`] for a build root.
///
/// Sources, later ones winning:
/// - built-in defaults
/// - `<root>/.boardconf.yaml`, if present
/// - `BOARDCONF_*` environment variables
#[derive(Debug, Clone)]
pub struct ConfigManager {
    root: Utf8PathBuf,
    settings_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a ConfigManager for the given build root.
    pub fn new<P: AsRef<Utf8Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();

        Self {
            settings_path: root.join(SETTINGS_FILE),
            root,
        }
    }

    /// Load settings from all layers.
    pub fn load_settings(&self) -> Result<ToolSettings> {
        if self.settings_path.is_file() {
            tracing::debug!("Reading settings from {}", self.settings_path);
        } else {
            tracing::debug!(
                "No settings file at {}, using defaults",
                self.settings_path
            );
        }

        let settings = Config::builder()
            .add_source(File::new(self.settings_path.as_str(), FileFormat::Yaml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to read settings: {}", self.settings_path))?;

        let settings: ToolSettings = settings
            .try_deserialize()
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        tracing::debug!(
            "Settings loaded - make: {}, expand: {}, host setup: {}",
            settings.make_command,
            settings.expand_tool,
            settings.host_setup_tool
        );
        Ok(settings)
    }

    /// Get the build root this manager reads from.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }
}
