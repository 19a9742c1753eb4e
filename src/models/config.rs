use serde::{Deserialize, Serialize};

/// Tool settings from `.boardconf.yaml` and `BOARDCONF_*` environment variables.
///
/// Every field has a default reproducing the stock build-system layout, so
/// the settings file is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Command used for the clean target.
    pub make_command: String,

    /// Clean command on BSD hosts (`-B`).
    pub bsd_make_command: String,

    /// Target that returns the build root to an unconfigured state.
    pub clean_target: String,

    /// Config-expansion helper, relative to the build root.
    pub expand_tool: String,

    /// Host-setup helper, relative to the build root.
    pub host_setup_tool: String,

    /// IDE/debugger support files copied from the config directory when present.
    pub optional_files: Vec<String>,

    /// Conventional apps directories, relative to the build root, probed in order.
    pub apps_dir_candidates: Vec<String>,

    /// Scratch directory toggled by `-S`, relative to the build root.
    pub scratch_dir: String,

    /// Version-info file at the build root.
    pub version_file: String,

    /// Directory for rolling log files. No file logging when unset.
    pub log_dir: Option<String>,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            make_command: "make".to_string(),
            bsd_make_command: "gmake".to_string(),
            clean_target: "distclean".to_string(),
            expand_tool: "tools/process_config.sh".to_string(),
            host_setup_tool: "tools/sethost.sh".to_string(),
            optional_files: vec![
                ".gdbinit".to_string(),
                ".cproject".to_string(),
                ".project".to_string(),
            ],
            apps_dir_candidates: vec![
                "../apps".to_string(),
                "../nuttx-apps".to_string(),
                "../nuttx-apps.git".to_string(),
            ],
            scratch_dir: "../nxtmpdir".to_string(),
            version_file: ".version".to_string(),
            log_dir: None,
        }
    }
}

impl ToolSettings {
    /// Make command for the selected host.
    pub fn make_for(&self, alternate: bool) -> &str {
        if alternate {
            &self.bsd_make_command
        } else {
            &self.make_command
        }
    }
}
