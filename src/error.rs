//! Error type shared by every configuration stage.
//!
//! Each failure class carries a stable process exit code so that scripts
//! wrapping `boardconf` can tell a missing board from a refused overwrite.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while selecting a board configuration
#[derive(Error, Debug)]
pub enum ConfigureError {
    #[error("Missing <board/config> argument")]
    MissingSelector,

    #[error("Directory for {0} does not exist")]
    BoardNotFound(String),

    #[error("Board selector {selector} matches several configurations: {}", .candidates.join(", "))]
    AmbiguousBoard {
        selector: String,
        candidates: Vec<String>,
    },

    #[error("File Make.defs could not be found for {0}")]
    MakeDefsNotFound(Utf8PathBuf),

    #[error("File {0} does not exist")]
    DefconfigNotFound(Utf8PathBuf),

    #[error("Already configured! Please '{clean_command}' and try again")]
    AlreadyConfigured { clean_command: String },

    #[error("Could not find the path to the apps directory")]
    AppsDirNotFound,

    #[error("Directory \"{0}\" does not exist")]
    AppsDirMissing(Utf8PathBuf),

    #[error("Failed to symlink {src}: {source}")]
    LinkFailed {
        src: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to backup {src}: {source}")]
    BackupFailed {
        src: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to install {src}: {source}")]
    InstallFailed {
        src: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to start {tool}: {source}")]
    ToolSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}")]
    ToolFailed { tool: String, status: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigureError {
    /// Process exit status for this failure class.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::MissingSelector => 2,
            Self::BoardNotFound(_) | Self::AmbiguousBoard { .. } => 3,
            Self::MakeDefsNotFound(_) => 4,
            Self::DefconfigNotFound(_) => 5,
            Self::AlreadyConfigured { .. } => 6,
            Self::AppsDirNotFound | Self::AppsDirMissing(_) => 7,
            Self::LinkFailed { .. } => 8,
            Self::BackupFailed { .. } | Self::InstallFailed { .. } => 10,
            Self::ToolSpawn { .. } | Self::ToolFailed { .. } | Self::Io(_) => 1,
        }
    }

    /// Whether the usage text should follow the error message.
    pub fn wants_usage(&self) -> bool {
        matches!(
            self,
            Self::MissingSelector | Self::BoardNotFound(_) | Self::AmbiguousBoard { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_per_class() {
        assert_eq!(ConfigureError::MissingSelector.exit_code(), 2);
        assert_eq!(ConfigureError::BoardNotFound("x:y".into()).exit_code(), 3);
        assert_eq!(
            ConfigureError::MakeDefsNotFound(Utf8PathBuf::from("b")).exit_code(),
            4
        );
        assert_eq!(
            ConfigureError::DefconfigNotFound(Utf8PathBuf::from("d")).exit_code(),
            5
        );
        assert_eq!(
            ConfigureError::AlreadyConfigured {
                clean_command: "make distclean".into()
            }
            .exit_code(),
            6
        );
        assert_eq!(ConfigureError::AppsDirNotFound.exit_code(), 7);
        assert_eq!(
            ConfigureError::LinkFailed {
                src: Utf8PathBuf::from("Make.defs"),
                source: std::io::Error::other("denied"),
            }
            .exit_code(),
            8
        );
        assert_eq!(
            ConfigureError::BackupFailed {
                src: Utf8PathBuf::from("defconfig"),
                source: std::io::Error::other("denied"),
            }
            .exit_code(),
            10
        );
    }

    #[test]
    fn test_already_configured_message_names_clean_command() {
        let err = ConfigureError::AlreadyConfigured {
            clean_command: "gmake distclean".into(),
        };
        assert!(err.to_string().contains("'gmake distclean'"));
    }

    #[test]
    fn test_usage_follows_resolution_errors_only() {
        assert!(ConfigureError::BoardNotFound("sim:nsh".into()).wants_usage());
        assert!(!ConfigureError::AppsDirNotFound.wants_usage());
    }
}
