/// Host environment the build tree is configured for.
///
/// Only the native-Windows distinction matters to path formatting; the rest
/// is forwarded to the host-setup tool as its command line flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSelector {
    Linux,
    MacOs,
    Cygwin,
    MinGw,
    WindowsNative,
    Bsd,
}

impl HostSelector {
    /// The flag that selected this host, as understood by the host-setup tool.
    pub fn flag(self) -> &'static str {
        match self {
            Self::Linux => "-l",
            Self::MacOs => "-m",
            Self::Cygwin => "-c",
            Self::MinGw => "-g",
            Self::WindowsNative => "-n",
            Self::Bsd => "-B",
        }
    }

    pub fn is_windows_native(self) -> bool {
        self == Self::WindowsNative
    }

    /// BSD hosts build with GNU make installed under another name.
    pub fn uses_alternate_make(self) -> bool {
        self == Self::Bsd
    }
}

impl std::fmt::Display for HostSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Linux => "Linux",
            Self::MacOs => "macOS",
            Self::Cygwin => "Cygwin",
            Self::MinGw => "MinGW",
            Self::WindowsNative => "Windows native",
            Self::Bsd => "BSD",
        };
        f.write_str(name)
    }
}

/// Host selection as given on the command line.
///
/// `None` means "keep whatever the defconfig recorded".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostChoice(pub Option<HostSelector>);

impl HostChoice {
    /// Effective native-Windows flag given the value recorded in the defconfig.
    pub fn windows_native(self, recorded: bool) -> bool {
        match self.0 {
            Some(host) => host.is_windows_native(),
            None => recorded,
        }
    }

    pub fn flag(self) -> Option<&'static str> {
        self.0.map(HostSelector::flag)
    }

    pub fn uses_alternate_make(self) -> bool {
        self.0.is_some_and(HostSelector::uses_alternate_make)
    }
}
