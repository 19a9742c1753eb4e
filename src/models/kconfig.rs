//! Flat `KEY=value` configuration files (`.config`, `defconfig`).
//!
//! [`ConfigFile`] keeps every line in its original order. Assignments are
//! keyed by symbol so that [`ConfigFile::append`] can drop an existing
//! assignment before adding the new one at the end; comments and blank lines
//! are carried through untouched.

use camino::Utf8Path;
use indexmap::IndexMap;
use regex::Regex;
use std::fs;
use std::sync::LazyLock;

/// Path to the companion applications tree.
pub const APPS_DIR_KEY: &str = "CONFIG_APPS_DIR";

/// `y` when configured for a native Windows host.
pub const WINDOWS_NATIVE_KEY: &str = "CONFIG_WINDOWS_NATIVE";

/// Selector the configuration was created from.
pub const BASE_DEFCONFIG_KEY: &str = "CONFIG_BASE_DEFCONFIG";

/// Release version, read from the version-info file.
pub const VERSION_STRING_KEY: &str = "CONFIG_VERSION_STRING";

static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)=(.*)$").expect("Invalid assignment regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum LineKey {
    Symbol(String),
    Verbatim(usize),
}

/// Ordered view of a `KEY=value` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    lines: IndexMap<LineKey, String>,
    verbatim_count: usize,
}

impl ConfigFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse file contents. A repeated key keeps its first position and its last value.
    pub fn parse(content: &str) -> Self {
        let mut file = Self::new();

        for line in content.lines() {
            match ASSIGNMENT.captures(line) {
                Some(caps) => {
                    file.lines
                        .insert(LineKey::Symbol(caps[1].to_string()), caps[2].to_string());
                }
                None => file.push_verbatim(line),
            }
        }

        file
    }

    /// Load a file from disk.
    pub fn load(path: &Utf8Path) -> std::io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Load a file, treating a missing file as empty.
    pub fn load_or_default(path: &Utf8Path) -> std::io::Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Self::parse(&content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e),
        }
    }

    pub fn save(&self, path: &Utf8Path) -> std::io::Result<()> {
        fs::write(path, self.render())
    }

    /// Raw value text of an assignment, quotes included.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines
            .get(&LineKey::Symbol(key.to_string()))
            .map(String::as_str)
    }

    /// Value of an assignment with surrounding double quotes removed.
    pub fn get_unquoted(&self, key: &str) -> Option<&str> {
        self.get(key).map(unquote)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove an assignment, returning its raw value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.lines.shift_remove(&LineKey::Symbol(key.to_string()))
    }

    /// Drop any existing assignment of `key`, then add `key=value` as the last line.
    pub fn append(&mut self, key: &str, value: &str) {
        self.remove(key);
        self.lines
            .insert(LineKey::Symbol(key.to_string()), value.to_string());
    }

    /// Like [`append`](Self::append) but wraps the value in double quotes.
    pub fn append_quoted(&mut self, key: &str, value: &str) {
        self.append(key, &format!("\"{value}\""));
    }

    /// Assignment keys in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.lines.keys().filter_map(|k| match k {
            LineKey::Symbol(name) => Some(name.as_str()),
            LineKey::Verbatim(_) => None,
        })
    }

    /// Render back to text, one line per entry, newline terminated.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.lines {
            match key {
                LineKey::Symbol(name) => {
                    out.push_str(name);
                    out.push('=');
                    out.push_str(value);
                }
                LineKey::Verbatim(_) => out.push_str(value),
            }
            out.push('\n');
        }
        out
    }

    fn push_verbatim(&mut self, line: &str) {
        self.lines
            .insert(LineKey::Verbatim(self.verbatim_count), line.to_string());
        self.verbatim_count += 1;
    }
}

/// Strip one pair of surrounding double quotes, if present.
pub fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
