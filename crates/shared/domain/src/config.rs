use crate::constants::{DEFAULT_CONFIG_EXTENSION, DEFAULT_CONFIG_ROOT};
use bitflags::bitflags;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::PathBuf;

bitflags! {
    /// Declared behaviour of a configuration type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ConfigFlags: u8 {
        /// Document lives directly under the shared config root.
        const SHARED_ROOT = 1 << 0;
        /// Document is skipped by the bulk reload sweep.
        const NO_RELOAD = 1 << 1;
    }
}

/// Immutable metadata of a configuration type, used to locate its backing document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigDescriptor {
    name: Cow<'static, str>,
    flags: ConfigFlags,
}

impl ConfigDescriptor {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self { name: name.into(), flags: ConfigFlags::empty() }
    }

    #[must_use]
    pub fn with_shared_root(mut self, shared: bool) -> Self {
        self.flags.set(ConfigFlags::SHARED_ROOT, shared);
        self
    }

    #[must_use]
    pub fn with_reload_exempt(mut self, exempt: bool) -> Self {
        self.flags.set(ConfigFlags::NO_RELOAD, exempt);
        self
    }

    /// File stem of the backing document.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn flags(&self) -> ConfigFlags {
        self.flags
    }

    #[must_use]
    pub const fn shared_root(&self) -> bool {
        self.flags.contains(ConfigFlags::SHARED_ROOT)
    }

    #[must_use]
    pub const fn reload_exempt(&self) -> bool {
        self.flags.contains(ConfigFlags::NO_RELOAD)
    }
}

/// Settings of the host process itself.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HostSettings {
    /// Directory under which all configuration documents are kept.
    pub config_root: PathBuf,
    /// Extension of configuration documents (without the dot).
    pub config_extension: String,
    pub log: LogSettings,
}

/// Logging knobs of the host process.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Directory for log files; console only when absent.
    pub directory: Option<PathBuf>,
    pub level: String,
    pub console: bool,
    /// Truncate the previous run's log file at startup.
    pub fresh: bool,
}

// --- Default ---

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            config_root: PathBuf::from(DEFAULT_CONFIG_ROOT),
            config_extension: DEFAULT_CONFIG_EXTENSION.to_owned(),
            log: LogSettings::default(),
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { directory: None, level: "info".to_owned(), console: true, fresh: true }
    }
}
